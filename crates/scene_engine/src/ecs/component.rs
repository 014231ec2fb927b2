//! Component trait
//!
//! A component is a typed unit of data attached to exactly one entity.
//! Components never have children of their own.

use std::any::Any;

use super::system::{System, VisitContext};
use super::{ComponentId, EntityId};
use crate::error::SceneResult;

/// Identity shared by every component: name, registry id and owner link
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentMeta {
    /// Display name (not required to be unique)
    pub name: String,
    /// Assigned when the component is registered in a world
    pub id: Option<ComponentId>,
    /// Entity the component is bound to
    pub owner: Option<EntityId>,
}

impl ComponentMeta {
    /// Unregistered, unbound metadata
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            owner: None,
        }
    }
}

/// Polymorphic component interface.
///
/// `accept` is the visitor entry point: each concrete kind calls the
/// matching `apply2_*` method on the system. Kinds defined outside this
/// crate call [`System::apply2_component`] and let the system downcast.
pub trait Component: Any {
    /// Identity of this component
    fn meta(&self) -> &ComponentMeta;

    /// Mutable identity of this component
    fn meta_mut(&mut self) -> &mut ComponentMeta;

    /// Type name used as the key for type-based lookups
    fn type_name(&self) -> &'static str;

    /// Dispatch to the handler for this component kind on `system`
    fn accept(&mut self, system: &mut dyn System, ctx: &VisitContext) -> SceneResult<()>;

    /// Upcast for downcasting to the concrete type
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete type
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Display name
    fn name(&self) -> &str {
        &self.meta().name
    }

    /// Registry id, `None` until registered
    fn id(&self) -> Option<ComponentId> {
        self.meta().id
    }

    /// Owning entity, `None` while unbound
    fn owner(&self) -> Option<EntityId> {
        self.meta().owner
    }

    /// Rebind the owner link. Called by the world only.
    fn set_owner(&mut self, owner: Option<EntityId>) {
        self.meta_mut().owner = owner;
    }

    /// One-time initialization hook
    fn init(&mut self) -> SceneResult<()> {
        Ok(())
    }

    /// Per-frame update hook
    fn update(&mut self) -> SceneResult<()> {
        Ok(())
    }

    /// Component wrapped by a decorator, `None` for plain components
    fn wrapped_component(&self) -> Option<&(dyn Component + 'static)> {
        None
    }

    /// Component wrapped by a decorator, mutably
    fn wrapped_component_mut(&mut self) -> Option<&mut (dyn Component + 'static)> {
        None
    }

    /// Type name of the innermost wrapped component.
    ///
    /// Equal to `type_name` for plain components. Type-based lookups in
    /// the world match on this, so decorated components are found under
    /// the kind they wrap.
    fn kind(&self) -> &'static str {
        match self.wrapped_component() {
            Some(inner) => inner.kind(),
            None => self.type_name(),
        }
    }
}

impl dyn Component {
    /// Downcast to a concrete component type
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Mutably downcast to a concrete component type
    pub fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Downcast to `T`, looking through any decorators
    pub fn resolve_ref<T: Component>(&self) -> Option<&T> {
        match self.downcast_ref::<T>() {
            Some(found) => Some(found),
            None => self.wrapped_component()?.resolve_ref::<T>(),
        }
    }

    /// Mutably downcast to `T`, looking through any decorators
    pub fn resolve_mut<T: Component>(&mut self) -> Option<&mut T> {
        if self.as_any().is::<T>() {
            return self.downcast_mut::<T>();
        }
        self.wrapped_component_mut()?.resolve_mut::<T>()
    }
}
