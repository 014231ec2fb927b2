//! Entity implementation

use super::{ComponentId, EntityId};

/// Type names and id of a component attached to an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentSlot {
    /// Component type name, as reported by `Component::type_name`
    pub type_name: &'static str,
    /// Wrapped kind for decorators, as reported by `Component::kind`
    pub kind: &'static str,
    /// Component id
    pub id: ComponentId,
}

/// A node of the scenegraph.
///
/// Child entities and attached components are kept in two ordered
/// containers. The parent link is a plain id: entities never own their
/// parent. Structure is changed only through [`World`](super::World),
/// which keeps both sides of every link consistent.
#[derive(Debug, Clone)]
pub struct Entity {
    name: String,
    type_tag: String,
    pub(super) id: Option<EntityId>,
    pub(super) parent: Option<EntityId>,
    pub(super) children: Vec<EntityId>,
    pub(super) components: Vec<ComponentSlot>,
}

impl Entity {
    /// Default type tag for plain entities
    pub const DEFAULT_TYPE: &'static str = "Entity";

    /// Create an unregistered entity
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_type(name, Self::DEFAULT_TYPE)
    }

    /// Create an unregistered entity with a custom type tag
    pub fn with_type(name: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
            id: None,
            parent: None,
            children: Vec::new(),
            components: Vec::new(),
        }
    }

    /// Entity name (not required to be unique)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type tag used for lookups by name
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// Id assigned when the entity was registered
    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    /// Parent entity, `None` for the root and for detached entities
    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    /// Ordered child entities
    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    /// Child entity at position `index`
    pub fn child(&self, index: usize) -> Option<EntityId> {
        self.children.get(index).copied()
    }

    /// Number of child entities
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Attached components in attachment order
    pub fn components(&self) -> &[ComponentSlot] {
        &self.components
    }

    /// Ids of attached components in attachment order
    pub fn component_ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.components.iter().map(|slot| slot.id)
    }

    /// Number of attached components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// First attached component whose type name or wrapped kind matches.
    ///
    /// Only this entity is searched, never its descendants.
    pub fn component_by_type(&self, type_name: &str) -> Option<ComponentId> {
        self.components
            .iter()
            .find(|slot| slot.type_name == type_name || slot.kind == type_name)
            .map(|slot| slot.id)
    }

    /// Whether this entity currently has no parent
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub(super) fn remove_child(&mut self, child: EntityId) -> bool {
        let before = self.children.len();
        self.children.retain(|id| *id != child);
        before != self.children.len()
    }

    pub(super) fn remove_component(&mut self, component: ComponentId) -> bool {
        let before = self.components.len();
        self.components.retain(|slot| slot.id != component);
        before != self.components.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_new_entity_is_unregistered() {
        let entity = Entity::new("node");

        assert_eq!(entity.name(), "node");
        assert_eq!(entity.type_tag(), Entity::DEFAULT_TYPE);
        assert!(entity.id().is_none());
        assert!(entity.is_root());
        assert_eq!(entity.child_count(), 0);
    }

    #[test]
    fn test_component_by_type_returns_first_match() {
        let mut ids: SlotMap<ComponentId, ()> = SlotMap::with_key();
        let first = ids.insert(());
        let second = ids.insert(());
        let mut entity = Entity::with_type("node", "Group");

        entity.components.push(ComponentSlot {
            type_name: "ComponentDecorator",
            kind: "BasicTransform",
            id: first,
        });
        entity.components.push(ComponentSlot {
            type_name: "BasicTransform",
            kind: "BasicTransform",
            id: second,
        });

        assert_eq!(entity.component_by_type("BasicTransform"), Some(first));
        assert_eq!(entity.component_by_type("ComponentDecorator"), Some(first));
        assert_eq!(entity.component_by_type("Camera"), None);

        assert!(entity.remove_component(first));
        assert_eq!(entity.component_by_type("BasicTransform"), Some(second));
    }
}
