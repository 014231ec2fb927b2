//! System (visitor) trait
//!
//! A system is an operation over the scenegraph. The world walks the tree
//! in pre-order and, for every entity, calls [`System::apply2_entity`]
//! and then `accept` on each attached component, which routes to the
//! `apply2_*` handler for that component's kind.
//!
//! Component handlers default to `Err(UnsupportedDispatch)`. The world
//! turns that error into a skip, a warning or a hard failure according to
//! `SceneConfig::unsupported_dispatch`, so every system behaves the same
//! way when it meets a kind it does not know.

use super::components::{BasicTransform, Camera, RenderMesh, Shader};
use super::component::Component;
use super::systems::ViewportState;
use super::{Entity, EntityId};
use crate::error::{SceneError, SceneResult};
use crate::events::Event;
use crate::foundation::math::Mat4;

/// Which traversal entry point is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalPhase {
    /// `World::traverse_visit`
    Main,
    /// `World::traverse_visit_pre_camera`
    PreCamera,
}

/// Position of a system in the per-frame phase ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemRole {
    /// Not part of the frame ordering; may run at any time
    Free,
    /// Computes `l2world`; opens a frame
    TransformPass,
    /// Computes `l2cam`; needs transforms and a resolved camera
    CameraPass,
}

/// Per-entity information handed to systems during a traversal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisitContext {
    /// Entity being visited
    pub entity: EntityId,
    /// Its parent, if any
    pub parent: Option<EntityId>,
    /// Distance from the traversal start node
    pub depth: usize,
    /// Traversal entry point
    pub phase: TraversalPhase,
    /// Current `l2world` of the parent's transform, if the parent has one
    pub parent_world: Option<Mat4>,
    /// World matrix of this entity resolved from its ancestry.
    /// Only filled in during the pre-camera phase.
    pub entity_world: Option<Mat4>,
}

impl VisitContext {
    /// Context for visiting `entity` outside of a world traversal
    pub fn detached(entity: EntityId) -> Self {
        Self {
            entity,
            parent: None,
            depth: 0,
            phase: TraversalPhase::Main,
            parent_world: None,
            entity_world: None,
        }
    }
}

/// Visitor over entities and components
pub trait System {
    /// System name, used in logs and errors
    fn name(&self) -> &str;

    /// Frame ordering role
    fn role(&self) -> SystemRole {
        SystemRole::Free
    }

    /// Called for every visited entity before its components
    fn apply2_entity(&mut self, _entity: &Entity, _ctx: &VisitContext) -> SceneResult<()> {
        Ok(())
    }

    /// Handler for [`BasicTransform`]
    fn apply2_basic_transform(
        &mut self,
        _transform: &mut BasicTransform,
        _ctx: &VisitContext,
    ) -> SceneResult<()> {
        Err(SceneError::unsupported(self.name(), BasicTransform::TYPE_NAME))
    }

    /// Handler for [`Camera`]
    fn apply2_camera(&mut self, _camera: &mut Camera, _ctx: &VisitContext) -> SceneResult<()> {
        Err(SceneError::unsupported(self.name(), Camera::TYPE_NAME))
    }

    /// Handler for [`RenderMesh`]
    fn apply2_render_mesh(&mut self, _mesh: &mut RenderMesh, _ctx: &VisitContext) -> SceneResult<()> {
        Err(SceneError::unsupported(self.name(), RenderMesh::TYPE_NAME))
    }

    /// Handler for [`Shader`]
    fn apply2_shader(&mut self, _shader: &mut Shader, _ctx: &VisitContext) -> SceneResult<()> {
        Err(SceneError::unsupported(self.name(), Shader::TYPE_NAME))
    }

    /// Handler for component kinds defined outside this crate
    fn apply2_component(
        &mut self,
        component: &mut dyn Component,
        _ctx: &VisitContext,
    ) -> SceneResult<()> {
        Err(SceneError::unsupported(self.name(), component.type_name()))
    }

    /// Event actuation on a [`ViewportState`] subscriber
    fn apply2_viewport_state(&mut self, _state: &mut ViewportState, _event: &Event) -> SceneResult<()> {
        Err(SceneError::unsupported(self.name(), ViewportState::TYPE_NAME))
    }
}
