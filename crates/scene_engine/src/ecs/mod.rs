//! Entity-Component-Scenegraph implementation
//!
//! Entities form a single n-ary tree rooted at the world's root entity.
//! Components hang off entities and are visited by systems through
//! double dispatch: a component's `accept` calls the `apply2_*` handler
//! on the system that matches its kind.

pub mod component;
pub mod components;
pub mod decorator;
pub mod entity;
pub mod frame;
pub mod system;
pub mod systems;
pub mod world;

#[cfg(test)]
mod tests;

pub use component::{Component, ComponentMeta};
pub use components::{BasicTransform, Camera, RenderMesh, Shader, VertexAttribute};
pub use decorator::{ComponentDecorator, ShaderDecorator, UniformKind, UniformValue};
pub use entity::{ComponentSlot, Entity};
pub use frame::{FrameStage, FrameTracker};
pub use system::{System, SystemRole, TraversalPhase, VisitContext};
pub use systems::{CameraSystem, TransformSystem, ViewportState, ViewportStateSystem};
pub use world::{TreeNode, World};

slotmap::new_key_type! {
    /// Opaque entity identifier, unique within a [`World`]
    pub struct EntityId;

    /// Opaque component identifier, unique within a [`World`]
    pub struct ComponentId;
}
