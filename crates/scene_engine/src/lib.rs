//! # Scene Engine
//!
//! Entity-Component-Scenegraph runtime for 3D renderers.
//!
//! ## Features
//!
//! - **Scenegraph**: entities in a single tree, components attached by id
//! - **Visitor systems**: double dispatch from components to `apply2_*` handlers
//! - **Transform propagation**: `l2world` and camera-relative `l2cam` matrices
//! - **Frame ordering**: transform, pre-camera and camera passes checked by a state machine
//! - **Event mediator**: name-routed, synchronous GUI-to-system notifications
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! fn main() -> Result<(), SceneError> {
//!     let mut scene = Scene::new(SceneConfig::default());
//!     let root = scene.world().root();
//!
//!     let world = scene.world_mut();
//!     let node = world.create_entity(Entity::new("node"))?;
//!     world.add_entity_child(root, node)?;
//!     world.add_component(node, BasicTransform::from_trs("trs", Mat4::translate(1.0, 0.0, 0.0)))?;
//!
//!     scene.init()?;
//!     scene.run_frame()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod ecs;
pub mod error;
pub mod events;
pub mod foundation;
pub mod scene;

/// Common imports for scene users
pub mod prelude {
    pub use crate::{
        config::{Config, DispatchPolicy, OrderingPolicy, SceneConfig},
        ecs::{
            BasicTransform, Camera, CameraSystem, Component, ComponentDecorator, ComponentId, Entity,
            EntityId, FrameStage, RenderMesh, Shader, ShaderDecorator, System, TransformSystem,
            UniformKind, UniformValue, ViewportState, ViewportStateSystem, World,
        },
        error::{ErrorKind, SceneError, SceneResult},
        events::{Event, EventManager, EventValue, Subscriber},
        foundation::math::{Mat4, Mat4Ext, Vec3, Vec4},
        scene::{FrameReport, Scene},
    };
}
