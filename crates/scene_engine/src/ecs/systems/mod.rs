//! ECS Systems module

pub mod camera_system;
pub mod transform_system;
pub mod viewport_state;

pub use camera_system::CameraSystem;
pub use transform_system::TransformSystem;
pub use viewport_state::{ViewportState, ViewportStateSystem};
