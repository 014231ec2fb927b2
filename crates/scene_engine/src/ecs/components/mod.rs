//! Built-in component kinds

pub mod camera;
pub mod render_mesh;
pub mod shader;
pub mod transform;

pub use camera::Camera;
pub use render_mesh::{RenderMesh, VertexAttribute};
pub use shader::Shader;
pub use transform::BasicTransform;
