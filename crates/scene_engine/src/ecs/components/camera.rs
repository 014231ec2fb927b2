//! Camera component
//!
//! The camera's pose comes from the `BasicTransform` of the entity it is
//! attached to. The component itself carries the projection and the
//! view matrix (`root2cam`) resolved by the pre-camera pass.

use std::any::Any;

use crate::ecs::component::{Component, ComponentMeta};
use crate::ecs::system::{System, VisitContext};
use crate::error::SceneResult;
use crate::foundation::math::{Mat4, Mat4Ext};

/// Projection plus the resolved world-to-camera matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    meta: ComponentMeta,

    /// Projection matrix
    pub proj_mat: Mat4,

    /// World-to-camera (view) matrix, written by the pre-camera pass
    pub root2cam: Mat4,
}

impl Camera {
    /// Type name used for lookups
    pub const TYPE_NAME: &'static str = "Camera";

    /// Camera with an explicit projection matrix
    pub fn from_matrix(name: impl Into<String>, proj_mat: Mat4) -> Self {
        Self {
            meta: ComponentMeta::new(name),
            proj_mat,
            root2cam: Mat4::identity(),
        }
    }

    /// Perspective camera, `fov_y` in degrees
    pub fn perspective(name: impl Into<String>, fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self::from_matrix(name, Mat4::perspective(fov_y, aspect, near, far))
    }

    /// Orthographic camera
    pub fn orthographic(
        name: impl Into<String>,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self::from_matrix(name, Mat4::orthographic(left, right, bottom, top, near, far))
    }

    /// `proj_mat @ root2cam`
    pub fn view_projection(&self) -> Mat4 {
        self.proj_mat * self.root2cam
    }
}

impl Component for Camera {
    fn meta(&self) -> &ComponentMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ComponentMeta {
        &mut self.meta
    }

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn accept(&mut self, system: &mut dyn System, ctx: &VisitContext) -> SceneResult<()> {
        system.apply2_camera(self, ctx)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_view_projection_uses_root2cam() {
        let mut camera = Camera::orthographic("cam", -10.0, 10.0, -10.0, 10.0, -1.0, 10.0);
        camera.root2cam = Mat4::translate(0.0, 0.0, -5.0);

        assert_relative_eq!(
            camera.view_projection(),
            camera.proj_mat * Mat4::translate(0.0, 0.0, -5.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_perspective_matches_nalgebra() {
        let camera = Camera::perspective("cam", 50.0, 1.0, 0.01, 100.0);
        let expected = Mat4::new_perspective(1.0, 50f32.to_radians(), 0.01, 100.0);

        assert_relative_eq!(camera.proj_mat, expected, epsilon = 1e-6);
        assert_eq!(camera.root2cam, Mat4::identity());
    }
}
