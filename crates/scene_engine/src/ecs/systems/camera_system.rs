//! Camera-space propagation
//!
//! Runs in two phases per frame. The pre-camera phase visits only the
//! active camera, inverts its world matrix and keeps the result as the
//! view matrix. The main phase then writes `l2cam = view @ l2world` on
//! every transform, so it must follow both the transform pass and the
//! pre-camera phase of the same frame.

use crate::ecs::component::Component;
use crate::ecs::components::{BasicTransform, Camera, RenderMesh, Shader};
use crate::ecs::system::{System, SystemRole, TraversalPhase, VisitContext};
use crate::error::{SceneError, SceneResult};
use crate::foundation::math::Mat4;

/// Computes `l2cam` relative to the active camera
#[derive(Debug, Default)]
pub struct CameraSystem {
    view: Option<Mat4>,
    projection: Option<Mat4>,
    fold_projection: bool,
}

impl CameraSystem {
    /// Camera system writing view-space `l2cam`
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: also fold the camera projection into `l2cam`
    pub fn with_projection_folded(mut self) -> Self {
        self.fold_projection = true;
        self
    }

    /// Whether `l2cam` includes the projection
    pub fn folds_projection(&self) -> bool {
        self.fold_projection
    }

    /// View matrix resolved by the last pre-camera phase
    pub fn view(&self) -> Option<Mat4> {
        self.view
    }

    /// Projection of the camera resolved by the last pre-camera phase
    pub fn projection(&self) -> Option<Mat4> {
        self.projection
    }

    /// Forget the resolved camera
    pub fn reset(&mut self) {
        self.view = None;
        self.projection = None;
    }

    fn resolve(&mut self, camera: &mut Camera, ctx: &VisitContext) -> SceneResult<()> {
        let camera_world = ctx.entity_world.unwrap_or_else(Mat4::identity);
        let view = camera_world.try_inverse().ok_or_else(|| {
            SceneError::SingularMatrix(format!("world matrix of camera '{}'", camera.meta().name))
        })?;

        log::trace!("Camera '{}' resolved", camera.meta().name);
        camera.root2cam = view;
        self.view = Some(view);
        self.projection = Some(camera.proj_mat);
        Ok(())
    }
}

impl System for CameraSystem {
    fn name(&self) -> &str {
        "CameraSystem"
    }

    fn role(&self) -> SystemRole {
        SystemRole::CameraPass
    }

    fn apply2_basic_transform(&mut self, transform: &mut BasicTransform, ctx: &VisitContext) -> SceneResult<()> {
        if ctx.phase == TraversalPhase::PreCamera {
            return Ok(());
        }

        let view = self.view.ok_or(SceneError::CameraNotInitialized)?;
        transform.l2cam = match (self.fold_projection, self.projection) {
            (true, Some(projection)) => projection * view * transform.l2world,
            _ => view * transform.l2world,
        };
        Ok(())
    }

    fn apply2_camera(&mut self, camera: &mut Camera, ctx: &VisitContext) -> SceneResult<()> {
        match ctx.phase {
            TraversalPhase::PreCamera => self.resolve(camera, ctx),
            TraversalPhase::Main => Ok(()),
        }
    }

    fn apply2_render_mesh(&mut self, _mesh: &mut RenderMesh, _ctx: &VisitContext) -> SceneResult<()> {
        Ok(())
    }

    fn apply2_shader(&mut self, _shader: &mut Shader, _ctx: &VisitContext) -> SceneResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::EntityId;
    use crate::foundation::math::Mat4Ext;
    use approx::assert_relative_eq;
    use slotmap::SlotMap;

    fn entity() -> EntityId {
        let mut ids: SlotMap<EntityId, ()> = SlotMap::with_key();
        ids.insert(())
    }

    fn pre_camera(camera_world: Mat4) -> VisitContext {
        VisitContext {
            phase: TraversalPhase::PreCamera,
            entity_world: Some(camera_world),
            ..VisitContext::detached(entity())
        }
    }

    #[test]
    fn test_main_phase_before_resolution_fails() {
        let mut system = CameraSystem::new();
        let mut transform = BasicTransform::new("node");

        let err = transform
            .accept(&mut system, &VisitContext::detached(entity()))
            .unwrap_err();

        assert_eq!(err, SceneError::CameraNotInitialized);
    }

    #[test]
    fn test_l2cam_is_view_times_l2world() {
        let camera_world = Mat4::translate(0.0, 0.0, 5.0) * Mat4::rotation_y(0.3);
        let mut system = CameraSystem::new();
        let mut camera = Camera::perspective("cam", 50.0, 1.0, 0.1, 100.0);
        camera.accept(&mut system, &pre_camera(camera_world)).unwrap();

        let mut transform = BasicTransform::new("node");
        transform.l2world = Mat4::translate(1.0, 1.0, 0.0);
        transform
            .accept(&mut system, &VisitContext::detached(entity()))
            .unwrap();

        let view = camera_world.try_inverse().unwrap();
        assert_relative_eq!(camera.root2cam, view, epsilon = 1e-5);
        assert_relative_eq!(transform.l2cam, view * transform.l2world, epsilon = 1e-5);
    }

    #[test]
    fn test_folded_projection() {
        let mut system = CameraSystem::new().with_projection_folded();
        let mut camera = Camera::orthographic("cam", -1.0, 1.0, -1.0, 1.0, 0.1, 10.0);
        camera.accept(&mut system, &pre_camera(Mat4::identity())).unwrap();

        let mut transform = BasicTransform::new("node");
        transform.l2world = Mat4::translate(0.0, 0.0, -2.0);
        transform
            .accept(&mut system, &VisitContext::detached(entity()))
            .unwrap();

        assert_relative_eq!(transform.l2cam, camera.proj_mat * transform.l2world, epsilon = 1e-6);
    }

    #[test]
    fn test_singular_camera_matrix() {
        let mut system = CameraSystem::new();
        let mut camera = Camera::from_matrix("cam", Mat4::identity());

        let err = camera
            .accept(&mut system, &pre_camera(Mat4::zeros()))
            .unwrap_err();

        assert!(matches!(err, SceneError::SingularMatrix(_)));
        assert!(system.view().is_none());
    }

    #[test]
    fn test_reset_forgets_camera() {
        let mut system = CameraSystem::new();
        let mut camera = Camera::from_matrix("cam", Mat4::identity());
        camera.accept(&mut system, &pre_camera(Mat4::identity())).unwrap();
        assert!(system.view().is_some());

        system.reset();
        assert!(system.view().is_none());
        assert!(system.projection().is_none());
    }
}
