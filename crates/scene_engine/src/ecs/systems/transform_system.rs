//! Local-to-world propagation

use crate::ecs::component::Component;
use crate::ecs::components::{BasicTransform, Camera, RenderMesh, Shader};
use crate::ecs::system::{System, SystemRole, VisitContext};
use crate::error::SceneResult;

/// Computes `l2world` for every visited transform.
///
/// Must run from the root in pre-order so that the parent's `l2world`
/// handed over in [`VisitContext::parent_world`] is already current.
/// A transform whose parent has none is treated as a root.
#[derive(Debug, Default)]
pub struct TransformSystem {
    visited: usize,
}

impl TransformSystem {
    /// Create a transform system
    pub fn new() -> Self {
        Self::default()
    }

    /// Transforms updated by the most recent traversals
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Clear the visit counter
    pub fn reset_visited(&mut self) {
        self.visited = 0;
    }
}

impl System for TransformSystem {
    fn name(&self) -> &str {
        "TransformSystem"
    }

    fn role(&self) -> SystemRole {
        SystemRole::TransformPass
    }

    fn apply2_basic_transform(&mut self, transform: &mut BasicTransform, ctx: &VisitContext) -> SceneResult<()> {
        transform.l2world = match ctx.parent_world {
            Some(parent_world) => parent_world * transform.trs,
            None => {
                if ctx.parent.is_some() {
                    log::debug!(
                        "Transform '{}' has no parent transform, treating it as a root",
                        transform.meta().name
                    );
                }
                transform.trs
            }
        };
        self.visited += 1;
        Ok(())
    }

    fn apply2_camera(&mut self, _camera: &mut Camera, _ctx: &VisitContext) -> SceneResult<()> {
        Ok(())
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
    use crate::foundation::math::{Mat4, Mat4Ext};
    use approx::assert_relative_eq;
    use slotmap::SlotMap;

    fn ids() -> (EntityId, EntityId) {
        let mut ids: SlotMap<EntityId, ()> = SlotMap::with_key();
        (ids.insert(()), ids.insert(()))
    }

    #[test]
    fn test_composes_with_parent_world() {
        let (entity, parent) = ids();
        let mut system = TransformSystem::new();
        let mut transform = BasicTransform::from_trs("child", Mat4::translate(0.0, 1.0, 0.0));
        let ctx = VisitContext {
            parent: Some(parent),
            parent_world: Some(Mat4::translate(1.0, 0.0, 0.0)),
            ..VisitContext::detached(entity)
        };

        transform.accept(&mut system, &ctx).unwrap();

        assert_relative_eq!(transform.l2world, Mat4::translate(1.0, 1.0, 0.0), epsilon = 1e-6);
        assert_eq!(system.visited(), 1);
    }

    #[test]
    fn test_missing_parent_transform_treated_as_root() {
        let (entity, parent) = ids();
        let mut system = TransformSystem::new();
        let trs = Mat4::scaling(2.0, 2.0, 2.0);
        let mut transform = BasicTransform::from_trs("orphan", trs);
        let ctx = VisitContext {
            parent: Some(parent),
            ..VisitContext::detached(entity)
        };

        transform.accept(&mut system, &ctx).unwrap();

        assert_eq!(transform.l2world, trs);
    }

    #[test]
    fn test_other_kinds_are_skipped() {
        let (entity, _) = ids();
        let mut system = TransformSystem::new();
        let ctx = VisitContext::detached(entity);

        let mut camera = Camera::from_matrix("cam", Mat4::identity());
        let mut shader = Shader::new("flat", "v", "f");
        camera.accept(&mut system, &ctx).unwrap();
        shader.accept(&mut system, &ctx).unwrap();

        assert_eq!(system.visited(), 0);
    }
}
