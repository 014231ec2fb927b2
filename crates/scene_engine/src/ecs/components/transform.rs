//! Transform component for the scenegraph
//!
//! `trs` is the local transform and the only field user code edits.
//! `l2world` and `l2cam` are derived: `TransformSystem` writes `l2world`
//! top-down and `CameraSystem` writes `l2cam` once the camera is resolved.

use std::any::Any;

use crate::ecs::component::{Component, ComponentMeta};
use crate::ecs::system::{System, VisitContext};
use crate::error::SceneResult;
use crate::foundation::math::{Mat4, Transform, Vec3};

/// Local transform plus its derived world and camera-space matrices
#[derive(Debug, Clone, PartialEq)]
pub struct BasicTransform {
    meta: ComponentMeta,

    /// Local transform relative to the parent entity
    pub trs: Mat4,

    /// Local-to-world matrix, written by `TransformSystem`
    pub l2world: Mat4,

    /// Local-to-camera matrix, written by `CameraSystem`
    pub l2cam: Mat4,
}

impl BasicTransform {
    /// Type name used for lookups
    pub const TYPE_NAME: &'static str = "BasicTransform";

    /// Identity transform
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_trs(name, Mat4::identity())
    }

    /// Transform with the given local matrix
    pub fn from_trs(name: impl Into<String>, trs: Mat4) -> Self {
        Self {
            meta: ComponentMeta::new(name),
            trs,
            l2world: Mat4::identity(),
            l2cam: Mat4::identity(),
        }
    }

    /// Replace the local matrix
    pub fn set_trs(&mut self, trs: Mat4) {
        self.trs = trs;
    }

    /// Translation part of `trs`
    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.trs.m14, self.trs.m24, self.trs.m34)
    }

    /// Scale part of `trs`
    pub fn scale(&self) -> Vec3 {
        Transform::from_matrix(&self.trs).scale
    }

    /// Rotation part of `trs` as XYZ Euler angles in degrees
    pub fn rotation_euler_angles(&self) -> Vec3 {
        Transform::from_matrix(&self.trs).euler_angles_degrees()
    }

    /// Replace the translation, leaving the linear part of `trs` untouched
    pub fn set_translation(&mut self, translation: Vec3) {
        self.trs.m14 = translation.x;
        self.trs.m24 = translation.y;
        self.trs.m34 = translation.z;
    }

    /// Replace the scale, keeping translation and rotation.
    ///
    /// Recomposes `trs` from its decomposition, so reflection and shear
    /// in the current matrix are lost.
    pub fn set_scale(&mut self, scale: Vec3) {
        let mut decomposed = Transform::from_matrix(&self.trs);
        decomposed.scale = scale;
        self.trs = decomposed.to_matrix();
    }

    /// Replace the rotation (XYZ Euler, degrees), keeping translation and scale.
    ///
    /// Lossy for reflected or sheared matrices, like [`Self::set_scale`].
    pub fn set_rotation_euler_angles(&mut self, angles: Vec3) {
        let mut decomposed = Transform::from_matrix(&self.trs);
        decomposed.set_euler_angles_degrees(angles);
        self.trs = decomposed.to_matrix();
    }
}

impl Default for BasicTransform {
    fn default() -> Self {
        Self::new(Self::TYPE_NAME)
    }
}

impl Component for BasicTransform {
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
        system.apply2_basic_transform(self, ctx)
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
    use crate::foundation::math::Mat4Ext;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_new_transform_is_identity() {
        let transform = BasicTransform::new("trs");

        assert_eq!(transform.trs, Mat4::identity());
        assert_eq!(transform.l2world, Mat4::identity());
        assert_eq!(transform.l2cam, Mat4::identity());
        assert_eq!(transform.type_name(), "BasicTransform");
    }

    #[test]
    fn test_decomposed_views() {
        let trs = Mat4::translate(1.0, 2.0, 3.0) * Mat4::rotation_z(90f32.to_radians()) * Mat4::scaling(2.0, 2.0, 2.0);
        let transform = BasicTransform::from_trs("trs", trs);

        assert_relative_eq!(transform.translation(), Vec3::new(1.0, 2.0, 3.0), epsilon = EPSILON);
        assert_relative_eq!(transform.scale(), Vec3::new(2.0, 2.0, 2.0), epsilon = EPSILON);
        assert_relative_eq!(
            transform.rotation_euler_angles(),
            Vec3::new(0.0, 0.0, 90.0),
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_setters_recompose_trs() {
        let mut transform = BasicTransform::new("trs");

        transform.set_scale(Vec3::new(1.0, 3.0, 1.0));
        transform.set_translation(Vec3::new(0.0, 0.0, -4.0));

        assert_relative_eq!(
            transform.trs,
            Mat4::translate(0.0, 0.0, -4.0) * Mat4::scaling(1.0, 3.0, 1.0),
            epsilon = EPSILON
        );

        transform.set_rotation_euler_angles(Vec3::new(0.0, 90.0, 0.0));
        assert_relative_eq!(transform.translation(), Vec3::new(0.0, 0.0, -4.0), epsilon = EPSILON);
        assert_relative_eq!(transform.scale(), Vec3::new(1.0, 3.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_set_translation_keeps_reflection_and_shear() {
        let mut mirrored = BasicTransform::from_trs("mirror", Mat4::scaling(-1.0, 1.0, 1.0));
        mirrored.set_translation(Vec3::new(2.0, 0.0, 0.0));

        assert_eq!(mirrored.trs, Mat4::translate(2.0, 0.0, 0.0) * Mat4::scaling(-1.0, 1.0, 1.0));

        let mut shear = Mat4::identity();
        shear.m12 = 0.5;
        let mut sheared = BasicTransform::from_trs("shear", shear);
        sheared.set_translation(Vec3::new(0.0, 1.0, 0.0));

        assert_eq!(sheared.trs, Mat4::translate(0.0, 1.0, 0.0) * shear);
    }
}
