//! Math types for the scenegraph
//!
//! All matrices are column-vector, right-handed, `f32`. Composition reads
//! right to left: `parent @ child` is written `parent * child`.

pub use nalgebra::{Matrix3, Matrix4, Quaternion, Unit, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Position, rotation and scale decomposed from (or composed into) a TRS matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Translation
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Transform with only a translation
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Compose into a matrix in T * R * S order
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Decompose a TRS matrix.
    ///
    /// Shear and negative scale are not recovered; a zero scale axis yields
    /// an identity rotation.
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let position = Vec3::new(matrix.m14, matrix.m24, matrix.m34);

        let scale_x = Vec3::new(matrix.m11, matrix.m21, matrix.m31).magnitude();
        let scale_y = Vec3::new(matrix.m12, matrix.m22, matrix.m32).magnitude();
        let scale_z = Vec3::new(matrix.m13, matrix.m23, matrix.m33).magnitude();
        let scale = Vec3::new(scale_x, scale_y, scale_z);

        let rotation = if scale_x > f32::EPSILON && scale_y > f32::EPSILON && scale_z > f32::EPSILON {
            let rotation_matrix = Mat3::new(
                matrix.m11 / scale_x, matrix.m12 / scale_y, matrix.m13 / scale_z,
                matrix.m21 / scale_x, matrix.m22 / scale_y, matrix.m23 / scale_z,
                matrix.m31 / scale_x, matrix.m32 / scale_y, matrix.m33 / scale_z,
            );
            Quat::from_matrix(&rotation_matrix)
        } else {
            Quat::identity()
        };

        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Rotation as XYZ Euler angles in degrees (roll, pitch, yaw)
    pub fn euler_angles_degrees(&self) -> Vec3 {
        let (roll, pitch, yaw) = self.rotation.euler_angles();
        Vec3::new(roll.to_degrees(), pitch.to_degrees(), yaw.to_degrees())
    }

    /// Set rotation from XYZ Euler angles in degrees
    pub fn set_euler_angles_degrees(&mut self, angles: Vec3) {
        self.rotation = Quat::from_euler_angles(
            angles.x.to_radians(),
            angles.y.to_radians(),
            angles.z.to_radians(),
        );
    }
}

/// Extension trait for Mat4 with the constructors scene code reaches for
pub trait Mat4Ext {
    /// Translation matrix
    fn translate(x: f32, y: f32, z: f32) -> Mat4;

    /// Non-uniform scaling matrix
    fn scaling(x: f32, y: f32, z: f32) -> Mat4;

    /// Rotation around the X axis (radians)
    fn rotation_x(angle: f32) -> Mat4;

    /// Rotation around the Y axis (radians)
    fn rotation_y(angle: f32) -> Mat4;

    /// Rotation around the Z axis (radians)
    fn rotation_z(angle: f32) -> Mat4;

    /// OpenGL-style perspective projection, `fov_y` in degrees
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// OpenGL-style orthographic projection
    fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4;

    /// Right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn translate(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4::new_translation(&Vec3::new(x, y, z))
    }

    fn scaling(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4::new_nonuniform_scaling(&Vec3::new(x, y, z))
    }

    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_perspective(aspect, fov_y.to_radians(), near, far)
    }

    fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_orthographic(left, right, bottom, top, near, far)
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(&eye.into(), &target.into(), &up)
    }
}
