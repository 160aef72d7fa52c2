//! Math utilities and types
//!
//! Provides fundamental math types for kinematics and camera work.
//! World space is Y-up right-handed; the default forward direction is -Z.

pub use nalgebra::{Matrix4, UnitQuaternion, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// World up reference (+Y)
pub const WORLD_UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Default forward direction of an unrotated pose (-Z)
pub const WORLD_FORWARD: Vec3 = Vec3::new(0.0, 0.0, -1.0);

/// Position and orientation without scale
///
/// Every entity in the corridor (ship, obstacles, camera) is placed with a
/// `Pose`. The rotation is kept as a unit quaternion; callers that blend
/// rotations are expected to renormalize afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Position in world space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
        }
    }
}

impl Pose {
    /// Create an identity pose at the origin
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a pose with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a pose with position and rotation
    pub const fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Create a pose at `position` whose forward (-Z) axis points at `target`
    ///
    /// Returns `None` when the direction is degenerate (zero length or
    /// parallel to `up`).
    pub fn looking_at(position: Vec3, target: Vec3, up: Vec3) -> Option<Self> {
        look_rotation(target - position, up).map(|rotation| Self { position, rotation })
    }

    /// Forward direction (-Z rotated by the pose)
    pub fn forward(&self) -> Vec3 {
        self.rotation * WORLD_FORWARD
    }

    /// Up direction (+Y rotated by the pose)
    pub fn up(&self) -> Vec3 {
        self.rotation * WORLD_UP
    }

    /// Right direction (+X rotated by the pose)
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::x()
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position) * self.rotation.to_homogeneous()
    }

    /// Apply this pose to a local-space point
    pub fn transform_point(&self, point: &Vec3) -> Vec3 {
        self.position + self.rotation * point
    }

    /// Get the inverse pose
    pub fn inverse(&self) -> Self {
        let inv_rotation = self.rotation.inverse();
        Self {
            position: inv_rotation * (-self.position),
            rotation: inv_rotation,
        }
    }
}

/// Rotation whose forward (-Z) axis looks along `direction`
///
/// Returns `None` for a zero-length direction or one parallel to `up`.
pub fn look_rotation(direction: Vec3, up: Vec3) -> Option<Quat> {
    const PARALLEL_EPSILON: f32 = 1e-6;

    let forward = direction.try_normalize(f32::EPSILON)?;
    if forward.cross(&up).magnitude_squared() < PARALLEL_EPSILON {
        return None;
    }
    // face_towards aligns +Z with its argument, so hand it the backward vector
    Some(Quat::face_towards(&(-forward), &up))
}

/// Math utility functions
pub mod utils {
    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees.to_radians()
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Frame-rate independent blend factor `1 - e^(-rate * dt)`
    ///
    /// A non-positive or non-finite `dt` yields 0 (no movement toward the
    /// target).
    pub fn smoothing_factor(rate: f32, delta_time: f32) -> f32 {
        if !delta_time.is_finite() || delta_time <= 0.0 {
            return 0.0;
        }
        1.0 - (-rate * delta_time).exp()
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a perspective projection matrix (depth mapped to [0, 1])
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let tan_half_fovy = (fov_y * 0.5).tan();

        let mut result = Mat4::zeros();

        // Right-handed view space looking down -Z, depth in [0, 1]
        result[(0, 0)] = 1.0 / (aspect * tan_half_fovy);
        result[(1, 1)] = 1.0 / tan_half_fovy;
        result[(2, 2)] = far / (near - far);
        result[(2, 3)] = -(near * far) / (far - near);
        result[(3, 2)] = -1.0;

        result
    }
}
