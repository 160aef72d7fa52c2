//! # Perspective Camera
//!
//! Camera with a pose (position + orientation) and perspective parameters.
//!
//! ## Design Principles
//! - **Library-agnostic**: No backend dependencies in camera math
//! - **Explicit projection**: The projection matrix is cached and only rebuilt
//!   by [`PerspectiveCamera::update_projection_matrix`], so callers that move
//!   the camera or change its aspect must recompute it themselves

use crate::foundation::math::{utils, Mat4, Mat4Ext, Pose, Quat, Vec3};

/// Perspective camera
///
/// # Coordinate System
/// Uses standard right-handed Y-up coordinates. The camera looks down its
/// local -Z axis, so an identity orientation looks toward world -Z.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Camera position in world space
    pub position: Vec3,

    /// Camera orientation
    pub rotation: Quat,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,

    projection: Mat4,
    projection_updates: u64,
}

impl PerspectiveCamera {
    /// Create a new perspective camera at the origin
    ///
    /// # Arguments
    /// * `fov_degrees` - Vertical field of view in degrees
    /// * `aspect` - Aspect ratio (width / height) of the viewport
    /// * `near` - Distance to near clipping plane (must be > 0)
    /// * `far` - Distance to far clipping plane (must be > near)
    ///
    /// # Example
    /// ```rust
    /// use skyrun_engine::render::PerspectiveCamera;
    ///
    /// let camera = PerspectiveCamera::new(60.0, 1.0, 0.1, 1000.0);
    /// assert_eq!(camera.projection_updates(), 1);
    /// ```
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
            projection: Mat4::identity(),
            projection_updates: 0,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Current camera pose
    pub const fn pose(&self) -> Pose {
        Pose::from_position_rotation(self.position, self.rotation)
    }

    /// Set camera pose
    pub fn set_pose(&mut self, pose: Pose) {
        self.position = pose.position;
        self.rotation = pose.rotation;
        log::trace!("Camera pose updated to: {:?}", pose.position);
    }

    /// Update camera aspect ratio for viewport changes
    ///
    /// Only logs aspect ratio changes when the difference is significant
    /// (> 0.01) to reduce log noise during resize events. The projection is
    /// not rebuilt here.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// Rebuild the cached projection matrix from fov, aspect, near and far
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective(self.fov, self.aspect, self.near, self.far);
        self.projection_updates += 1;
    }

    /// Cached projection matrix
    pub const fn projection_matrix(&self) -> &Mat4 {
        &self.projection
    }

    /// How many times the projection has been rebuilt
    pub const fn projection_updates(&self) -> u64 {
        self.projection_updates
    }

    /// World-to-camera transform
    pub fn view_matrix(&self) -> Mat4 {
        self.pose().inverse().to_matrix()
    }

    /// Combined projection * view matrix
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// Direction the camera looks at
    pub fn forward(&self) -> Vec3 {
        self.pose().forward()
    }
}

impl Default for PerspectiveCamera {
    /// 60 degree camera with square aspect, near 0.1 and far 1000
    fn default() -> Self {
        Self::new(60.0, 1.0, 0.1, 1000.0)
    }
}
