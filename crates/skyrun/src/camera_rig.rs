//! Chase camera rig
//!
//! The rig keeps a camera trailing the ship at a ship-local offset. Position
//! and orientation both chase their targets with the same exponential factor,
//! so the camera lags behind sharp turns and settles at the same speed
//! regardless of frame rate.

use skyrun_engine::foundation::math::{utils, Pose, Vec3, WORLD_UP};
use skyrun_engine::render::PerspectiveCamera;

/// Camera follower bound to the ship's pose
#[derive(Debug)]
pub struct CameraRig {
    offset: Vec3,
    smooth_rate: f32,
    camera: Option<PerspectiveCamera>,
}

impl CameraRig {
    /// Create a rig without a camera
    pub const fn new(offset: Vec3, smooth_rate: f32) -> Self {
        Self {
            offset,
            smooth_rate,
            camera: None,
        }
    }

    /// Take ownership of `camera` and snap it behind `target`
    ///
    /// `offset` replaces the rig's offset when given.
    pub fn attach(&mut self, camera: PerspectiveCamera, offset: Option<Vec3>, target: &Pose) {
        if let Some(offset) = offset {
            self.offset = offset;
        }
        self.camera = Some(camera);
        self.snap(target);
        log::debug!("Camera attached with offset {:?}", self.offset);
    }

    /// Release the camera, leaving the rig inert
    pub fn detach(&mut self) -> Option<PerspectiveCamera> {
        self.camera.take()
    }

    /// Move the camera straight to its resting place behind `target`
    pub fn snap(&mut self, target: &Pose) {
        self.follow(1.0, target);
    }

    /// Chase `target` for one frame
    ///
    /// A non-positive `delta_time` snaps instead of smoothing.
    pub fn update(&mut self, delta_time: f32, target: &Pose) {
        let alpha = if delta_time > 0.0 {
            utils::smoothing_factor(self.smooth_rate, delta_time)
        } else {
            1.0
        };
        self.follow(alpha, target);
    }

    fn follow(&mut self, alpha: f32, target: &Pose) {
        let Some(camera) = self.camera.as_mut() else {
            return;
        };

        let anchor = target.position;
        let desired = anchor + target.rotation * self.offset;
        camera.position += (desired - camera.position) * alpha;

        // Sitting on the anchor or straight above it: keep the old heading
        if let Some(look) = Pose::looking_at(camera.position, anchor, WORLD_UP) {
            let mut rotation = camera.rotation.try_slerp(&look.rotation, alpha, 1.0e-6).unwrap_or(look.rotation);
            rotation.renormalize();
            camera.rotation = rotation;
        }

        camera.update_projection_matrix();
        log::trace!("Camera at {:?} (alpha {alpha:.3})", camera.position);
    }

    /// Match the camera to a new viewport size
    ///
    /// Zero-sized viewports (minimized windows) are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if let Some(camera) = self.camera.as_mut() {
            #[allow(clippy::cast_precision_loss)]
            camera.set_aspect_ratio(width as f32 / height as f32);
            camera.update_projection_matrix();
        }
    }

    /// The attached camera, if any
    pub const fn camera(&self) -> Option<&PerspectiveCamera> {
        self.camera.as_ref()
    }

    /// Ship-local camera offset
    pub const fn offset(&self) -> Vec3 {
        self.offset
    }

    /// Smoothing rate (1/s)
    pub const fn smooth_rate(&self) -> f32 {
        self.smooth_rate
    }
}
