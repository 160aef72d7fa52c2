//! Game configuration
//!
//! Every section falls back to the prototype's tuning when omitted, so an
//! empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use skyrun_engine::config::{Config, ConfigError};
use skyrun_engine::foundation::math::Vec3;

/// Starship tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    /// Forward speed along -Z in units per second
    pub base_speed: f32,
    /// Strafe speed in units per second
    pub lateral_speed: f32,
    /// Lift speed in units per second
    pub vertical_speed: f32,
    /// Rate of the exponential orientation blend (1/s)
    pub rotation_smooth_rate: f32,
    /// Squared displacement below which orientation is left alone
    pub min_move_epsilon: f32,
    /// Hull box size (width, height, depth)
    pub hull_size: Vec3,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            base_speed: 10.0,
            lateral_speed: 6.0,
            vertical_speed: 4.0,
            rotation_smooth_rate: 8.0,
            min_move_epsilon: 1e-6,
            hull_size: Vec3::new(1.0, 1.0, 3.0),
        }
    }
}

/// Chase camera tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Whether the scene gets a camera at all
    pub enabled: bool,
    /// Camera offset in ship-local space
    pub offset: Vec3,
    /// Rate of the exponential position/orientation blend (1/s)
    pub smooth_rate: f32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            offset: Vec3::new(0.0, 2.0, 8.0),
            smooth_rate: 6.0,
            fov_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Obstacle corridor layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorConfig {
    /// Number of towers
    pub obstacle_count: usize,
    /// Distance between consecutive towers along -Z
    pub spacing: f32,
    /// Full width of the band towers are scattered across on X
    pub lateral_spread: f32,
    /// Shortest tower
    pub min_height: f32,
    /// Extra random height on top of `min_height`
    pub height_range: f32,
    /// Tower width (X)
    pub width: f32,
    /// Tower depth (Z)
    pub depth: f32,
    /// Layout seed
    pub seed: u64,
}

impl Default for CorridorConfig {
    fn default() -> Self {
        Self {
            obstacle_count: 6,
            spacing: 15.0,
            lateral_spread: 10.0,
            min_height: 6.0,
            height_range: 10.0,
            width: 3.0,
            depth: 3.0,
            seed: 0x5eed,
        }
    }
}

/// Headless runner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Frames to simulate before giving up (0 = until the corridor is cleared)
    pub max_frames: u64,
    /// Target frame rate of the loop
    pub target_fps: f32,
    /// Longest frame delta fed to the simulation
    pub max_frame_delta: f32,
    /// How far ahead the autopilot looks for towers
    pub autopilot_lookahead: f32,
    /// Extra clearance the autopilot keeps from tower sides
    pub autopilot_margin: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_frames: 0,
            target_fps: 60.0,
            max_frame_delta: 0.1,
            autopilot_lookahead: 20.0,
            autopilot_margin: 1.0,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Starship tuning
    pub ship: ShipConfig,
    /// Chase camera tuning
    pub camera: CameraConfig,
    /// Corridor layout
    pub corridor: CorridorConfig,
    /// Headless runner settings
    pub run: RunConfig,
}

impl Config for GameConfig {}

fn non_negative(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be finite and >= 0, got {value}")))
    }
}

fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be finite and > 0, got {value}")))
    }
}

fn positive_size(name: &str, size: &Vec3) -> Result<(), ConfigError> {
    if size.iter().all(|c| c.is_finite() && *c > 0.0) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} components must be > 0, got {size:?}")))
    }
}

impl GameConfig {
    /// Check ranges that would otherwise produce NaNs or inverted boxes
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ship = &self.ship;
        non_negative("ship.base_speed", ship.base_speed)?;
        non_negative("ship.lateral_speed", ship.lateral_speed)?;
        non_negative("ship.vertical_speed", ship.vertical_speed)?;
        positive("ship.rotation_smooth_rate", ship.rotation_smooth_rate)?;
        non_negative("ship.min_move_epsilon", ship.min_move_epsilon)?;
        positive_size("ship.hull_size", &ship.hull_size)?;

        let camera = &self.camera;
        if !camera.offset.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::Invalid(format!("camera.offset must be finite, got {:?}", camera.offset)));
        }
        positive("camera.smooth_rate", camera.smooth_rate)?;
        positive("camera.near", camera.near)?;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.fov_degrees must be in (0, 180), got {}",
                camera.fov_degrees
            )));
        }
        if !(camera.far > camera.near && camera.far.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "camera.far ({}) must exceed camera.near ({})",
                camera.far, camera.near
            )));
        }

        let corridor = &self.corridor;
        positive("corridor.spacing", corridor.spacing)?;
        non_negative("corridor.lateral_spread", corridor.lateral_spread)?;
        positive("corridor.min_height", corridor.min_height)?;
        non_negative("corridor.height_range", corridor.height_range)?;
        positive("corridor.width", corridor.width)?;
        positive("corridor.depth", corridor.depth)?;

        positive("run.target_fps", self.run.target_fps)?;
        positive("run.max_frame_delta", self.run.max_frame_delta)?;
        non_negative("run.autopilot_lookahead", self.run.autopilot_lookahead)?;
        non_negative("run.autopilot_margin", self.run.autopilot_margin)?;
        Ok(())
    }
}
