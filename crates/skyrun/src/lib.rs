//! # Skyrun
//!
//! Corridor flight-avoidance game core: a kinematic starship flies toward -Z
//! through a row of fixed towers, a chase camera trails it, and the first
//! bounding-box overlap with a tower destroys the ship.
//!
//! The frame order is fixed: physics step, input sampling, ship motion,
//! collision check, then camera. See [`scene::CorridorScene::tick`].

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod actor;
pub mod autopilot;
pub mod camera_rig;
pub mod collision;
pub mod config;
pub mod controls;
pub mod obstacle;
pub mod placement;
pub mod scene;

pub use actor::Starship;
pub use camera_rig::CameraRig;
pub use collision::{check_collisions, first_collision};
pub use config::GameConfig;
pub use controls::{Controls, InputSource, InputVector};
pub use obstacle::Obstacle;
pub use placement::{CorridorLayout, ObstaclePlacement};
pub use scene::{CorridorScene, FrameReport, SceneError};
