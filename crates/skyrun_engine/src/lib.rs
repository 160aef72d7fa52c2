//! # Skyrun Engine
//!
//! Small engine layer underneath the skyrun corridor game.
//!
//! ## Features
//!
//! - **Kinematic Physics World**: Slot-map body table with fixed and kinematic bodies
//! - **Bounding Volumes**: Axis-aligned boxes, including bounds of rotated boxes
//! - **Scene Graph**: Container of visual nodes with world-space bounds
//! - **Camera**: Perspective camera with explicit projection recompute
//! - **Input**: Level-state key tracking
//! - **Configuration**: TOML/RON config files through a single trait
//!
//! ## Quick Start
//!
//! ```rust
//! use skyrun_engine::prelude::*;
//!
//! let mut world = KinematicWorld::new();
//! let body = world.create_body(BodyDesc::kinematic_position_based());
//! world.set_translation(body, Vec3::new(0.0, 1.0, -2.0), true).unwrap();
//! world.step();
//! assert_eq!(world.translation(body).unwrap(), Vec3::new(0.0, 1.0, -2.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        foundation::{
            math::{Mat4, Pose, Quat, Vec3},
            time::Timer,
        },
        input::{KeyCode, KeyState},
        physics::{Aabb, BodyDesc, BodyHandle, BodyKind, KinematicWorld, PhysicsError, PhysicsWorld},
        render::PerspectiveCamera,
        scene::{NodeId, SceneGraph, VisualNode},
    };
}
