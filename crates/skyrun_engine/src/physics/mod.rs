//! Physics module for kinematic bodies and bounding volumes
//!
//! There is no force integration here: bodies are either fixed or moved
//! directly by game logic, and overlap tests use axis-aligned boxes.

pub mod bounds;
pub mod world;

pub use bounds::Aabb;
pub use world::{BodyDesc, BodyHandle, BodyKind, KinematicWorld, PhysicsError, PhysicsWorld, RigidBody};
