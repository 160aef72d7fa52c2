//! Kinematic physics world
//!
//! The world owns every body; game objects keep a [`BodyHandle`] and go
//! through the world to read or write translation. Handles are slot-map keys,
//! so a handle that outlived its body is detected instead of aliasing a new
//! one.

use crate::foundation::math::Vec3;
use slotmap::{new_key_type, SlotMap};
use thiserror::Error;

new_key_type! {
    /// Non-owning key of a body stored in a physics world
    pub struct BodyHandle;
}

/// How a body is moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Immovable body (static obstacles)
    Fixed,
    /// Body whose translation is set directly by game logic
    KinematicPositionBased,
}

/// Description of a body to create
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    /// Body kind
    pub kind: BodyKind,
    /// Initial translation
    pub translation: Vec3,
}

impl BodyDesc {
    /// Describe a fixed body at the origin
    pub fn fixed() -> Self {
        Self {
            kind: BodyKind::Fixed,
            translation: Vec3::zeros(),
        }
    }

    /// Describe a kinematic, position-based body at the origin
    pub fn kinematic_position_based() -> Self {
        Self {
            kind: BodyKind::KinematicPositionBased,
            translation: Vec3::zeros(),
        }
    }

    /// Builder pattern: Set initial translation
    pub const fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }
}

/// Body record stored by the world
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    kind: BodyKind,
    translation: Vec3,
    stepped_translation: Vec3,
    linear_velocity: Vec3,
    sleeping: bool,
    wake_requested: bool,
}

impl RigidBody {
    fn from_desc(desc: &BodyDesc) -> Self {
        Self {
            kind: desc.kind,
            translation: desc.translation,
            stepped_translation: desc.translation,
            linear_velocity: Vec3::zeros(),
            sleeping: false,
            wake_requested: false,
        }
    }

    /// Body kind
    pub const fn kind(&self) -> BodyKind {
        self.kind
    }

    /// Current translation
    pub const fn translation(&self) -> Vec3 {
        self.translation
    }

    /// Linear velocity derived at the last step (zero for fixed bodies)
    pub const fn linear_velocity(&self) -> Vec3 {
        self.linear_velocity
    }

    /// Whether the body went to sleep at the last step
    pub const fn is_sleeping(&self) -> bool {
        self.sleeping
    }
}

/// Physics world errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicsError {
    /// The handle does not refer to a live body
    #[error("stale body handle: {0:?}")]
    StaleHandle(BodyHandle),
}

/// Operations the game core needs from a physics world
pub trait PhysicsWorld {
    /// Insert a body and return its handle
    fn create_body(&mut self, desc: BodyDesc) -> BodyHandle;

    /// Teleport a body; `wake` wakes a sleeping body
    fn set_translation(&mut self, handle: BodyHandle, translation: Vec3, wake: bool) -> Result<(), PhysicsError>;

    /// Read a body's translation
    fn translation(&self, handle: BodyHandle) -> Result<Vec3, PhysicsError>;

    /// Remove a body, invalidating its handle
    fn remove_body(&mut self, handle: BodyHandle) -> Result<(), PhysicsError>;

    /// Advance the world by one timestep
    fn step(&mut self);

    /// Number of live bodies
    fn body_count(&self) -> usize;
}

/// Slot-map backed world with fixed and kinematic bodies only
#[derive(Debug)]
pub struct KinematicWorld {
    bodies: SlotMap<BodyHandle, RigidBody>,
    timestep: f32,
    step_count: u64,
}

impl Default for KinematicWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl KinematicWorld {
    /// Default integration timestep in seconds
    pub const DEFAULT_TIMESTEP: f32 = 1.0 / 60.0;

    /// Create an empty world
    ///
    /// There is no gravity: neither body kind responds to forces.
    pub fn new() -> Self {
        Self {
            bodies: SlotMap::with_key(),
            timestep: Self::DEFAULT_TIMESTEP,
            step_count: 0,
        }
    }

    /// Builder pattern: Set the timestep used to derive kinematic velocities
    pub fn with_timestep(mut self, timestep: f32) -> Self {
        if timestep > 0.0 && timestep.is_finite() {
            self.timestep = timestep;
        } else {
            log::warn!("Ignoring invalid physics timestep {timestep}");
        }
        self
    }

    /// Number of steps taken so far
    pub const fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Look up a body record
    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    /// Whether the handle refers to a live body
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains_key(handle)
    }
}

impl PhysicsWorld for KinematicWorld {
    fn create_body(&mut self, desc: BodyDesc) -> BodyHandle {
        let handle = self.bodies.insert(RigidBody::from_desc(&desc));
        log::debug!("Created {:?} body {:?} at {:?}", desc.kind, handle, desc.translation);
        handle
    }

    fn set_translation(&mut self, handle: BodyHandle, translation: Vec3, wake: bool) -> Result<(), PhysicsError> {
        let body = self.bodies.get_mut(handle).ok_or(PhysicsError::StaleHandle(handle))?;
        body.translation = translation;
        if wake {
            body.sleeping = false;
            body.wake_requested = true;
        }
        Ok(())
    }

    fn translation(&self, handle: BodyHandle) -> Result<Vec3, PhysicsError> {
        self.bodies
            .get(handle)
            .map(RigidBody::translation)
            .ok_or(PhysicsError::StaleHandle(handle))
    }

    fn remove_body(&mut self, handle: BodyHandle) -> Result<(), PhysicsError> {
        let body = self.bodies.remove(handle).ok_or(PhysicsError::StaleHandle(handle))?;
        log::debug!("Removed {:?} body {:?}", body.kind, handle);
        Ok(())
    }

    fn step(&mut self) {
        let inv_dt = 1.0 / self.timestep;
        for body in self.bodies.values_mut() {
            if body.kind == BodyKind::KinematicPositionBased {
                body.linear_velocity = (body.translation - body.stepped_translation) * inv_dt;
                body.stepped_translation = body.translation;
                // A wake request keeps an idle body awake for one step
                body.sleeping = !body.wake_requested && body.linear_velocity == Vec3::zeros();
                body.wake_requested = false;
            }
        }
        self.step_count += 1;
        log::trace!("Physics step {} ({} bodies)", self.step_count, self.bodies.len());
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}
