//! Starship motion controller
//!
//! The ship is a kinematic body: each frame the input is integrated straight
//! into a new translation, which is written to the physics world and mirrored
//! into the ship's pose. Orientation follows the direction of travel through
//! an exponential slerp, so it settles at the same rate whatever the frame
//! delta.

use crate::config::ShipConfig;
use crate::controls::InputVector;
use skyrun_engine::foundation::math::{look_rotation, utils, Pose, Vec3, WORLD_UP};
use skyrun_engine::physics::{Aabb, BodyDesc, BodyHandle, PhysicsWorld};
use skyrun_engine::scene::{NodeId, SceneGraph, VisualNode};

/// Throttle at +1 adds half the base speed, at -1 removes half
const THROTTLE_GAIN: f32 = 0.5;

const HULL_COLOR: [f32; 3] = [0.0, 1.0, 0.0];

/// The player's craft
#[derive(Debug)]
pub struct Starship {
    pose: Pose,
    body: Option<BodyHandle>,
    node: Option<NodeId>,
    base_speed: f32,
    lateral_speed: f32,
    vertical_speed: f32,
    rotation_smooth_rate: f32,
    min_move_epsilon: f32,
    hull_size: Vec3,
    previous_position: Vec3,
    destroyed: bool,
}

impl Starship {
    /// Create a ship at the origin bound to a fresh kinematic body
    pub fn new(world: &mut dyn PhysicsWorld, config: &ShipConfig) -> Self {
        let body = world.create_body(BodyDesc::kinematic_position_based());
        // Start from the body so pose and physics agree from frame zero
        let start = world.translation(body).unwrap_or_else(|_| Vec3::zeros());

        log::debug!("Starship spawned at {start:?} (base speed {})", config.base_speed);

        Self {
            pose: Pose::from_position(start),
            body: Some(body),
            node: None,
            base_speed: config.base_speed,
            lateral_speed: config.lateral_speed,
            vertical_speed: config.vertical_speed,
            rotation_smooth_rate: config.rotation_smooth_rate,
            min_move_epsilon: config.min_move_epsilon,
            hull_size: config.hull_size,
            previous_position: start,
            destroyed: false,
        }
    }

    /// Attach the hull's visual node to a scene graph
    ///
    /// Re-attaching replaces the previous node. Ignored once destroyed.
    pub fn attach_visual(&mut self, scene: &mut SceneGraph) -> Option<NodeId> {
        if self.destroyed {
            return None;
        }
        if let Some(old) = self.node.take() {
            scene.remove(old);
        }
        let node = VisualNode::new_box("Starship", self.hull_size, HULL_COLOR).with_pose(self.pose);
        let id = scene.add(node);
        self.node = Some(id);
        Some(id)
    }

    /// Push the current pose to the visual node, if attached
    pub fn sync_visual(&self, scene: &mut SceneGraph) {
        if let Some(node) = self.node {
            scene.set_pose(node, self.pose);
        }
    }

    /// Advance the ship by one frame
    ///
    /// Does nothing once the ship is destroyed. A negative or non-finite
    /// `delta_time` is treated as zero.
    pub fn update(&mut self, delta_time: f32, input: InputVector, world: &mut dyn PhysicsWorld) {
        if self.destroyed {
            return;
        }
        let Some(body) = self.body else {
            return;
        };
        let dt = if delta_time.is_finite() { delta_time.max(0.0) } else { 0.0 };

        let current = match world.translation(body) {
            Ok(translation) => translation,
            Err(err) => {
                log::warn!("Starship body unavailable, skipping update: {err}");
                return;
            }
        };

        let throttle_factor = 1.0 + input.throttle * THROTTLE_GAIN;
        let forward_delta = self.base_speed * throttle_factor * dt;
        let next = Vec3::new(
            current.x + input.strafe * self.lateral_speed * dt,
            (current.y + input.lift * self.vertical_speed * dt).max(0.0),
            current.z - forward_delta,
        );

        if let Err(err) = world.set_translation(body, next, true) {
            log::warn!("Failed to move starship body: {err}");
            return;
        }
        self.pose.position = next;

        self.face_direction_of_travel(next - self.previous_position, dt);
        self.previous_position = next;

        log::trace!("Starship at {:?}", self.pose.position);
    }

    fn face_direction_of_travel(&mut self, movement: Vec3, dt: f32) {
        if movement.magnitude_squared() <= self.min_move_epsilon {
            return;
        }
        let Some(target) = look_rotation(movement, WORLD_UP) else {
            return;
        };

        let alpha = utils::smoothing_factor(self.rotation_smooth_rate, dt);
        if alpha <= 0.0 {
            return;
        }
        // try_slerp gives up on nearly equal rotations; the target is then close enough
        let mut rotation = self.pose.rotation.try_slerp(&target, alpha, 1.0e-6).unwrap_or(target);
        rotation.renormalize();
        self.pose.rotation = rotation;
    }

    /// Release the body and detach the visual node
    ///
    /// Idempotent. A body the world no longer knows about is logged and
    /// otherwise ignored.
    pub fn destroy(&mut self, world: &mut dyn PhysicsWorld, scene: &mut SceneGraph) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;

        if let Some(body) = self.body.take() {
            if let Err(err) = world.remove_body(body) {
                log::warn!("remove_body failed for starship: {err}");
            }
        }
        if let Some(node) = self.node.take() {
            scene.remove(node);
        }
        log::info!("Starship destroyed at {:?}", self.pose.position);
    }

    /// Whether the ship has been destroyed
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Current pose
    pub const fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Current position
    pub const fn position(&self) -> Vec3 {
        self.pose.position
    }

    /// Physics body binding, `None` after destruction
    pub const fn body(&self) -> Option<BodyHandle> {
        self.body
    }

    /// Visual node, `None` when detached
    pub const fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// World-space AABB of the hull under the current pose
    pub fn bounds(&self) -> Aabb {
        Aabb::from_oriented_box(self.pose.position, self.hull_size * 0.5, &self.pose.rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use skyrun_engine::foundation::math::WORLD_FORWARD;
    use skyrun_engine::physics::{KinematicWorld, PhysicsError};

    fn spawn() -> (KinematicWorld, SceneGraph, Starship) {
        let mut world = KinematicWorld::new();
        let mut scene = SceneGraph::new();
        let mut ship = Starship::new(&mut world, &ShipConfig::default());
        ship.attach_visual(&mut scene);
        (world, scene, ship)
    }

    fn assert_unit(ship: &Starship) {
        assert_relative_eq!(ship.pose().rotation.quaternion().norm(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_zero_input_moves_forward_only() {
        let (mut world, _scene, mut ship) = spawn();

        for dt in [0.016, 0.1, 0.5] {
            let before = ship.position();
            ship.update(dt, InputVector::NEUTRAL, &mut world);
            let after = ship.position();

            assert_relative_eq!(after.z, before.z - 10.0 * dt, epsilon = 1e-4);
            assert_eq!(after.x, before.x);
            assert_eq!(after.y, before.y);
        }
    }

    #[test]
    fn test_update_writes_body_translation() {
        let (mut world, _scene, mut ship) = spawn();
        ship.update(0.1, InputVector::new(1.0, 1.0, 1.0), &mut world);

        let body = ship.body().unwrap();
        assert_eq!(world.translation(body), Ok(ship.position()));
        assert_relative_eq!(ship.position(), Vec3::new(0.6, 0.4, -1.5), epsilon = 1e-5);
    }

    #[test]
    fn test_throttle_scales_forward_speed() {
        let (mut world, _scene, mut ship) = spawn();
        ship.update(1.0, InputVector::new(0.0, 0.0, -1.0), &mut world);
        assert_relative_eq!(ship.position().z, -5.0, epsilon = 1e-5);

        ship.update(1.0, InputVector::new(0.0, 0.0, 1.0), &mut world);
        assert_relative_eq!(ship.position().z, -20.0, epsilon = 1e-5);
    }

    #[test]
    fn test_height_never_negative() {
        let (mut world, _scene, mut ship) = spawn();
        let pattern = [-1.0, -1.0, 1.0, -1.0, 0.5, -1.0, -0.25, 1.0];

        for (i, lift) in pattern.iter().cycle().take(64).enumerate() {
            let dt = 0.05 + (i % 4) as f32 * 0.1;
            ship.update(dt, InputVector::new(0.0, *lift, 0.0), &mut world);
            assert!(ship.position().y >= 0.0, "y went negative: {}", ship.position().y);
        }
    }

    #[test]
    fn test_orientation_stays_unit_and_follows_strafe() {
        let (mut world, _scene, mut ship) = spawn();

        for _ in 0..200 {
            ship.update(1.0 / 60.0, InputVector::new(1.0, 0.0, 0.0), &mut world);
            assert_unit(&ship);
        }

        // Steady state heading matches the velocity direction (6 right, 10 forward)
        let expected = Vec3::new(6.0, 0.0, -10.0).normalize();
        assert_relative_eq!(ship.pose().forward(), expected, epsilon = 1e-3);
    }

    #[test]
    fn test_orientation_blend_uses_exponential_factor() {
        let (mut world, _scene, mut ship) = spawn();
        let dt = 0.1;
        ship.update(dt, InputVector::new(1.0, 0.0, 0.0), &mut world);

        let target = look_rotation(Vec3::new(0.6, 0.0, -1.0), WORLD_UP).unwrap();
        let alpha = 1.0 - (-8.0f32 * dt).exp();
        let expected = Pose::identity().rotation.slerp(&target, alpha);
        assert_relative_eq!(ship.pose().rotation, expected, epsilon = 1e-5);
    }

    #[test]
    fn test_zero_delta_leaves_pose_unchanged() {
        let (mut world, _scene, mut ship) = spawn();
        ship.update(0.0, InputVector::new(1.0, 1.0, 1.0), &mut world);
        ship.update(-0.5, InputVector::new(1.0, 1.0, 1.0), &mut world);
        ship.update(f32::NAN, InputVector::new(1.0, 1.0, 1.0), &mut world);

        assert_eq!(ship.position(), Vec3::zeros());
        assert_relative_eq!(ship.pose().forward(), WORLD_FORWARD);
    }

    #[test]
    fn test_stationary_ship_keeps_orientation() {
        let mut world = KinematicWorld::new();
        let config = ShipConfig {
            base_speed: 0.0,
            ..ShipConfig::default()
        };
        let mut ship = Starship::new(&mut world, &config);

        ship.update(0.1, InputVector::new(1.0, 0.0, 0.0), &mut world);
        let turned = ship.pose().rotation;

        // No displacement: heading must not snap anywhere
        ship.update(0.1, InputVector::NEUTRAL, &mut world);
        assert_eq!(ship.pose().rotation, turned);
    }

    #[test]
    fn test_pure_vertical_motion_keeps_orientation() {
        let mut world = KinematicWorld::new();
        let config = ShipConfig {
            base_speed: 0.0,
            ..ShipConfig::default()
        };
        let mut ship = Starship::new(&mut world, &config);

        ship.update(0.1, InputVector::new(0.0, 1.0, 0.0), &mut world);
        assert_relative_eq!(ship.position().y, 0.4, epsilon = 1e-6);
        assert_unit(&ship);
        assert_relative_eq!(ship.pose().forward(), WORLD_FORWARD);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let (mut world, mut scene, mut ship) = spawn();
        assert_eq!(world.body_count(), 1);
        assert_eq!(scene.len(), 1);

        ship.destroy(&mut world, &mut scene);
        let once = (ship.position(), ship.pose().rotation, ship.body(), ship.node());
        ship.destroy(&mut world, &mut scene);
        let twice = (ship.position(), ship.pose().rotation, ship.body(), ship.node());

        assert_eq!(once, twice);
        assert!(ship.is_destroyed());
        assert_eq!(world.body_count(), 0);
        assert!(scene.is_empty());
    }

    #[test]
    fn test_destroy_absorbs_stale_handle() {
        let (mut world, mut scene, mut ship) = spawn();
        let body = ship.body().unwrap();
        world.remove_body(body).unwrap();

        ship.destroy(&mut world, &mut scene);

        assert!(ship.is_destroyed());
        assert!(ship.body().is_none());
        assert_eq!(world.remove_body(body), Err(PhysicsError::StaleHandle(body)));
    }

    #[test]
    fn test_updates_after_destroy_are_ignored() {
        let (mut world, mut scene, mut ship) = spawn();
        ship.update(0.1, InputVector::new(1.0, 1.0, 0.0), &mut world);
        ship.destroy(&mut world, &mut scene);
        let pose = *ship.pose();

        for _ in 0..10 {
            ship.update(0.1, InputVector::new(-1.0, 1.0, 1.0), &mut world);
        }

        assert_eq!(*ship.pose(), pose);
        assert!(ship.body().is_none());
        assert!(ship.attach_visual(&mut scene).is_none());
    }

    #[test]
    fn test_externally_removed_body_skips_update() {
        let (mut world, _scene, mut ship) = spawn();
        world.remove_body(ship.body().unwrap()).unwrap();

        ship.update(0.1, InputVector::NEUTRAL, &mut world);

        assert_eq!(ship.position(), Vec3::zeros());
        assert!(!ship.is_destroyed());
    }

    #[test]
    fn test_bounds_follow_pose() {
        let (mut world, mut scene, mut ship) = spawn();
        ship.update(0.2, InputVector::NEUTRAL, &mut world);
        ship.sync_visual(&mut scene);

        let bounds = ship.bounds();
        assert_relative_eq!(bounds.min, Vec3::new(-0.5, -0.5, -3.5), epsilon = 1e-5);
        assert_relative_eq!(bounds.max, Vec3::new(0.5, 0.5, -0.5), epsilon = 1e-5);
        assert_eq!(scene.world_bounds(ship.node().unwrap()), Some(bounds));
    }
}
