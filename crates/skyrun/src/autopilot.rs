//! Computer pilot for headless runs
//!
//! Steers sideways around the towers of a known layout. It never climbs and
//! never touches the throttle; the ship keeps its base speed.
//!
//! Only the nearest tower the hull has not fully passed is considered. Once
//! the tail clears it, the pilot moves on to the next one, so it never dodges
//! a far tower into a near one.

use crate::controls::{InputSource, InputVector};
use crate::placement::{CorridorLayout, ObstaclePlacement};
use skyrun_engine::foundation::math::{Pose, Vec3};
use skyrun_engine::physics::Aabb;

/// Strafe input per unit of distance from the corridor center
const RECENTER_GAIN: f32 = 0.5;

/// Lateral dodging input source
#[derive(Debug, Clone)]
pub struct Autopilot {
    obstacles: Vec<Aabb>,
    half_hull: Vec3,
    side_clearance: f32,
    lookahead: f32,
    margin: f32,
    ship: Pose,
}

impl Autopilot {
    /// Create a pilot for the given tower bounds
    ///
    /// `hull_size` is the ship's hull box, `lookahead` how far past the nose
    /// towers are considered, `margin` the clearance kept around a tower.
    pub fn new(obstacles: Vec<Aabb>, hull_size: Vec3, lookahead: f32, margin: f32) -> Self {
        let half_hull = hull_size * 0.5;
        // Widest the hull box gets on X at any yaw
        let yawed_half_width = half_hull.x.hypot(half_hull.z);
        Self {
            obstacles,
            half_hull,
            side_clearance: yawed_half_width + margin,
            lookahead,
            margin,
            ship: Pose::identity(),
        }
    }

    /// Create a pilot for every tower of a layout
    pub fn for_layout(layout: &CorridorLayout, hull_size: Vec3, lookahead: f32, margin: f32) -> Self {
        let bounds = layout.placements().iter().map(ObstaclePlacement::bounds).collect();
        Self::new(bounds, hull_size, lookahead, margin)
    }

    fn ship_bounds(&self) -> Aabb {
        Aabb::from_oriented_box(self.ship.position, self.half_hull, &self.ship.rotation)
    }

    /// Nearest tower the tail has not cleared, if it lies within the lookahead
    fn next_tower(&self) -> Option<&Aabb> {
        let hull = self.ship_bounds();
        self.obstacles
            .iter()
            .filter(|b| hull.max.z >= b.min.z - self.margin)
            .filter(|b| b.max.z >= hull.min.z - self.lookahead)
            .max_by(|a, b| a.max.z.total_cmp(&b.max.z))
    }

    /// Strafe input for the ship's current pose
    fn steer(&self) -> f32 {
        let x = self.ship.position.x;

        let Some(tower) = self.next_tower() else {
            return -x * RECENTER_GAIN;
        };

        let center = tower.center().x;
        let reach = tower.extents().x + self.side_clearance;
        if (x - center).abs() >= reach {
            // Clear of this tower: hold the lane until it is behind
            0.0
        } else if x > center {
            1.0
        } else if x < center {
            -1.0
        } else if center > 0.0 {
            -1.0
        } else {
            1.0
        }
    }
}

impl InputSource for Autopilot {
    fn observe(&mut self, ship: &Pose) {
        self.ship = *ship;
    }

    fn sample(&mut self) -> InputVector {
        InputVector::new(self.steer(), 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HULL: Vec3 = Vec3::new(1.0, 1.0, 3.0);

    fn tower(x: f32, z: f32) -> Aabb {
        Aabb::from_center_size(Vec3::new(x, 5.0, z), Vec3::new(3.0, 10.0, 3.0))
    }

    fn pilot_at(obstacles: Vec<Aabb>, ship: Vec3) -> Autopilot {
        let mut pilot = Autopilot::new(obstacles, HULL, 20.0, 1.0);
        pilot.observe(&Pose::from_position(ship));
        pilot
    }

    #[test]
    fn test_clear_corridor_centered_is_neutral() {
        let mut pilot = pilot_at(Vec::new(), Vec3::zeros());
        assert_eq!(pilot.sample(), InputVector::NEUTRAL);
    }

    #[test]
    fn test_dodges_away_from_tower_center() {
        let mut pilot = pilot_at(vec![tower(-0.5, -15.0)], Vec3::zeros());
        assert_eq!(pilot.sample().strafe, 1.0);

        let mut pilot = pilot_at(vec![tower(1.0, -15.0)], Vec3::zeros());
        assert_eq!(pilot.sample().strafe, -1.0);
    }

    #[test]
    fn test_dead_center_dodges_toward_corridor_middle() {
        let mut pilot = pilot_at(vec![tower(2.0, -15.0)], Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(pilot.sample().strafe, -1.0);
    }

    #[test]
    fn test_holds_lane_beside_tower() {
        let mut pilot = pilot_at(vec![tower(0.0, -15.0)], Vec3::new(5.0, 0.0, -10.0));
        assert_eq!(pilot.sample().strafe, 0.0);
    }

    #[test]
    fn test_far_tower_does_not_pull_into_near_one() {
        // The tower at -30 sits in the lane, the one at -15 beside it
        let towers = vec![tower(-0.49, -30.0), tower(4.24, -15.0)];
        let mut pilot = pilot_at(towers, Vec3::zeros());

        assert_eq!(pilot.sample().strafe, 0.0);
    }

    #[test]
    fn test_keeps_lane_until_tail_clears_tower() {
        let mut pilot = pilot_at(vec![tower(0.0, -30.0)], Vec3::new(4.2, 0.0, -31.6));
        // Nose is past the tower but the tail is still beside it
        assert_eq!(pilot.sample().strafe, 0.0);

        pilot.observe(&Pose::from_position(Vec3::new(4.2, 0.0, -34.5)));
        assert_eq!(pilot.sample().strafe, -1.0);
    }

    #[test]
    fn test_ignores_towers_behind_and_beyond_lookahead() {
        let towers = vec![tower(3.0, 10.0), tower(3.0, -60.0)];
        let mut pilot = pilot_at(towers, Vec3::new(3.0, 0.0, 0.0));
        // Nothing in range: drift back toward x = 0
        assert_eq!(pilot.sample().strafe, -1.0);

        pilot.observe(&Pose::from_position(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(pilot.sample().strafe, -0.5);
    }

    #[test]
    fn test_never_climbs_or_throttles() {
        let mut pilot = pilot_at(vec![tower(0.0, -15.0)], Vec3::zeros());
        let input = pilot.sample();
        assert_eq!((input.lift, input.throttle), (0.0, 0.0));
    }
}
