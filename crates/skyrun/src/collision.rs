//! Ship versus obstacle overlap test
//!
//! Broad boxes only: the ship's box is the world AABB of its rotated hull, so
//! near the corners it reports hits a mesh test would not.

use crate::actor::Starship;
use crate::obstacle::Obstacle;

/// Index of the first obstacle, in placement order, overlapping the ship
///
/// Destroyed ships and destroyed obstacles never collide.
pub fn first_collision(ship: &Starship, obstacles: &[Obstacle]) -> Option<usize> {
    if ship.is_destroyed() {
        return None;
    }
    let ship_box = ship.bounds();
    obstacles
        .iter()
        .position(|obstacle| !obstacle.is_destroyed() && ship_box.intersects(&obstacle.bounds()))
}

/// Whether the ship overlaps any obstacle
pub fn check_collisions(ship: &Starship, obstacles: &[Obstacle]) -> bool {
    first_collision(ship, obstacles).is_some()
}
