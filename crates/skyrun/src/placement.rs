//! Seeded obstacle layout
//!
//! Towers are placed one per slot along -Z, scattered on X and given a random
//! height. The layout depends only on the corridor settings and the seed, so
//! a regression run can pin the exact corridor it flies through.

use crate::config::CorridorConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use skyrun_engine::foundation::math::Vec3;
use skyrun_engine::physics::Aabb;

/// One tower slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstaclePlacement {
    /// Center of the tower (its base rests on y = 0)
    pub position: Vec3,
    /// Tower size (width, height, depth)
    pub size: Vec3,
}

impl ObstaclePlacement {
    /// Bounds of the tower at this slot
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.position, self.size)
    }
}

/// Ordered tower slots, nearest first
#[derive(Debug, Clone, PartialEq)]
pub struct CorridorLayout {
    seed: u64,
    placements: Vec<ObstaclePlacement>,
}

impl CorridorLayout {
    /// Generate a layout from the corridor settings and a seed
    pub fn generate(config: &CorridorConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let placements = (1..=config.obstacle_count)
            .map(|slot| {
                #[allow(clippy::cast_precision_loss)]
                let z = -(slot as f32) * config.spacing;
                let x = (rng.gen::<f32>() - 0.5) * config.lateral_spread;
                let height = config.min_height + rng.gen::<f32>() * config.height_range;
                ObstaclePlacement {
                    position: Vec3::new(x, height * 0.5, z),
                    size: Vec3::new(config.width, height, config.depth),
                }
            })
            .collect();

        log::debug!("Generated corridor of {} towers (seed {seed})", config.obstacle_count);
        Self { seed, placements }
    }

    /// Generate a layout using the seed stored in the settings
    pub fn from_config(config: &CorridorConfig) -> Self {
        Self::generate(config, config.seed)
    }

    /// Hand-placed layout; its seed reads as 0
    pub fn from_placements(placements: Vec<ObstaclePlacement>) -> Self {
        Self { seed: 0, placements }
    }

    /// Seed the layout was generated from
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Tower slots in placement order
    pub fn placements(&self) -> &[ObstaclePlacement] {
        &self.placements
    }

    /// Number of towers
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether the layout has no towers
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Box enclosing every tower, `None` for an empty layout
    pub fn extent(&self) -> Option<Aabb> {
        self.placements
            .iter()
            .map(ObstaclePlacement::bounds)
            .reduce(|acc, bounds| acc.union(&bounds))
    }
}
