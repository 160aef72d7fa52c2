//! Corridor scene and frame driver
//!
//! [`CorridorScene`] owns everything that lives in a run: the physics world,
//! the scene graph, the ship, the towers, the camera rig and the input
//! source. An outer loop calls [`CorridorScene::tick`] once per frame.

use crate::actor::Starship;
use crate::camera_rig::CameraRig;
use crate::collision::first_collision;
use crate::config::GameConfig;
use crate::controls::InputSource;
use crate::obstacle::Obstacle;
use crate::placement::CorridorLayout;
use skyrun_engine::config::ConfigError;
use skyrun_engine::foundation::math::Vec3;
use skyrun_engine::physics::{KinematicWorld, PhysicsWorld};
use skyrun_engine::render::PerspectiveCamera;
use skyrun_engine::scene::SceneGraph;
use thiserror::Error;

/// Scene construction errors
#[derive(Error, Debug)]
pub enum SceneError {
    /// The configuration failed validation
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Outcome of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Zero-based frame index
    pub frame: u64,
    /// The ship hit a tower during this frame
    pub collided: bool,
    /// The ship is destroyed (this frame or earlier)
    pub destroyed: bool,
    /// Ship position at the end of the frame
    pub position: Vec3,
}

/// One corridor run
pub struct CorridorScene {
    world: KinematicWorld,
    scene: SceneGraph,
    ship: Starship,
    obstacles: Vec<Obstacle>,
    rig: CameraRig,
    input: Box<dyn InputSource>,
    layout: CorridorLayout,
    frame: u64,
    torn_down: bool,
}

impl CorridorScene {
    /// Build a scene with the layout generated from the corridor settings
    pub fn new(config: &GameConfig, input: Box<dyn InputSource>) -> Result<Self, SceneError> {
        let layout = CorridorLayout::from_config(&config.corridor);
        Self::with_layout(config, layout, input)
    }

    /// Build a scene around an explicit layout
    pub fn with_layout(
        config: &GameConfig,
        layout: CorridorLayout,
        input: Box<dyn InputSource>,
    ) -> Result<Self, SceneError> {
        config.validate()?;

        let mut world = KinematicWorld::new();
        let mut scene = SceneGraph::new();

        let mut ship = Starship::new(&mut world, &config.ship);
        ship.attach_visual(&mut scene);

        let obstacles = layout
            .placements()
            .iter()
            .map(|placement| {
                let mut obstacle = Obstacle::from_placement(&mut world, placement);
                obstacle.attach_visual(&mut scene);
                obstacle
            })
            .collect::<Vec<_>>();

        let camera_config = &config.camera;
        let mut rig = CameraRig::new(camera_config.offset, camera_config.smooth_rate);
        if camera_config.enabled {
            let camera = PerspectiveCamera::new(camera_config.fov_degrees, 1.0, camera_config.near, camera_config.far);
            rig.attach(camera, Some(camera_config.offset), ship.pose());
        }

        log::debug!(
            "Corridor scene ready: {} towers, camera {}",
            obstacles.len(),
            if camera_config.enabled { "on" } else { "off" }
        );

        Ok(Self {
            world,
            scene,
            ship,
            obstacles,
            rig,
            input,
            layout,
            frame: 0,
            torn_down: false,
        })
    }

    /// Run one frame
    ///
    /// Physics step, input sampling, ship motion, collision check, then
    /// camera. The collision check sees the position the ship moved to
    /// during this frame.
    pub fn tick(&mut self, delta_time: f32) -> FrameReport {
        let frame = self.frame;
        self.frame += 1;

        self.world.step();

        self.input.observe(self.ship.pose());
        let input = self.input.sample();
        self.ship.update(delta_time, input, &mut self.world);

        let mut collided = false;
        if !self.ship.is_destroyed() {
            if let Some(index) = first_collision(&self.ship, &self.obstacles) {
                collided = true;
                log::info!(
                    "Starship hit tower {index} at {:?} on frame {frame}",
                    self.obstacles[index].position()
                );
                self.ship.destroy(&mut self.world, &mut self.scene);
            }
        }

        self.ship.sync_visual(&mut self.scene);
        self.rig.update(delta_time, self.ship.pose());

        FrameReport {
            frame,
            collided,
            destroyed: self.ship.is_destroyed(),
            position: self.ship.position(),
        }
    }

    /// Forward a viewport resize to the camera
    pub fn resize(&mut self, width: u32, height: u32) {
        self.rig.set_viewport(width, height);
    }

    /// Destroy the ship and every tower; idempotent
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        let crashed = self.ship.is_destroyed();
        self.ship.destroy(&mut self.world, &mut self.scene);
        for obstacle in &mut self.obstacles {
            obstacle.destroy(&mut self.world, &mut self.scene);
        }

        log::info!(
            "Corridor run ended after {} frames at z = {:.2} ({})",
            self.frame,
            self.ship.position().z,
            if crashed { "crashed" } else { "intact" }
        );
    }

    /// Whether the ship has flown past the last tower
    pub fn corridor_cleared(&self) -> bool {
        let ship_back = self.ship.bounds().max.z;
        self.layout.extent().map_or(true, |extent| ship_back < extent.min.z)
    }

    /// The ship
    pub const fn ship(&self) -> &Starship {
        &self.ship
    }

    /// Towers in placement order
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Camera rig
    pub const fn camera_rig(&self) -> &CameraRig {
        &self.rig
    }

    /// Physics world
    pub const fn world(&self) -> &KinematicWorld {
        &self.world
    }

    /// Scene graph
    pub const fn scene_graph(&self) -> &SceneGraph {
        &self.scene
    }

    /// Tower layout the scene was built from
    pub const fn layout(&self) -> &CorridorLayout {
        &self.layout
    }

    /// Frames run so far
    pub const fn frame_count(&self) -> u64 {
        self.frame
    }
}
