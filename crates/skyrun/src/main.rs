//! Headless corridor runner
//!
//! Flies the ship through the configured corridor under autopilot in real
//! time and logs how the run ended.
//!
//! Usage: `skyrun [config.toml|config.ron]`

use skyrun::autopilot::Autopilot;
use skyrun::{CorridorLayout, CorridorScene, FrameReport, GameConfig};
use skyrun_engine::config::Config;
use skyrun_engine::foundation::logging;
use skyrun_engine::foundation::time::Timer;
use std::time::{Duration, Instant};

/// How a run finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Crashed,
    Cleared,
    FrameLimit,
}

struct HeadlessRun {
    scene: CorridorScene,
    timer: Timer,
    frame_budget: Duration,
    max_frames: u64,
    max_frame_delta: f32,
}

impl HeadlessRun {
    fn new(config: &GameConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let layout = CorridorLayout::from_config(&config.corridor);
        let pilot = Autopilot::for_layout(
            &layout,
            config.ship.hull_size,
            config.run.autopilot_lookahead,
            config.run.autopilot_margin,
        );
        let mut scene = CorridorScene::with_layout(config, layout, Box::new(pilot))?;
        scene.resize(1280, 720);

        let frame_budget =
            Duration::try_from_secs_f32(1.0 / config.run.target_fps).unwrap_or_else(|_| Duration::from_millis(16));

        Ok(Self {
            scene,
            timer: Timer::new(),
            frame_budget,
            max_frames: config.run.max_frames,
            max_frame_delta: config.run.max_frame_delta,
        })
    }

    fn run(&mut self) -> Outcome {
        log::info!(
            "Entering main loop ({} towers, seed {})",
            self.scene.obstacles().len(),
            self.scene.layout().seed()
        );

        let outcome = loop {
            let frame_start = Instant::now();
            self.timer.update();

            let report = self.scene.tick(self.timer.clamped_delta(self.max_frame_delta));
            if let Some(outcome) = self.check_finished(&report) {
                break outcome;
            }

            if let Some(remaining) = self.frame_budget.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(remaining);
            }
        };

        self.scene.teardown();
        log::info!(
            "Run finished: {outcome:?} after {:.2}s ({:.1} fps average)",
            self.timer.total_time(),
            self.timer.average_fps()
        );
        outcome
    }

    fn check_finished(&self, report: &FrameReport) -> Option<Outcome> {
        if report.destroyed {
            return Some(Outcome::Crashed);
        }
        if self.scene.corridor_cleared() {
            return Some(Outcome::Cleared);
        }
        if self.max_frames > 0 && report.frame + 1 >= self.max_frames {
            return Some(Outcome::FrameLimit);
        }
        if report.frame % 60 == 0 {
            log::debug!("Frame {}: ship at {:?}", report.frame, report.position);
        }
        None
    }
}

fn load_config() -> Result<GameConfig, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading configuration from {path}");
            Ok(GameConfig::load_from_file(&path)?)
        }
        None => {
            log::info!("No configuration file given, using defaults");
            Ok(GameConfig::default())
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    log::info!("Starting skyrun headless runner");

    let config = load_config()?;
    let mut run = HeadlessRun::new(&config)?;

    match run.run() {
        Outcome::Crashed => log::warn!("Starship was destroyed"),
        Outcome::Cleared => log::info!("Corridor cleared"),
        Outcome::FrameLimit => log::info!("Frame limit reached"),
    }
    Ok(())
}
