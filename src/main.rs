//! Ring Leader headless runner
//!
//! Plays a seeded run with a simple autopilot at a fixed frame rate and
//! prints a JSON summary. Usage: `ring-leader [seed] [frames] [tuning.json]`

use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use ring_leader::Tuning;
use ring_leader::consts::*;
use ring_leader::sim::{Color, GameEvent, Grid, PaletteSpawner, Shot, SimState, TickInput, tick};

/// Frame time fed to the fixed-step loop
const FRAME_DT: f32 = 1.0 / 60.0;
/// Frames between autopilot shots
const FIRE_INTERVAL: u32 = 20;

/// End-of-run report
#[derive(Debug, Default, Serialize)]
struct Summary {
    seed: u64,
    frames: u32,
    ticks: u64,
    level: u32,
    score: u64,
    shots_fired: u32,
    shots_lost: u32,
    combos: u32,
    scoring_combos: u32,
    bubbles_caught: u32,
    bubbles_landed: u32,
    game_over: bool,
}

/// Game instance holding all state
struct Game {
    state: SimState,
    spawner: PaletteSpawner,
    autopilot: Pcg32,
    accumulator: f32,
    input: TickInput,
    summary: Summary,
}

impl Game {
    fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: SimState::with_tuning(seed, tuning),
            spawner: PaletteSpawner::new(seed),
            autopilot: Pcg32::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15),
            accumulator: 0.0,
            input: TickInput::default(),
            summary: Summary {
                seed,
                level: 1,
                ..Default::default()
            },
        }
    }

    /// Run simulation ticks for one frame. Returns false once the grid
    /// reaches the avatar.
    fn update(&mut self, dt: f32) -> bool {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.clone();
            let events = tick(&mut self.state, &mut self.spawner, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.fire = None;
            self.input.speed_row = false;

            if !self.record(&events) {
                return false;
            }
        }
        true
    }

    fn record(&mut self, events: &[GameEvent]) -> bool {
        for event in events {
            match event {
                GameEvent::AvatarHit => {
                    log::info!("Avatar struck by the grid at tick {}", self.state.time_ticks);
                    self.summary.game_over = true;
                    return false;
                }
                GameEvent::ShotLost { .. } => self.summary.shots_lost += 1,
                GameEvent::Combo { bonus, .. } => {
                    self.summary.combos += 1;
                    if *bonus > 0 {
                        self.summary.scoring_combos += 1;
                    }
                }
                GameEvent::BubbleHit { .. } => self.summary.bubbles_caught += 1,
                GameEvent::BubbleLanded { .. } => self.summary.bubbles_landed += 1,
                GameEvent::LevelUp { level, next_level_points } => {
                    log::info!("Reached level {} (next at {})", level, next_level_points);
                }
                GameEvent::ScoreAlert { .. } => {}
            }
        }
        true
    }

    /// Aim at the lowest bubble of a random column, matching its colour
    fn autopilot(&mut self) {
        let grid = &self.state.grid;
        if grid.is_empty() {
            return;
        }
        let col = self.autopilot.random_range(0..grid.width());
        let Some((row, color)) = lowest_in_column(grid, col) else {
            return;
        };
        self.input.fire = Some(Shot {
            target: grid.cell_center(row, col),
            color,
        });
        self.summary.shots_fired += 1;
    }

    fn finish(mut self, frames: u32) -> Summary {
        self.summary.frames = frames;
        self.summary.ticks = self.state.time_ticks;
        self.summary.level = self.state.level;
        self.summary.score = self.state.score;
        self.summary
    }
}

fn lowest_in_column(grid: &Grid, col: usize) -> Option<(usize, Color)> {
    (0..grid.len()).find_map(|row| grid.cell_at(row, col).color.map(|color| (row, color)))
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(42);
    let frames = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(60 * 120);
    let tuning = args
        .get(3)
        .map(|path| Tuning::load(Path::new(path)))
        .unwrap_or_default();

    log::info!("Ring Leader (headless) starting with seed {}", seed);

    let mut game = Game::new(seed, tuning);
    let mut played = 0;
    for frame in 0..frames {
        if frame % FIRE_INTERVAL == 0 {
            game.autopilot();
        }
        played = frame + 1;
        if !game.update(FRAME_DT) {
            break;
        }
    }

    let summary = game.finish(played);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Could not serialize summary: {}", err),
    }
}
