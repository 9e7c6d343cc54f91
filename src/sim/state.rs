//! Simulation state and events
//!
//! Everything the driver mutates in a tick lives in one owned [`SimState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::FallingBody;
use super::grid::Grid;
use crate::Tuning;
use crate::consts::*;

/// Something the core reports back to the caller after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Score changed by `value` at `pos` (for score popups)
    ScoreAlert { pos: Vec2, value: i64 },
    /// A blob was erased
    Combo {
        pos: Vec2,
        cells: u32,
        bullet_cells: u32,
        bubble_cells: u32,
        bonus: u64,
    },
    /// A shot left the arena without touching the grid
    ShotLost { pos: Vec2 },
    /// An occupied grid cell struck the avatar
    AvatarHit,
    /// A falling bubble struck the avatar, which grew
    BubbleHit { pos: Vec2 },
    /// A falling bubble settled back into the grid
    BubbleLanded { row: usize, col: usize },
    /// The run moved to a new level
    LevelUp { level: u32, next_level_points: u64 },
}

/// The player's ship as the core sees it: a circle that can grow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    pub pos: Vec2,
    /// Current hit radius
    pub radius: f32,
    /// Radius restored at each level change
    pub base_radius: f32,
}

impl Default for Avatar {
    fn default() -> Self {
        Self {
            pos: Vec2::new(
                ARENA_WIDTH / 2.0 + BUBBLE_RADIUS,
                ARENA_HEIGHT - 2.0 * BUBBLE_DIAMETER,
            ),
            radius: BUBBLE_RADIUS,
            base_radius: BUBBLE_RADIUS,
        }
    }
}

impl Avatar {
    pub fn grow(&mut self, amount: f32) {
        self.radius += amount;
    }

    pub fn reset_hull(&mut self) {
        self.radius = self.base_radius;
    }
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub grid: Grid,
    /// Player shots in flight
    pub bullets: Vec<FallingBody>,
    /// Detached bubbles in free fall
    pub droppers: Vec<FallingBody>,
    pub avatar: Avatar,
    pub score: u64,
    /// Current level (1-based)
    pub level: u32,
    /// Score that ends the current level
    pub next_level_points: u64,
    /// Rows still to be sped out at the fast multiplier
    pub speed_rows: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl SimState {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            grid: Grid::new(tuning.base_velocity),
            bullets: Vec::new(),
            droppers: Vec::new(),
            avatar: Avatar::default(),
            score: 0,
            level: 1,
            next_level_points: tuning.first_level_points,
            speed_rows: tuning.fast_rows,
            time_ticks: 0,
            tuning,
        }
    }

    /// Points left before the next level
    pub fn points_to_next_level(&self) -> u64 {
        self.next_level_points.saturating_sub(self.score)
    }

    /// Add points, returning the signed change for alerts
    pub fn award(&mut self, points: u64) -> i64 {
        self.score = self.score.saturating_add(points);
        points as i64
    }

    /// Remove points without dropping below zero
    pub fn penalize(&mut self, points: u64) -> i64 {
        self.score = self.score.saturating_sub(points);
        -(points as i64)
    }

    /// Move to the next level: fresh faster grid, no bodies in flight
    pub fn advance_level(&mut self) {
        self.level += 1;
        self.next_level_points = self
            .tuning
            .next_threshold(self.next_level_points, self.level);
        self.bullets.clear();
        self.droppers.clear();
        self.avatar.reset_hull();
        self.speed_rows = self.tuning.fast_rows;
        self.grid = Grid::with_width(
            self.grid.width(),
            self.grid.velocity * self.tuning.level_velocity_growth,
        );
        log::info!(
            "Level {}: velocity {:.2}, next level at {}",
            self.level,
            self.grid.velocity,
            self.next_level_points
        );
    }
}
