//! Straight-run detection and connected-blob erasing
//!
//! A run of `MATCH_LENGTH` same-coloured cells along a row or column seeds
//! an erase of the whole 4-connected blob of that colour. Each erased blob
//! is reported as a [`ComboResult`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::{Color, Grid};
use crate::consts::MATCH_LENGTH;

/// Outcome of erasing one blob
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComboResult {
    /// Total cells erased
    pub cell_count: u32,
    /// Erased cells created by player shots
    pub bullet_cell_count: u32,
    /// Erased cells created by row spawning
    pub bubble_cell_count: u32,
    /// Screen position of the seed cell
    pub anchor: Vec2,
}

impl ComboResult {
    /// A combo only scores when it mixes shot cells into grid cells
    pub fn scores(&self) -> bool {
        self.bullet_cell_count > 0 && self.bubble_cell_count > 0
    }

    /// Points awarded: `2^bubble_cells`, clamped so the score never passes
    /// the next level threshold
    pub fn bonus(&self, score: u64, next_level_points: u64) -> u64 {
        if !self.scores() {
            return 0;
        }
        let bonus = 1u64
            .checked_shl(self.bubble_cell_count)
            .unwrap_or(u64::MAX);
        bonus.min(next_level_points.saturating_sub(score))
    }
}

/// Start cell of every qualifying run: rows left to right, then columns
/// top to bottom
pub fn find_seeds(grid: &Grid) -> Vec<(usize, usize)> {
    let mut seeds = Vec::new();

    for row in 0..grid.len() {
        scan_line(
            grid,
            (0..grid.width()).map(|col| (row, col)),
            &mut seeds,
        );
    }
    for col in 0..grid.width() {
        scan_line(
            grid,
            (0..grid.len()).rev().map(|row| (row, col)),
            &mut seeds,
        );
    }

    seeds
}

/// Record the first cell of each run of `MATCH_LENGTH` or more along a line
fn scan_line(
    grid: &Grid,
    line: impl Iterator<Item = (usize, usize)>,
    seeds: &mut Vec<(usize, usize)>,
) {
    let mut run_start = (0, 0);
    let mut run_color: Option<Color> = None;
    let mut run_len = 0;

    for (row, col) in line {
        let color = grid.cell_at(row, col).color;
        if color.is_some() && color == run_color {
            run_len += 1;
        } else {
            run_start = (row, col);
            run_color = color;
            run_len = 1;
        }
        // Seed exactly once per run, when it first reaches the threshold
        if run_color.is_some() && run_len == MATCH_LENGTH {
            seeds.push(run_start);
        }
    }
}

/// Erase the 4-connected blob sharing the seed's colour
///
/// Returns `None` if the seed was already erased by an earlier blob.
pub fn flood_erase(grid: &mut Grid, seed: (usize, usize)) -> Option<ComboResult> {
    let color = grid.cell_at(seed.0, seed.1).color?;
    let mut combo = ComboResult {
        cell_count: 0,
        bullet_cell_count: 0,
        bubble_cell_count: 0,
        anchor: grid.cell_center(seed.0, seed.1),
    };

    let mut stack = vec![seed];
    while let Some((row, col)) = stack.pop() {
        let cell = grid.cell_at_mut(row, col);
        // Pushed more than once before being erased
        if cell.color != Some(color) {
            continue;
        }
        if cell.from_projectile {
            combo.bullet_cell_count += 1;
        } else {
            combo.bubble_cell_count += 1;
        }
        combo.cell_count += 1;
        cell.clear();

        stack.extend(
            grid.neighbors4(row, col)
                .filter(|&(r, c)| grid.cell_at(r, c).color == Some(color)),
        );
    }

    Some(combo)
}

/// Find every qualifying run and erase the blob behind it
pub fn find_and_erase(grid: &mut Grid) -> Vec<ComboResult> {
    if grid.is_empty() {
        return Vec::new();
    }
    find_seeds(grid)
        .into_iter()
        .filter_map(|seed| flood_erase(grid, seed))
        .collect()
}
