//! Colours for freshly inserted grid rows
//!
//! The grid only allocates rows; a [`RowSpawner`] decides what goes in
//! them. [`PaletteSpawner`] is the seeded default.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::grid::{Cell, Color};

/// Colour source for newly spawned rows
pub trait RowSpawner {
    /// Fill a freshly inserted, all-empty row
    fn fill_row(&mut self, cells: &mut [Cell]);

    /// Called when the run advances to `level`
    fn on_level(&mut self, _level: u32) {}
}

/// Palette size for a level: 3 colours, 4 from level 5, 5 from level 10
pub fn colors_for_level(level: u32) -> u8 {
    match level {
        0..=4 => 3,
        5..=9 => 4,
        _ => 5,
    }
}

/// Seeded random fill from a palette of `color_count` colours
#[derive(Debug, Clone)]
pub struct PaletteSpawner {
    rng: Pcg32,
    color_count: u8,
    /// Probability that a slot is occupied
    fill_chance: f64,
}

impl PaletteSpawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            color_count: colors_for_level(1),
            fill_chance: 0.85,
        }
    }

    pub fn with_fill_chance(mut self, fill_chance: f64) -> Self {
        self.fill_chance = fill_chance.clamp(0.0, 1.0);
        self
    }

    #[inline]
    pub fn color_count(&self) -> u8 {
        self.color_count
    }

    /// A uniformly random palette colour
    pub fn random_color(&mut self) -> Color {
        Color(self.rng.random_range(0..self.color_count))
    }
}

impl RowSpawner for PaletteSpawner {
    fn fill_row(&mut self, cells: &mut [Cell]) {
        for cell in cells {
            if self.rng.random_bool(self.fill_chance) {
                *cell = Cell::spawned(self.random_color());
            }
        }
    }

    fn on_level(&mut self, level: u32) {
        let count = colors_for_level(level);
        if count != self.color_count {
            log::info!("Palette grows to {} colors at level {}", count, level);
        }
        self.color_count = count;
    }
}
