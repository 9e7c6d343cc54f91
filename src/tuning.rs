//! Data-driven game balance
//!
//! Every rate and score value the simulation consumes at runtime. Board
//! geometry stays in [`crate::consts`]; everything here can be overridden
//! from a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{BUBBLE_DIAMETER, MATCH_LENGTH};

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Grid ===
    /// Base downward scroll speed of the grid (pixels/s)
    pub base_velocity: f32,
    /// Scroll multiplier while fast rows are pending
    pub fast_row_multiplier: f32,
    /// Fast rows granted at the start of every level
    pub fast_rows: u32,

    // === Bodies ===
    /// Downward acceleration of detached bubbles (pixels/s²)
    pub gravity: f32,
    /// Constant speed of player shots (pixels/s)
    pub bullet_speed: f32,
    /// Avatar radius growth when struck by a falling bubble
    pub hit_grow: f32,

    // === Scoring ===
    /// Points lost per shot that leaves the arena
    pub lost_bullet_penalty: u64,
    /// Points gained per falling bubble that leaves the arena
    pub faller_reward: u64,
    /// Points needed to leave level 1
    pub first_level_points: u64,
    /// Threshold step, multiplied by the new level number
    pub level_points_step: u64,
    /// Scroll velocity multiplier applied at each level change
    pub level_velocity_growth: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_velocity: 10.0,
            fast_row_multiplier: 16.0,
            fast_rows: MATCH_LENGTH as u32,

            gravity: 600.0,
            bullet_speed: 720.0,
            hit_grow: BUBBLE_DIAMETER / 4.0,

            lost_bullet_penalty: 10,
            faller_reward: 5,
            first_level_points: 500,
            level_points_step: 250,
            level_velocity_growth: 1.1,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load tuning from a file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(err) => {
                    log::warn!("Invalid tuning file {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("Could not read tuning file {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Points threshold to leave `level`, given the threshold to leave the previous one
    pub fn next_threshold(&self, previous: u64, level: u32) -> u64 {
        previous + self.level_points_step * level as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 100.0, "faller_reward": 7 }"#).unwrap();
        assert_eq!(tuning.gravity, 100.0);
        assert_eq!(tuning.faller_reward, 7);
        assert_eq!(tuning.first_level_points, 500);
        assert_eq!(tuning.fast_rows, 4);
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::default();
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Tuning::from_json("{ gravity: }").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load(Path::new("/nonexistent/ring-leader-tuning.json"));
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_level_thresholds() {
        let tuning = Tuning::default();
        // 500 -> 1000 (level 2) -> 1750 (level 3)
        let second = tuning.next_threshold(tuning.first_level_points, 2);
        assert_eq!(second, 1000);
        assert_eq!(tuning.next_threshold(second, 3), 1750);
    }
}
