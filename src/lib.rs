//! Ring Leader - a scrolling bubble-shooter arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, matching, detachment, bodies)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Board width in cells
    pub const BOARD_WIDTH: usize = 20;
    /// Visible board height in cells
    pub const BOARD_HEIGHT: usize = 20;

    /// Cell (bubble) diameter in pixels
    pub const BUBBLE_DIAMETER: f32 = 32.0;
    pub const BUBBLE_RADIUS: f32 = BUBBLE_DIAMETER / 2.0;
    /// Gap between neighbouring cells
    pub const BUBBLE_PADDING: f32 = 4.0;
    /// Horizontal margin on each side of the board
    pub const MARGINS: f32 = 16.0;
    /// Distance between neighbouring cell centres
    pub const CELL_PITCH: f32 = BUBBLE_DIAMETER + BUBBLE_PADDING;

    /// Minimum straight run that triggers an erase
    pub const MATCH_LENGTH: usize = 4;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = BUBBLE_DIAMETER * BOARD_WIDTH as f32
        + BUBBLE_PADDING * (BOARD_WIDTH as f32 - 1.0)
        + MARGINS * 2.0;
    pub const ARENA_HEIGHT: f32 =
        BUBBLE_DIAMETER * BOARD_HEIGHT as f32 + BUBBLE_PADDING * BOARD_HEIGHT as f32;
}

/// Arena extent as a vector (width, height)
#[inline]
pub fn arena_extent() -> Vec2 {
    Vec2::new(consts::ARENA_WIDTH, consts::ARENA_HEIGHT)
}

/// Horizontal centre of a grid column
#[inline]
pub fn column_x(col: usize) -> f32 {
    consts::MARGINS + consts::BUBBLE_RADIUS + col as f32 * consts::CELL_PITCH
}

/// Column whose centre is nearest to `x`, if `x` lies over the board
pub fn column_at(x: f32, width: usize) -> Option<usize> {
    let offset = x - consts::MARGINS - consts::BUBBLE_RADIUS;
    let col = (offset / consts::CELL_PITCH).round();
    if col < 0.0 || col >= width as f32 {
        return None;
    }
    Some(col as usize)
}

/// Firing angle from `from` toward `to`, measured with y pointing up
/// (screen y grows downward, so the vertical component is negated)
#[inline]
pub fn aim_angle(from: Vec2, to: Vec2) -> f32 {
    (from.y - to.y).atan2(to.x - from.x)
}

/// Unit direction for a firing angle in screen coordinates
#[inline]
pub fn angle_to_direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), -angle.sin())
}
