//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only (through the row spawner)
//! - Stable iteration order (rows bottom-up, columns left to right)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod faller;
pub mod grid;
pub mod matcher;
pub mod projectile;
pub mod spawner;
pub mod state;
pub mod support;
pub mod tick;

pub use body::{BodyFate, BodyKind, FallingBody};
pub use collision::{avatar_grid_collision, circles_overlap};
pub use grid::{Cell, Color, Grid, Row};
pub use matcher::{ComboResult, find_and_erase, find_seeds};
pub use spawner::{PaletteSpawner, RowSpawner, colors_for_level};
pub use state::{Avatar, GameEvent, SimState};
pub use support::{detach_unsupported, supported_mask};
pub use tick::{Shot, TickInput, tick};
