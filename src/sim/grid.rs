//! The scrolling cell grid
//!
//! Rows are stored bottom-up: row 0 is the oldest row (lowest on screen),
//! the last row is the newest and the only one treated as anchored. Each
//! row carries its own screen y; cell x positions derive from the column.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::column_x;
use crate::consts::*;

/// Palette index of an occupied cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u8);

/// One grid slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    /// `None` means the slot is unoccupied
    pub color: Option<Color>,
    /// Created by a player shot rather than by row spawning (scoring only)
    pub from_projectile: bool,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        color: None,
        from_projectile: false,
    };

    /// A grid-spawned cell
    pub fn spawned(color: Color) -> Self {
        Self {
            color: Some(color),
            from_projectile: false,
        }
    }

    /// A cell created by a landed shot
    pub fn shot(color: Color) -> Self {
        Self {
            color: Some(color),
            from_projectile: true,
        }
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.color.is_some()
    }

    /// Empty the slot
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::EMPTY;
    }
}

/// A full-width row of cells at a screen height
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Screen y of the row's cell centres
    pub y: f32,
    pub cells: Vec<Cell>,
}

impl Row {
    fn empty(y: f32, width: usize) -> Self {
        Self {
            y,
            cells: vec![Cell::EMPTY; width],
        }
    }
}

/// The rectangular, vertically scrolling grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    rows: VecDeque<Row>,
    /// Base scroll speed (pixels/s)
    pub velocity: f32,
}

impl Grid {
    /// Create an empty board-width grid
    pub fn new(velocity: f32) -> Self {
        Self::with_width(BOARD_WIDTH, velocity)
    }

    /// Create an empty grid of a custom width
    pub fn with_width(width: usize, velocity: f32) -> Self {
        assert!(width > 0, "grid width must be positive");
        Self {
            width,
            rows: VecDeque::new(),
            velocity,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows bottom to top
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    #[inline]
    pub fn row(&self, row: usize) -> &Row {
        &self.rows[row]
    }

    /// Index of the anchored (newest) row
    #[inline]
    pub fn top_row(&self) -> Option<usize> {
        self.rows.len().checked_sub(1)
    }

    /// Bounds-checked accessor; out of range panics
    #[inline]
    pub fn cell_at(&self, row: usize, col: usize) -> &Cell {
        &self.rows[row].cells[col]
    }

    #[inline]
    pub fn cell_at_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        &mut self.rows[row].cells[col]
    }

    /// Screen position of a cell centre
    #[inline]
    pub fn cell_center(&self, row: usize, col: usize) -> Vec2 {
        Vec2::new(column_x(col), self.rows[row].y)
    }

    /// Up/down/left/right neighbours that lie inside the grid
    pub fn neighbors4(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
        let (rows, width) = (self.rows.len(), self.width);
        [
            (row + 1, col),
            (row.wrapping_sub(1), col),
            (row, col + 1),
            (row, col.wrapping_sub(1)),
        ]
        .into_iter()
        .filter(move |&(r, c)| r < rows && c < width)
    }

    /// In-grid neighbours that hold a colour
    pub fn occupied_neighbors4(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
        self.neighbors4(row, col)
            .filter(|&(r, c)| self.cell_at(r, c).is_occupied())
    }

    /// Every occupied cell as (row, col), bottom-up, left to right
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.cells
                .iter()
                .enumerate()
                .filter(|(_, cell)| cell.is_occupied())
                .map(move |(c, _)| (r, c))
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }

    /// Translate every row downward. Occupancy is untouched.
    pub fn scroll(&mut self, distance: f32) {
        for row in &mut self.rows {
            row.y += distance;
        }
    }

    /// Drop row 0 once it has passed below `lower_bound` plus half a cell
    pub fn retire_bottom_row_if_offscreen(&mut self, lower_bound: f32) -> bool {
        match self.rows.front() {
            Some(bottom) if bottom.y > lower_bound + BUBBLE_RADIUS => {
                self.rows.pop_front();
                true
            }
            _ => false,
        }
    }

    /// Insert an empty top row once the current top row has scrolled a full
    /// cell past the top margin. The caller fills the returned row.
    pub fn spawn_top_row_if_needed(&mut self) -> Option<&mut Row> {
        let threshold = BUBBLE_RADIUS + BUBBLE_PADDING;
        let y = match self.rows.back() {
            None => threshold - CELL_PITCH,
            Some(top) if top.y >= threshold => top.y - CELL_PITCH,
            Some(_) => return None,
        };
        Some(self.push_top_row(y))
    }

    /// Append an empty row above the current top
    pub fn push_top_row(&mut self, y: f32) -> &mut Row {
        self.rows.push_back(Row::empty(y, self.width));
        let top = self.rows.len() - 1;
        &mut self.rows[top]
    }

    /// Insert an empty row under row 0; existing row indices shift up by one
    pub fn push_bottom_row(&mut self) -> &mut Row {
        let y = match self.rows.front() {
            Some(bottom) => bottom.y + CELL_PITCH,
            None => BUBBLE_RADIUS + BUBBLE_PADDING - CELL_PITCH,
        };
        self.rows.push_front(Row::empty(y, self.width));
        &mut self.rows[0]
    }

    /// Build a grid from colour rows given top-first, the way a board reads
    /// on screen. The top row sits just inside the top margin.
    pub fn from_rows(width: usize, velocity: f32, top_first: &[Vec<Cell>]) -> Self {
        let mut grid = Self::with_width(width, velocity);
        let top_y = BUBBLE_RADIUS + BUBBLE_PADDING;
        for (depth, cells) in top_first.iter().enumerate().rev() {
            assert_eq!(cells.len(), width, "row width mismatch");
            let row = grid.push_top_row(top_y + depth as f32 * CELL_PITCH);
            row.cells.copy_from_slice(cells);
        }
        grid
    }
}
