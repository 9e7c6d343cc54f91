//! Circle tests between bubbles, the grid and the avatar
//!
//! Every bubble is a circle of `BUBBLE_RADIUS`; the avatar is a circle of
//! its current hull radius.

use glam::Vec2;

use super::grid::Grid;
use crate::consts::BUBBLE_RADIUS;

/// Strict overlap of two circles
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    a.distance_squared(b) < reach * reach
}

/// Occupied cell whose centre is closest to `pos`, within `reach`
pub fn nearest_occupied(grid: &Grid, pos: Vec2, reach: f32) -> Option<(usize, usize)> {
    let reach_sq = reach * reach;
    grid.occupied()
        .map(|(r, c)| ((r, c), grid.cell_center(r, c).distance_squared(pos)))
        .filter(|&(_, dist_sq)| dist_sq <= reach_sq)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(cell, _)| cell)
}

/// True if any occupied grid cell overlaps the avatar
pub fn avatar_grid_collision(grid: &Grid, avatar_pos: Vec2, avatar_radius: f32) -> bool {
    grid.occupied()
        .any(|(r, c)| circles_overlap(grid.cell_center(r, c), BUBBLE_RADIUS, avatar_pos, avatar_radius))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BUBBLE_DIAMETER, CELL_PITCH};
    use crate::sim::grid::{Cell, Color};

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 10.0, Vec2::new(15.0, 0.0), 10.0));
        assert!(!circles_overlap(Vec2::ZERO, 10.0, Vec2::new(20.0, 0.0), 10.0));
        assert!(!circles_overlap(Vec2::ZERO, 10.0, Vec2::new(30.0, 0.0), 10.0));
    }

    #[test]
    fn test_nearest_occupied_picks_closest() {
        let red = Cell::spawned(Color(0));
        let grid = Grid::from_rows(3, 0.0, &[vec![red, Cell::EMPTY, red]]);
        let right = grid.cell_center(0, 2);
        let probe = right - Vec2::new(CELL_PITCH * 0.4, 0.0);
        assert_eq!(nearest_occupied(&grid, probe, BUBBLE_DIAMETER), Some((0, 2)));
        // Middle slot is empty and both neighbours are a full pitch away
        let middle = grid.cell_center(0, 1);
        assert_eq!(nearest_occupied(&grid, middle, BUBBLE_DIAMETER), None);
    }

    #[test]
    fn test_avatar_grid_collision() {
        let grid = Grid::from_rows(2, 0.0, &[vec![Cell::spawned(Color(1)), Cell::EMPTY]]);
        let occupied = grid.cell_center(0, 0);
        let empty = grid.cell_center(0, 1);
        assert!(avatar_grid_collision(&grid, occupied + Vec2::new(0.0, 20.0), 8.0));
        assert!(!avatar_grid_collision(&grid, empty + Vec2::new(0.0, 40.0), 8.0));
        assert!(!avatar_grid_collision(&Grid::new(10.0), occupied, 100.0));
    }
}
