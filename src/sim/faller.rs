//! Detached bubbles: gravity, avatar strikes, re-landing on the grid

use glam::Vec2;

use super::body::{BodyFate, FallingBody};
use super::collision::circles_overlap;
use super::grid::{Cell, Grid};
use crate::consts::{BUBBLE_DIAMETER, BUBBLE_PADDING, BUBBLE_RADIUS};

/// Accelerate downward, then move
#[inline]
pub fn advance(body: &mut FallingBody, dt: f32, gravity: f32) {
    body.advance(dt, gravity);
}

/// Circle test against the avatar hull
#[inline]
pub fn test_avatar_collision(body: &FallingBody, avatar_pos: Vec2, avatar_radius: f32) -> bool {
    circles_overlap(body.pos, BUBBLE_RADIUS, avatar_pos, avatar_radius)
}

/// True once the body has dropped past the bottom edge
#[inline]
pub fn test_offscreen(body: &FallingBody, extent: Vec2) -> bool {
    body.pos.y > extent.y
}

/// Re-occupy the grid when the body nears content in its own column
///
/// Rows are scanned bottom-up; the first occupied cell within a cell
/// diameter plus padding of the body decides the landing, and the body
/// takes the slot at the next row index (`row + 1`) in that column. A hit
/// on the top row has no such slot and the body keeps falling.
pub fn test_grid_landing(body: &FallingBody, grid: &mut Grid) -> Option<(usize, usize)> {
    let col = body.column;
    if col >= grid.width() {
        return None;
    }
    let reach = BUBBLE_DIAMETER + BUBBLE_PADDING;
    let struck = (0..grid.len()).find(|&row| {
        grid.cell_at(row, col).is_occupied() && (grid.row(row).y - body.pos.y).abs() <= reach
    })?;

    let target = struck + 1;
    if target >= grid.len() {
        return None;
    }
    *grid.cell_at_mut(target, col) = Cell::spawned(body.color);
    Some((target, col))
}

/// Advance a falling bubble and decide its fate for this tick
pub fn resolve(
    body: &mut FallingBody,
    grid: &mut Grid,
    avatar_pos: Vec2,
    avatar_radius: f32,
    extent: Vec2,
    dt: f32,
    gravity: f32,
) -> BodyFate {
    advance(body, dt, gravity);
    if test_offscreen(body, extent) {
        return BodyFate::Offscreen;
    }
    if test_avatar_collision(body, avatar_pos, avatar_radius) {
        return BodyFate::AvatarHit;
    }
    match test_grid_landing(body, grid) {
        Some((row, col)) => BodyFate::Landed { row, col },
        None => BodyFate::Active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena_extent;
    use crate::consts::CELL_PITCH;
    use crate::sim::grid::Color;

    const RED: Color = Color(0);
    const GREEN: Color = Color(2);

    fn column_grid() -> Grid {
        // Column 0: occupied, empty, empty, occupied (bottom)
        let red = Cell::spawned(RED);
        Grid::from_rows(
            2,
            0.0,
            &[
                vec![red, red],
                vec![Cell::EMPTY, red],
                vec![Cell::EMPTY, red],
                vec![red, red],
            ],
        )
    }

    #[test]
    fn test_lands_at_next_row_index() {
        let mut grid = column_grid();
        let pos = grid.cell_center(0, 0) - Vec2::new(0.0, CELL_PITCH - 2.0);
        let body = FallingBody::dropper(pos, GREEN, 0);
        assert_eq!(test_grid_landing(&body, &mut grid), Some((1, 0)));
        assert_eq!(*grid.cell_at(1, 0), Cell::spawned(GREEN));
    }

    #[test]
    fn test_no_content_nearby() {
        let mut grid = column_grid();
        let before = grid.clone();
        let pos = grid.cell_center(0, 0) + Vec2::new(0.0, CELL_PITCH * 2.0);
        let body = FallingBody::dropper(pos, GREEN, 0);
        assert_eq!(test_grid_landing(&body, &mut grid), None);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_top_row_hit_keeps_falling() {
        let red = Cell::spawned(RED);
        let mut grid = Grid::from_rows(1, 0.0, &[vec![red]]);
        let body = FallingBody::dropper(grid.cell_center(0, 0), GREEN, 0);
        assert_eq!(test_grid_landing(&body, &mut grid), None);
    }

    #[test]
    fn test_avatar_hit() {
        let body = FallingBody::dropper(Vec2::new(100.0, 100.0), RED, 0);
        assert!(test_avatar_collision(&body, Vec2::new(100.0, 120.0), 16.0));
        assert!(!test_avatar_collision(&body, Vec2::new(100.0, 140.0), 16.0));
    }

    #[test]
    fn test_falls_through_empty_column() {
        let mut grid = column_grid();
        let extent = arena_extent();
        // Starts under the bottom row and only moves away from it
        let start = grid.cell_center(0, 0) + Vec2::new(0.0, CELL_PITCH * 2.0);
        let mut body = FallingBody::dropper(start, GREEN, 0);
        let mut fate = BodyFate::Active;
        for _ in 0..1000 {
            fate = resolve(&mut body, &mut grid, Vec2::new(-500.0, 0.0), 10.0, extent, 1.0 / 120.0, 600.0);
            if !fate.is_active() {
                break;
            }
        }
        assert_eq!(fate, BodyFate::Offscreen);
    }
}
