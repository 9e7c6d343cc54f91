//! Player shots: straight flight, grid attachment, loss off the arena

use glam::Vec2;

use super::body::{BodyFate, FallingBody};
use super::collision::nearest_occupied;
use super::grid::{Cell, Grid};
use crate::consts::BUBBLE_DIAMETER;

/// Side of the struck cell the shot arrived from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Approach {
    Above,
    Below,
    Left,
    Right,
}

impl Approach {
    fn from_offset(offset: Vec2) -> Self {
        if offset.x.abs() > offset.y.abs() {
            if offset.x < 0.0 { Self::Left } else { Self::Right }
        } else if offset.y > 0.0 {
            // Screen y grows downward
            Self::Below
        } else {
            Self::Above
        }
    }
}

/// Move along the fixed firing direction
#[inline]
pub fn advance(body: &mut FallingBody, dt: f32) {
    body.advance(dt, 0.0);
}

/// True once the shot has left the arena on any side
pub fn test_offscreen(body: &FallingBody, extent: Vec2) -> bool {
    body.pos.x < 0.0 || body.pos.x > extent.x || body.pos.y < 0.0 || body.pos.y > extent.y
}

/// Attach the shot to the grid if it touches an occupied cell
///
/// The shot settles into the empty neighbour on the side it came from,
/// falling back to the nearest empty neighbour and finally to the struck
/// cell itself. A shot arriving under the bottom row grows a new bottom row.
/// Returns the cell the shot now occupies.
pub fn test_grid_collision(body: &FallingBody, grid: &mut Grid) -> Option<(usize, usize)> {
    let (mut row, col) = nearest_occupied(grid, body.pos, BUBBLE_DIAMETER)?;
    let approach = Approach::from_offset(body.pos - grid.cell_center(row, col));

    let preferred = match approach {
        Approach::Below if row == 0 => {
            grid.push_bottom_row();
            row += 1;
            Some((0, col))
        }
        Approach::Below => Some((row - 1, col)),
        Approach::Above => (row + 1 < grid.len()).then_some((row + 1, col)),
        Approach::Left => col.checked_sub(1).map(|c| (row, c)),
        Approach::Right => (col + 1 < grid.width()).then_some((row, col + 1)),
    };

    let slot = preferred
        .filter(|&(r, c)| !grid.cell_at(r, c).is_occupied())
        .or_else(|| {
            grid.neighbors4(row, col)
                .filter(|&(r, c)| !grid.cell_at(r, c).is_occupied())
                .min_by(|&a, &b| {
                    let da = grid.cell_center(a.0, a.1).distance_squared(body.pos);
                    let db = grid.cell_center(b.0, b.1).distance_squared(body.pos);
                    da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                })
        })
        .unwrap_or((row, col));

    *grid.cell_at_mut(slot.0, slot.1) = Cell::shot(body.color);
    Some(slot)
}

/// Advance a shot and decide its fate for this tick
pub fn resolve(body: &mut FallingBody, grid: &mut Grid, extent: Vec2, dt: f32) -> BodyFate {
    advance(body, dt);
    if test_offscreen(body, extent) {
        return BodyFate::Offscreen;
    }
    match test_grid_collision(body, grid) {
        Some((row, col)) => BodyFate::Landed { row, col },
        None => BodyFate::Active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena_extent;
    use crate::consts::{BUBBLE_RADIUS, CELL_PITCH};
    use crate::sim::grid::Color;
    use std::f32::consts::FRAC_PI_2;

    const RED: Color = Color(0);
    const BLUE: Color = Color(1);

    fn shot_at(pos: Vec2, color: Color) -> FallingBody {
        FallingBody::shot(pos, FRAC_PI_2, 600.0, color, 4)
    }

    fn two_row_grid() -> Grid {
        let red = Cell::spawned(RED);
        Grid::from_rows(
            4,
            0.0,
            &[vec![red, red, red, red], vec![red, Cell::EMPTY, red, Cell::EMPTY]],
        )
    }

    #[test]
    fn test_shot_fills_empty_slot_below_struck_cell() {
        let mut grid = two_row_grid();
        // Rising into the hole under column 1 of the top row
        let pos = grid.cell_center(1, 1) + Vec2::new(0.0, BUBBLE_RADIUS);
        let slot = test_grid_collision(&shot_at(pos, BLUE), &mut grid);
        assert_eq!(slot, Some((0, 1)));
        assert_eq!(*grid.cell_at(0, 1), Cell::shot(BLUE));
    }

    #[test]
    fn test_shot_under_bottom_row_grows_grid() {
        let mut grid = two_row_grid();
        let pos = grid.cell_center(0, 0) + Vec2::new(0.0, BUBBLE_DIAMETER - 2.0);
        let slot = test_grid_collision(&shot_at(pos, BLUE), &mut grid);
        assert_eq!(slot, Some((0, 0)));
        assert_eq!(grid.len(), 3);
        assert_eq!(*grid.cell_at(0, 0), Cell::shot(BLUE));
        // Struck cell moved up one index
        assert_eq!(grid.cell_at(1, 0).color, Some(RED));
    }

    #[test]
    fn test_shot_from_side() {
        let mut grid = two_row_grid();
        let pos = grid.cell_center(0, 2) + Vec2::new(BUBBLE_DIAMETER - 4.0, 0.0);
        let slot = test_grid_collision(&shot_at(pos, BLUE), &mut grid);
        assert_eq!(slot, Some((0, 3)));
    }

    #[test]
    fn test_shot_far_from_grid_misses() {
        let mut grid = two_row_grid();
        let before = grid.clone();
        let pos = grid.cell_center(0, 0) + Vec2::new(0.0, CELL_PITCH * 3.0);
        assert_eq!(test_grid_collision(&shot_at(pos, BLUE), &mut grid), None);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_offscreen_any_side() {
        let extent = arena_extent();
        let inside = shot_at(extent / 2.0, RED);
        assert!(!test_offscreen(&inside, extent));
        for pos in [
            Vec2::new(-1.0, 10.0),
            Vec2::new(extent.x + 1.0, 10.0),
            Vec2::new(10.0, -1.0),
            Vec2::new(10.0, extent.y + 1.0),
        ] {
            assert!(test_offscreen(&shot_at(pos, RED), extent));
        }
    }

    #[test]
    fn test_resolve_lands_after_flight() {
        let mut grid = two_row_grid();
        let start = grid.cell_center(0, 3) + Vec2::new(0.0, CELL_PITCH * 2.0);
        let mut shot = shot_at(start, BLUE);
        let mut fate = BodyFate::Active;
        for _ in 0..120 {
            fate = resolve(&mut shot, &mut grid, arena_extent(), 1.0 / 120.0);
            if !fate.is_active() {
                break;
            }
        }
        // The shot rises through the hole at (0, 3) until it touches (1, 3)
        assert_eq!(fate, BodyFate::Landed { row: 0, col: 3 });
        assert_eq!(grid.occupied().filter(|&(r, c)| grid.cell_at(r, c).from_projectile).count(), 1);
    }
}
