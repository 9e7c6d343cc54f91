//! Detachment of cells that lost their path to the anchored top row

use std::collections::VecDeque;

use super::body::FallingBody;
use super::grid::Grid;

/// Per-cell flags, `mask[row][col]`, marking occupied cells connected to the
/// top row through occupied 4-neighbours of any colour
pub fn supported_mask(grid: &Grid) -> Vec<Vec<bool>> {
    let mut mask = vec![vec![false; grid.width()]; grid.len()];
    let Some(top) = grid.top_row() else {
        return mask;
    };

    let mut queue = VecDeque::new();
    for col in 0..grid.width() {
        if grid.cell_at(top, col).is_occupied() {
            mask[top][col] = true;
            queue.push_back((top, col));
        }
    }

    while let Some((row, col)) = queue.pop_front() {
        for (r, c) in grid.occupied_neighbors4(row, col) {
            if !mask[r][c] {
                mask[r][c] = true;
                queue.push_back((r, c));
            }
        }
    }

    mask
}

/// Clear every unsupported cell and turn it into a dropper at rest
pub fn detach_unsupported(grid: &mut Grid) -> Vec<FallingBody> {
    let mask = supported_mask(grid);
    let loose: Vec<(usize, usize)> = grid.occupied().filter(|&(r, c)| !mask[r][c]).collect();

    let mut droppers = Vec::with_capacity(loose.len());
    for (row, col) in loose {
        let pos = grid.cell_center(row, col);
        let cell = grid.cell_at_mut(row, col);
        if let Some(color) = cell.color {
            droppers.push(FallingBody::dropper(pos, color, col));
        }
        cell.clear();
    }

    if !droppers.is_empty() {
        log::debug!("{} cells detached", droppers.len());
    }
    droppers
}
