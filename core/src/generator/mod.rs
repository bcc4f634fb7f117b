use std::collections::BTreeSet;

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Chooses where mines go once the first reveal is known.
pub trait MineGenerator: core::fmt::Debug + Send {
    /// Picks exactly `mines` distinct positions on a board of `size`, none of them inside the
    /// clipped 3×3 block around `safe`.
    fn pick_mines(&mut self, size: Coord2, safe: Coord2, mines: CellCount) -> Vec<Coord2>;
}

/// Every cell of a board of `size` outside the safe block around `safe`, in row-major order.
pub fn candidate_cells(size: Coord2, safe: Coord2) -> Vec<Coord2> {
    let (size_x, size_y) = size;
    (0..size_y)
        .flat_map(|y| (0..size_x).map(move |x| (x, y)))
        .filter(|&pos| !within_one(pos, safe))
        .collect()
}

/// Arms `positions` on `grid` and fills in the adjacent-mine count of every safe cell.
///
/// Returns the set of armed positions; positions outside the grid are skipped.
pub fn lay_mines(grid: &mut Grid, positions: &[Coord2]) -> BTreeSet<Coord2> {
    let mut armed = BTreeSet::new();
    for &pos in positions {
        match grid.get_mut(pos) {
            Some(cell) => {
                cell.arm();
                armed.insert(pos);
            }
            None => log::warn!("Skipping mine outside the board at {:?}", pos),
        }
    }

    let (size_x, size_y) = grid.size();
    for x in 0..size_x {
        for y in 0..size_y {
            if grid[(x, y)].is_mine() {
                continue;
            }
            let count = grid.count_neighbors((x, y), Cell::is_mine);
            grid[(x, y)].set_adjacent_mines(count);
        }
    }

    armed
}
