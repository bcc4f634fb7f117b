use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::*;

/// Which rule ended a won game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinCondition {
    /// Every safe cell has been revealed.
    AllSafeRevealed,
    /// Every mine is flagged and no other cell is.
    AllMinesFlagged,
}

/// Read-only view of the counters a win depends on.
#[derive(Copy, Clone, Debug)]
pub struct WinDetector<'a> {
    pub grid: &'a Grid,
    pub mine_positions: &'a BTreeSet<Coord2>,
    pub mine_count: CellCount,
    pub revealed_count: CellCount,
    pub flags_placed: CellCount,
}

impl WinDetector<'_> {
    /// Checks both win rules; no mines laid yet means no win.
    pub fn evaluate(&self) -> Option<WinCondition> {
        if self.mine_positions.is_empty() {
            return None;
        }

        let safe_cells = self.grid.total_cells().saturating_sub(self.mine_count);
        if self.revealed_count == safe_cells {
            return Some(WinCondition::AllSafeRevealed);
        }

        let all_mines_flagged = self
            .mine_positions
            .iter()
            .all(|&pos| self.grid[pos].is_flagged());
        if all_mines_flagged && self.flags_placed == self.mine_count {
            return Some(WinCondition::AllMinesFlagged);
        }

        None
    }
}
