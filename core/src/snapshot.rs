use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a presentation layer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub difficulty: Difficulty,
    pub state: SessionState,
    pub total_mines: CellCount,
    pub remaining_mines: i32,
    pub revealed_count: CellCount,
    pub flags_placed: CellCount,
    pub elapsed_secs: u32,
    pub triggered_mine: Option<Coord2>,
    pub cells: Array2<CellView>,
}

impl Snapshot {
    pub fn from_session(session: &GameSession) -> Self {
        Self {
            size: session.size(),
            difficulty: session.difficulty(),
            state: session.state(),
            total_mines: session.total_mines(),
            remaining_mines: session.remaining_mines(),
            revealed_count: session.revealed_count(),
            flags_placed: session.flags_placed(),
            elapsed_secs: session.elapsed_seconds(),
            triggered_mine: session.triggered_mine(),
            cells: session.grid().views(),
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<CellView> {
        self.cells.get(coords.to_nd_index()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_maps_revealed_and_flagged_cells() {
        let config = GameConfig::new(5, 5, 3).unwrap();
        let mines = FixedMineGenerator::new([(0, 0), (2, 0), (0, 3)]);
        let mut session = GameSession::with_generator(config, mines);

        session.reveal((4, 4));
        session.toggle_flag((0, 0));

        let snapshot = session.snapshot();

        assert_eq!(snapshot.state, SessionState::InProgress);
        assert_eq!(snapshot.remaining_mines, 2);
        assert_eq!(snapshot.cell((1, 1)).and_then(|view| view.adjacent_mines), Some(2));
        assert!(snapshot.cell((0, 0)).is_some_and(|view| view.flagged));
        assert_eq!(snapshot.cell((0, 3)).and_then(|view| view.mine), None);
        assert_eq!(snapshot.cell((5, 5)), None);
    }
}
