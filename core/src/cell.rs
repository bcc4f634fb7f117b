use serde::{Deserialize, Serialize};

/// Player-visible state of a cell. Revealed and flagged can never hold at the same time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Flagged,
    Revealed,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    mine: bool,
    adjacent_mines: u8,
    state: CellState,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.mine
    }

    /// Zero until mines are laid, and always zero on mine cells.
    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    pub const fn state(&self) -> CellState {
        self.state
    }

    pub const fn is_hidden(&self) -> bool {
        matches!(self.state, CellState::Hidden)
    }

    pub const fn is_flagged(&self) -> bool {
        matches!(self.state, CellState::Flagged)
    }

    pub const fn is_revealed(&self) -> bool {
        matches!(self.state, CellState::Revealed)
    }

    /// What a player is allowed to see of this cell.
    pub const fn view(&self) -> CellView {
        let revealed = self.is_revealed();
        CellView {
            revealed,
            flagged: self.is_flagged(),
            adjacent_mines: if revealed && !self.mine {
                Some(self.adjacent_mines)
            } else {
                None
            },
            mine: if revealed { Some(self.mine) } else { None },
        }
    }

    pub(crate) fn arm(&mut self) {
        self.mine = true;
        self.adjacent_mines = 0;
    }

    pub(crate) fn set_adjacent_mines(&mut self, count: u8) {
        debug_assert!(!self.mine, "mine cells carry no count");
        self.adjacent_mines = count;
    }

    /// Opens a hidden cell, returns whether anything changed.
    pub(crate) fn reveal(&mut self) -> bool {
        if self.is_hidden() {
            self.state = CellState::Revealed;
            true
        } else {
            false
        }
    }

    /// Returns the new flagged state, or `None` for revealed cells.
    pub(crate) fn toggle_flag(&mut self) -> Option<bool> {
        match self.state {
            CellState::Hidden => {
                self.state = CellState::Flagged;
                Some(true)
            }
            CellState::Flagged => {
                self.state = CellState::Hidden;
                Some(false)
            }
            CellState::Revealed => None,
        }
    }
}

/// Read-only projection of a cell for presentation layers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub revealed: bool,
    pub flagged: bool,
    /// Only set on revealed safe cells.
    pub adjacent_mines: Option<u8>,
    /// Only set on revealed cells.
    pub mine: Option<bool>,
}
