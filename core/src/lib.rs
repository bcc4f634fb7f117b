//! Game-state engine for a single-player mine-uncovering puzzle: deferred mine placement,
//! flood-fill reveal, chorded quick-open and win/loss detection.

use core::fmt;
use core::str::FromStr;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use score::*;
pub use session::*;
pub use snapshot::*;
pub use types::*;
pub use win::*;

mod cell;
mod engine;
mod error;
mod generator;
mod grid;
mod score;
mod session;
mod snapshot;
mod types;
mod win;

pub const MIN_WIDTH: Coord = 5;
pub const MAX_WIDTH: Coord = 16;
pub const MIN_HEIGHT: Coord = 5;
pub const MAX_HEIGHT: Coord = 30;

/// Size of the first-click neighborhood that never holds a mine.
pub const SAFE_ZONE_CELLS: CellCount = 9;

/// Validated board dimensions and mine count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameConfig {
    size: Coord2,
    mines: CellCount,
}

impl GameConfig {
    const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        if !(MIN_WIDTH..=MAX_WIDTH).contains(&width) {
            return Err(ConfigError::InvalidWidth(width));
        }
        if !(MIN_HEIGHT..=MAX_HEIGHT).contains(&height) {
            return Err(ConfigError::InvalidHeight(height));
        }
        let max = Self::max_mines(width, height);
        if mines == 0 || mines > max {
            return Err(ConfigError::InvalidMineCount { mines, max });
        }
        Ok(Self::new_unchecked((width, height), mines))
    }

    /// Largest mine count that still leaves a full safe zone free.
    pub const fn max_mines(width: Coord, height: Coord) -> CellCount {
        mult(width, height).saturating_sub(SAFE_ZONE_CELLS)
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn width(&self) -> Coord {
        self.size.0
    }

    pub const fn height(&self) -> Coord {
        self.size.1
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

/// Leaderboard tier a game is played on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Custom,
}

impl Difficulty {
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Custom];

    pub const fn preset(self) -> Option<GameConfig> {
        match self {
            Self::Easy => Some(GameConfig::new_unchecked((9, 9), 10)),
            Self::Medium => Some(GameConfig::new_unchecked((16, 16), 40)),
            Self::Hard => Some(GameConfig::new_unchecked((16, 30), 99)),
            Self::Custom => None,
        }
    }

    /// The preset tier matching `config`, or `Custom`.
    pub fn of(config: GameConfig) -> Self {
        Self::ALL
            .into_iter()
            .find(|tier| tier.preset() == Some(config))
            .unwrap_or(Self::Custom)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownDifficulty(s.to_owned()))
    }
}

static NOTHING_OPENED: BTreeSet<Coord2> = BTreeSet::new();

/// Outcome of a reveal or chord.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum RevealOutcome {
    /// Nothing changed: out of bounds, not applicable, or the game is over.
    Ignored,
    Revealed(BTreeSet<Coord2>),
    /// The cells opened by this call finished the game.
    Won(BTreeSet<Coord2>),
    HitMine {
        mine: Coord2,
        revealed: BTreeSet<Coord2>,
    },
}

impl RevealOutcome {
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::Ignored)
    }

    /// Safe cells newly opened by the call.
    pub fn revealed(&self) -> &BTreeSet<Coord2> {
        match self {
            Self::Ignored => &NOTHING_OPENED,
            Self::Revealed(cells) | Self::Won(cells) => cells,
            Self::HitMine { revealed, .. } => revealed,
        }
    }
}

/// Outcome of toggling a flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum MarkOutcome {
    Ignored,
    Flagged,
    Unflagged,
    /// The toggle completed the flag win; `flagged` is the cell's new state.
    Won { flagged: bool },
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }

    /// New flagged state of the cell, `None` when ignored.
    pub const fn flagged(self) -> Option<bool> {
        match self {
            Self::Ignored => None,
            Self::Flagged => Some(true),
            Self::Unflagged => Some(false),
            Self::Won { flagged } => Some(flagged),
        }
    }
}
