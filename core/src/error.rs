use thiserror::Error;

use crate::{CellCount, Coord, MAX_HEIGHT, MAX_WIDTH, MIN_HEIGHT, MIN_WIDTH};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Width {0} is out of range, expected {min}..={max}", min = MIN_WIDTH, max = MAX_WIDTH)]
    InvalidWidth(Coord),
    #[error("Height {0} is out of range, expected {min}..={max}", min = MIN_HEIGHT, max = MAX_HEIGHT)]
    InvalidHeight(Coord),
    #[error("Mine count {mines} is out of range, expected 1..={max}")]
    InvalidMineCount { mines: CellCount, max: CellCount },
    #[error("Custom difficulty has no preset board")]
    NoPreset,
    #[error("Unknown difficulty {0:?}")]
    UnknownDifficulty(String),
}

pub type Result<T> = core::result::Result<T, ConfigError>;
