//! File-backed leaderboard and player profile for seasweeper games.

pub use board::*;
pub use error::*;
pub use file::*;
pub use profile::*;

mod board;
mod error;
mod file;
mod profile;
