use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use seasweeper_core::{Difficulty, ScoreStore};
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::{RecordsError, Result, ScoreBoard, ScoreEntry};

pub const DEFAULT_RECORDS_FILE: &str = "minesweeper_records.json";

/// Leaderboard persisted as pretty JSON, rewritten after every change.
#[derive(Debug)]
pub struct RecordsFile {
    path: PathBuf,
    board: ScoreBoard,
}

impl RecordsFile {
    /// Opens `path`, starting from an empty board when it is missing or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let board = match Self::load(&path) {
            Ok(board) => board,
            Err(RecordsError::Io(err)) if err.kind() == ErrorKind::NotFound => {
                log::debug!("No records at {}, starting empty", path.display());
                ScoreBoard::default()
            }
            Err(err) => {
                log::warn!("Ignoring records at {}: {}", path.display(), err);
                ScoreBoard::default()
            }
        };
        Self { path, board }
    }

    pub fn load(path: &Path) -> Result<ScoreBoard> {
        let text = fs::read_to_string(path)?;
        let mut board: ScoreBoard = serde_json::from_str(&text)?;
        board.normalize();
        Ok(board)
    }

    pub fn save(&self) -> Result<()> {
        let text = serde_json::to_string_pretty(&self.board)?;
        fs::write(&self.path, text)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn board(&self) -> &ScoreBoard {
        &self.board
    }

    /// Adds a win if it ranks, saving on success. Returns whether it ranked.
    pub fn record(
        &mut self,
        difficulty: Difficulty,
        player_name: &str,
        elapsed_secs: u32,
        date: PrimitiveDateTime,
    ) -> bool {
        if !self.board.qualifies(difficulty, elapsed_secs) {
            return false;
        }
        let ranked = self.board.insert(ScoreEntry {
            name: player_name.to_owned(),
            time: elapsed_secs,
            date,
            difficulty,
        });
        if ranked {
            log::info!("New {difficulty} record: {player_name} in {elapsed_secs}s");
            self.persist();
        }
        ranked
    }

    pub fn clear(&mut self) {
        self.board.clear();
        self.persist();
    }

    fn persist(&self) {
        if let Err(err) = self.save() {
            log::error!("Could not save records to {}: {}", self.path.display(), err);
        }
    }
}

impl ScoreStore for RecordsFile {
    fn submit_score(&mut self, difficulty: Difficulty, player_name: &str, elapsed_secs: u32) -> bool {
        self.record(difficulty, player_name, elapsed_secs, local_now())
    }
}

/// Wall clock in the local offset, or UTC when the offset is unknown.
pub fn local_now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    PrimitiveDateTime::new(now.date(), now.time())
}
