use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{RecordsError, Result};

pub const DEFAULT_PLAYER_FILE: &str = "player_name.txt";
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Name used when submitting scores, stored as a single line of text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerProfile {
    path: PathBuf,
    name: String,
}

impl PlayerProfile {
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let stored = match fs::read_to_string(&path) {
            Ok(text) => text.trim().to_owned(),
            Err(err) => {
                if err.kind() != ErrorKind::NotFound {
                    log::warn!("Could not read player name from {}: {}", path.display(), err);
                }
                String::new()
            }
        };
        let name = if stored.is_empty() {
            DEFAULT_PLAYER_NAME.to_owned()
        } else {
            stored
        };
        Self { path, name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Changes the name and writes it out. The new name applies in memory even if the write fails.
    pub fn rename(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RecordsError::BlankName);
        }
        self.name = name.to_owned();
        fs::write(&self.path, &self.name)?;
        Ok(())
    }
}
