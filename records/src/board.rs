use std::collections::BTreeMap;

use seasweeper_core::Difficulty;
use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::Result;

/// Entries kept per difficulty.
pub const TOP_SCORES: usize = 10;

time::serde::format_description!(
    record_date,
    PrimitiveDateTime,
    "[year]-[month]-[day] [hour]:[minute]:[second]"
);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    /// Seconds from first reveal to win.
    pub time: u32,
    #[serde(with = "record_date")]
    pub date: PrimitiveDateTime,
    pub difficulty: Difficulty,
}

impl ScoreEntry {
    pub fn date_label(&self) -> Result<String> {
        let format = time::macros::format_description!("[year]-[month]-[day] [hour]:[minute]");
        Ok(self.date.format(&format)?)
    }
}

/// Top times per difficulty, fastest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreBoard {
    tiers: BTreeMap<Difficulty, Vec<ScoreEntry>>,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self {
            tiers: Difficulty::ALL
                .into_iter()
                .map(|tier| (tier, Vec::new()))
                .collect(),
        }
    }
}

impl ScoreBoard {
    pub fn entries(&self, difficulty: Difficulty) -> &[ScoreEntry] {
        self.tiers
            .get(&difficulty)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether `secs` would enter the table: a free slot, or strictly faster than the slowest.
    pub fn qualifies(&self, difficulty: Difficulty, secs: u32) -> bool {
        let entries = self.entries(difficulty);
        entries.len() < TOP_SCORES || entries.last().is_some_and(|slowest| secs < slowest.time)
    }

    /// Inserts after any equal times, returns whether the entry survived the cut.
    pub fn insert(&mut self, entry: ScoreEntry) -> bool {
        let tier = self.tiers.entry(entry.difficulty).or_default();
        let rank = tier.partition_point(|existing| existing.time <= entry.time);
        if rank >= TOP_SCORES {
            return false;
        }
        tier.insert(rank, entry);
        tier.truncate(TOP_SCORES);
        true
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Restores ordering and size limits on tables read from disk.
    pub(crate) fn normalize(&mut self) {
        for tier in Difficulty::ALL {
            let entries = self.tiers.entry(tier).or_default();
            entries.sort_by_key(|entry| entry.time);
            entries.truncate(TOP_SCORES);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn entry(name: &str, time: u32) -> ScoreEntry {
        ScoreEntry {
            name: name.into(),
            time,
            date: datetime!(2024-05-01 12:30:00),
            difficulty: Difficulty::Easy,
        }
    }

    fn names(board: &ScoreBoard) -> Vec<&str> {
        board
            .entries(Difficulty::Easy)
            .iter()
            .map(|entry| entry.name.as_str())
            .collect()
    }

    #[test]
    fn keeps_fastest_first_and_ties_in_arrival_order() {
        let mut board = ScoreBoard::default();

        assert!(board.insert(entry("slow", 90)));
        assert!(board.insert(entry("fast", 12)));
        assert!(board.insert(entry("tie", 90)));

        assert_eq!(names(&board), vec!["fast", "slow", "tie"]);
    }

    #[test]
    fn full_table_drops_slowest() {
        let mut board = ScoreBoard::default();
        for secs in 1..=10 {
            board.insert(entry(&format!("p{secs}"), secs * 10));
        }

        assert!(!board.qualifies(Difficulty::Easy, 100));
        assert!(!board.insert(entry("late", 100)));
        assert!(board.qualifies(Difficulty::Easy, 99));
        assert!(board.insert(entry("quick", 5)));

        let entries = board.entries(Difficulty::Easy);
        assert_eq!(entries.len(), TOP_SCORES);
        assert_eq!(entries[0].name, "quick");
        assert_eq!(entries[9].time, 90);
    }

    #[test]
    fn tiers_are_independent() {
        let mut board = ScoreBoard::default();
        board.insert(ScoreEntry {
            difficulty: Difficulty::Hard,
            ..entry("hard", 300)
        });

        assert!(board.entries(Difficulty::Easy).is_empty());
        assert_eq!(board.entries(Difficulty::Hard).len(), 1);

        board.clear();
        assert!(board.entries(Difficulty::Hard).is_empty());
    }

    #[test]
    fn serializes_with_tier_keys_and_plain_dates() {
        let mut board = ScoreBoard::default();
        board.insert(entry("Ann", 42));

        let json = serde_json::to_value(&board).unwrap();

        assert_eq!(json["easy"][0]["name"], "Ann");
        assert_eq!(json["easy"][0]["date"], "2024-05-01 12:30:00");
        assert_eq!(json["custom"], serde_json::json!([]));
    }

    #[test]
    fn normalize_sorts_and_fills_missing_tiers() {
        let json = r#"{"easy": [
            {"name": "b", "time": 30, "date": "2024-01-01 10:00:00", "difficulty": "easy"},
            {"name": "a", "time": 10, "date": "2024-01-01 09:00:00", "difficulty": "easy"}
        ]}"#;
        let mut board: ScoreBoard = serde_json::from_str(json).unwrap();

        board.normalize();

        assert_eq!(names(&board), vec!["a", "b"]);
        assert!(board.entries(Difficulty::Medium).is_empty());
        assert_eq!(board.entries(Difficulty::Easy)[0].date_label().unwrap(), "2024-01-01 09:00");
    }
}
