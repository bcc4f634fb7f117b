use crate::Difficulty;

/// Leaderboard the session reports wins to.
///
/// Stores own ranking, truncation and their own persistence failures; a failing store must
/// still answer and never disturb the game.
pub trait ScoreStore {
    /// Records a finished game, returns whether it made the top ten for `difficulty`.
    fn submit_score(&mut self, difficulty: Difficulty, player_name: &str, elapsed_secs: u32)
    -> bool;
}
