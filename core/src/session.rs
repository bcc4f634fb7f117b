use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No cell revealed yet, mines not laid
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game from first click to win or loss. Sole owner and mutator of its grid.
#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    difficulty: Difficulty,
    grid: Grid,
    mine_positions: BTreeSet<Coord2>,
    generator: Option<Box<dyn MineGenerator>>,
    state: SessionState,
    revealed_count: CellCount,
    flags_placed: CellCount,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
    triggered_mine: Option<Coord2>,
    won_by: Option<WinCondition>,
    score_submitted: bool,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        Self::with_generator(config, RandomMineGenerator::from_entropy())
    }

    pub fn from_difficulty(difficulty: Difficulty) -> Result<Self> {
        let config = difficulty.preset().ok_or(ConfigError::NoPreset)?;
        Ok(Self::new(config))
    }

    /// Session whose mines are chosen by `generator` on the first reveal.
    pub fn with_generator(config: GameConfig, generator: impl MineGenerator + 'static) -> Self {
        Self {
            config,
            difficulty: Difficulty::of(config),
            grid: Grid::new(config.size()),
            mine_positions: BTreeSet::new(),
            generator: Some(Box::new(generator)),
            state: Default::default(),
            revealed_count: 0,
            flags_placed: 0,
            started_at: None,
            ended_at: None,
            triggered_mine: None,
            won_by: None,
            score_submitted: false,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    /// Requested mine count until the first reveal, then the count actually laid.
    pub fn total_mines(&self) -> CellCount {
        if self.state.is_initial() {
            self.config.mines()
        } else {
            // a board never holds more than `CellCount::MAX` cells
            self.mine_positions.len() as CellCount
        }
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flags_placed(&self) -> CellCount {
        self.flags_placed
    }

    /// Mines minus flags, negative once more flags than mines are down.
    pub fn remaining_mines(&self) -> i32 {
        i32::from(self.total_mines()) - i32::from(self.flags_placed)
    }

    /// The mine that ended a lost game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn won_by(&self) -> Option<WinCondition> {
        self.won_by
    }

    /// Laid mines; empty until the first reveal.
    pub fn mine_positions(&self) -> &BTreeSet<Coord2> {
        &self.mine_positions
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell_view(&self, coords: Coord2) -> Option<CellView> {
        self.grid.get(coords).map(Cell::view)
    }

    /// Whole seconds since the first reveal, frozen once the game ends, 0 before it starts.
    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds_at(Instant::now())
    }

    pub fn elapsed_seconds_at(&self, now: Instant) -> u32 {
        let Some(started_at) = self.started_at else {
            return 0;
        };
        let until = self.ended_at.unwrap_or(now);
        let secs = until.saturating_duration_since(started_at).as_secs();
        u32::try_from(secs).unwrap_or(u32::MAX)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_session(self)
    }

    /// Opens a hidden cell. The first reveal lays the mines around it.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if self.state.is_finished() {
            return RevealOutcome::Ignored;
        }
        match self.grid.get(coords) {
            Some(cell) if cell.is_hidden() => {}
            _ => return RevealOutcome::Ignored,
        }

        if self.state.is_initial() {
            self.start(coords);
        }

        let reveal = RevealEngine::new(&mut self.grid).reveal(coords);
        self.apply(reveal)
    }

    /// Opens the hidden neighbors of a revealed number whose flags are all placed.
    pub fn chord(&mut self, coords: Coord2) -> RevealOutcome {
        if !matches!(self.state, SessionState::InProgress) || !self.grid.contains(coords) {
            return RevealOutcome::Ignored;
        }

        let reveal = RevealEngine::new(&mut self.grid).chord(coords);
        self.apply(reveal)
    }

    /// Flags or unflags a cell that is not revealed. Allowed before the first reveal.
    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        if self.state.is_finished() {
            return MarkOutcome::Ignored;
        }
        let Some(flagged) = self.grid.get_mut(coords).and_then(Cell::toggle_flag) else {
            return MarkOutcome::Ignored;
        };

        if flagged {
            self.flags_placed += 1;
        } else {
            self.flags_placed = self.flags_placed.saturating_sub(1);
        }
        log::trace!("Flag at {:?} set to {}", coords, flagged);

        match (self.check_win(), flagged) {
            (Some(_), flagged) => MarkOutcome::Won { flagged },
            (None, true) => MarkOutcome::Flagged,
            (None, false) => MarkOutcome::Unflagged,
        }
    }

    /// Reports a won game to `store` once; later calls and unfinished games return `None`.
    pub fn submit_score<S>(&mut self, store: &mut S, player_name: &str) -> Option<bool>
    where
        S: ScoreStore + ?Sized,
    {
        if self.state != SessionState::Won || self.score_submitted {
            return None;
        }
        self.score_submitted = true;

        let elapsed = self.elapsed_seconds();
        let is_record = store.submit_score(self.difficulty, player_name, elapsed);
        log::debug!(
            "Submitted {}s on {} for {:?}, new record: {}",
            elapsed,
            self.difficulty,
            player_name,
            is_record
        );
        Some(is_record)
    }

    fn start(&mut self, safe: Coord2) {
        let Some(mut generator) = self.generator.take() else {
            log::warn!("Session started without a mine generator");
            return;
        };

        let picked = generator.pick_mines(self.size(), safe, self.config.mines());
        self.mine_positions = lay_mines(&mut self.grid, &picked);
        if self.mine_positions.len() != usize::from(self.config.mines()) {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                self.mine_positions.len(),
                self.config.mines()
            );
        }

        let now = Instant::now();
        log::debug!("Started at {:?} with first reveal at {:?}", now, safe);
        self.started_at = Some(now);
        self.state = SessionState::InProgress;
    }

    fn apply(&mut self, reveal: Reveal) -> RevealOutcome {
        match reveal {
            Reveal::Opened(cells) => {
                self.count_revealed(&cells);
                if cells.is_empty() {
                    RevealOutcome::Ignored
                } else if self.check_win().is_some() {
                    RevealOutcome::Won(cells)
                } else {
                    RevealOutcome::Revealed(cells)
                }
            }
            Reveal::Mine { mine, opened } => {
                self.count_revealed(&opened);
                self.lose(mine);
                RevealOutcome::HitMine {
                    mine,
                    revealed: opened,
                }
            }
        }
    }

    fn count_revealed(&mut self, cells: &BTreeSet<Coord2>) {
        // a board never holds more than `CellCount::MAX` cells
        self.revealed_count += cells.len() as CellCount;
    }

    fn check_win(&mut self) -> Option<WinCondition> {
        if self.state != SessionState::InProgress {
            return None;
        }

        let condition = WinDetector {
            grid: &self.grid,
            mine_positions: &self.mine_positions,
            mine_count: self.total_mines(),
            revealed_count: self.revealed_count,
            flags_placed: self.flags_placed,
        }
        .evaluate()?;

        self.state = SessionState::Won;
        self.won_by = Some(condition);
        self.mark_ended();
        log::debug!("Won by {:?} after {}s", condition, self.elapsed_seconds());
        Some(condition)
    }

    fn lose(&mut self, mine: Coord2) {
        self.state = SessionState::Lost;
        self.triggered_mine = Some(mine);
        self.mark_ended();
        log::debug!("Lost on mine at {:?}", mine);

        // show where every other mine was, flags stay in place
        for &pos in &self.mine_positions {
            self.grid[pos].reveal();
        }
    }

    fn mark_ended(&mut self) {
        let now = Instant::now();
        self.ended_at.get_or_insert(now);
    }
}
