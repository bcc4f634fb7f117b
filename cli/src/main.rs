mod command;
mod render;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use seasweeper_core::*;
use seasweeper_records::*;

use crate::command::{Command, HELP};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Level {
    Easy,
    Medium,
    Hard,
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Easy => Self::Easy,
            Level::Medium => Self::Medium,
            Level::Hard => Self::Hard,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "seasweeper", version, about = "Minesweeper in the terminal")]
struct Cli {
    /// Preset board, ignored when a custom size is given
    #[arg(long, value_enum, default_value_t = Level::Easy)]
    difficulty: Level,
    /// Custom board width
    #[arg(long, requires_all = ["height", "mines"], conflicts_with = "difficulty")]
    width: Option<Coord>,
    /// Custom board height
    #[arg(long, requires_all = ["width", "mines"])]
    height: Option<Coord>,
    /// Custom mine count
    #[arg(long, requires_all = ["width", "height"])]
    mines: Option<CellCount>,
    /// Fixed seed, reused by every new game
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value = DEFAULT_RECORDS_FILE)]
    records: PathBuf,
    #[arg(long, default_value = DEFAULT_PLAYER_FILE)]
    player: PathBuf,
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let config = match (self.width, self.height, self.mines) {
            (Some(width), Some(height), Some(mines)) => GameConfig::new(width, height, mines)?,
            _ => Difficulty::from(self.difficulty)
                .preset()
                .ok_or(ConfigError::NoPreset)?,
        };
        Ok(config)
    }
}

fn init_logging(level: log::LevelFilter) {
    use tracing_subscriber::filter::LevelFilter;

    let max_level = match level {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(io::stderr)
        .init();
}

fn new_session(config: GameConfig, seed: Option<u64>) -> GameSession {
    match seed {
        Some(seed) => GameSession::with_generator(config, RandomMineGenerator::new(seed)),
        None => GameSession::new(config),
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct App {
    config: GameConfig,
    seed: Option<u64>,
    session: GameSession,
    records: RecordsFile,
    profile: PlayerProfile,
}

impl App {
    fn handle(&mut self, command: Command, out: &mut impl Write) -> io::Result<Flow> {
        match command {
            Command::Reveal(coords) => {
                let outcome = self.session.reveal(coords);
                self.report_reveal(outcome, out)?;
            }
            Command::Chord(coords) => {
                let outcome = self.session.chord(coords);
                self.report_reveal(outcome, out)?;
            }
            Command::Flag(coords) => match self.session.toggle_flag(coords) {
                MarkOutcome::Ignored => self.report_ignored(out)?,
                MarkOutcome::Won { .. } => {
                    self.show_board(out)?;
                    self.report_win(out)?;
                }
                MarkOutcome::Flagged | MarkOutcome::Unflagged => self.show_board(out)?,
            },
            Command::Records => write!(out, "{}", render::records(self.records.board()))?,
            Command::Rename(name) => match self.profile.rename(&name) {
                Ok(()) => writeln!(out, "Playing as {}", self.profile.name())?,
                Err(RecordsError::BlankName) => writeln!(out, "Name must not be blank")?,
                Err(err) => {
                    log::warn!("Could not save player name: {err}");
                    writeln!(out, "Playing as {} (not saved)", self.profile.name())?;
                }
            },
            Command::ClearRecords => {
                self.records.clear();
                writeln!(out, "Records cleared")?;
            }
            Command::New => {
                self.session = new_session(self.config, self.seed);
                self.show_board(out)?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn report_reveal(&mut self, outcome: RevealOutcome, out: &mut impl Write) -> io::Result<()> {
        match outcome {
            RevealOutcome::Ignored => self.report_ignored(out),
            RevealOutcome::Revealed(_) => self.show_board(out),
            RevealOutcome::Won(_) => {
                self.show_board(out)?;
                self.report_win(out)
            }
            RevealOutcome::HitMine { mine: (x, y), .. } => {
                self.show_board(out)?;
                writeln!(out, "Boom! Mine at {x} {y}. Type `new` to play again.")
            }
        }
    }

    fn report_ignored(&self, out: &mut impl Write) -> io::Result<()> {
        if self.session.is_finished() {
            writeln!(out, "Game over. Type `new` to play again.")
        } else {
            writeln!(out, "Nothing to do there.")
        }
    }

    fn report_win(&mut self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Cleared in {}s!", self.session.elapsed_seconds())?;
        if let Some(true) = self
            .session
            .submit_score(&mut self.records, self.profile.name())
        {
            writeln!(out, "New {} record!", self.session.difficulty())?;
        }
        Ok(())
    }

    fn show_board(&self, out: &mut impl Write) -> io::Result<()> {
        let snapshot = self.session.snapshot();
        writeln!(out, "{}", render::hud(&snapshot))?;
        write!(out, "{}", render::board(&snapshot))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose.log_level_filter());

    let config = cli.game_config().context("invalid board settings")?;
    let mut app = App {
        config,
        seed: cli.seed,
        session: new_session(config, cli.seed),
        records: RecordsFile::open(&cli.records),
        profile: PlayerProfile::load(&cli.player),
    };
    log::info!("Starting {} game on {:?}", app.session.difficulty(), config.size());

    let mut out = io::stdout().lock();
    writeln!(out, "Playing as {}. Type `help` for commands.", app.profile.name())?;
    app.show_board(&mut out)?;
    out.flush()?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }
        let flow = match line.parse::<Command>() {
            Ok(command) => app.handle(command, &mut out)?,
            Err(err) => {
                writeln!(out, "{err}")?;
                Flow::Continue
            }
        };
        if flow == Flow::Quit {
            break;
        }
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        std::env::temp_dir().join(format!("seasweeper_cli_{name}_{nanos}"))
    }

    fn app(records: PathBuf) -> App {
        let config = GameConfig::new(5, 5, 3).unwrap();
        let mines = FixedMineGenerator::new([(0, 0), (2, 0), (0, 3)]);
        App {
            config,
            seed: Some(1),
            session: GameSession::with_generator(config, mines),
            records: RecordsFile::open(records),
            profile: PlayerProfile::load(temp_path("player.txt")),
        }
    }

    fn run(app: &mut App, lines: &[&str]) -> String {
        let mut out = Vec::new();
        for line in lines {
            let command = line.parse::<Command>().unwrap();
            app.handle(command, &mut out).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn cli_accepts_presets_and_custom_boards() {
        let cli = Cli::try_parse_from(["seasweeper", "--difficulty", "hard"]).unwrap();
        assert_eq!(cli.game_config().unwrap(), Difficulty::Hard.preset().unwrap());

        let cli = Cli::try_parse_from(["seasweeper", "--width", "8", "--height", "6", "--mines", "5"])
            .unwrap();
        assert_eq!(cli.game_config().unwrap(), GameConfig::new(8, 6, 5).unwrap());

        assert!(Cli::try_parse_from(["seasweeper", "--width", "8"]).is_err());
        let cli = Cli::try_parse_from(["seasweeper", "--width", "4", "--height", "6", "--mines", "1"])
            .unwrap();
        assert!(cli.game_config().is_err());
    }

    #[test]
    fn winning_submits_a_record() {
        let path = temp_path("records.json");
        let mut app = app(path.clone());

        let output = run(&mut app, &["r 4 4", "r 1 0", "r 0 1", "r 0 2", "r 0 4"]);

        assert!(output.contains("Cleared in"));
        assert!(output.contains("New custom record!"));
        assert_eq!(app.session.state(), SessionState::Won);
        let saved = RecordsFile::load(&path).unwrap();
        assert_eq!(saved.entries(Difficulty::Custom)[0].name, DEFAULT_PLAYER_NAME);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn moves_after_a_loss_are_refused() {
        let mut app = app(temp_path("unused.json"));

        let output = run(&mut app, &["r 4 4", "r 0 0", "f 1 0"]);

        assert!(output.contains("Boom! Mine at 0 0"));
        assert!(output.ends_with("Game over. Type `new` to play again.\n"));
    }

    #[test]
    fn new_game_resets_the_board() {
        let mut app = app(temp_path("unused.json"));
        run(&mut app, &["r 4 4"]);

        run(&mut app, &["new"]);

        assert_eq!(app.session.state(), SessionState::NotStarted);
        assert_eq!(app.session.revealed_count(), 0);
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut app = app(temp_path("unused.json"));
        let mut out = Vec::new();

        assert_eq!(app.handle(Command::Quit, &mut out).unwrap(), Flow::Quit);
        assert_eq!(app.handle(Command::Help, &mut out).unwrap(), Flow::Continue);
    }
}
