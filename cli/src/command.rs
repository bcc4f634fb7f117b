use std::str::FromStr;

use seasweeper_core::{Coord, Coord2};
use thiserror::Error;

/// One line of player input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Chord(Coord2),
    Records,
    Rename(String),
    ClearRecords,
    New,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command {0:?}, try `help`")]
    Unknown(String),
    #[error("Expected `{0} X Y`")]
    MissingCoords(&'static str),
    #[error("Not a coordinate: {0:?}")]
    BadCoord(String),
    #[error("Expected `name NEW_NAME`")]
    MissingName,
    #[error("Unexpected input after command: {0:?}")]
    Trailing(String),
}

pub const HELP: &str = "\
commands:
  r X Y        reveal a cell
  f X Y        toggle a flag
  c X Y        open around a satisfied number
  records      show the leaderboard
  name NEW     change player name
  clear-records
  new          start over with the same settings
  quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Self::Reveal(parse_coords("r", rest)?),
            "f" | "flag" => Self::Flag(parse_coords("f", rest)?),
            "c" | "chord" => Self::Chord(parse_coords("c", rest)?),
            "name" if rest.is_empty() => return Err(CommandError::MissingName),
            "name" => return Ok(Self::Rename(rest.to_owned())),
            "records" => Self::Records,
            "clear-records" => Self::ClearRecords,
            "new" => Self::New,
            "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => return Err(CommandError::Unknown(verb.to_owned())),
        };

        match command {
            Self::Reveal(_) | Self::Flag(_) | Self::Chord(_) => Ok(command),
            _ if rest.is_empty() => Ok(command),
            _ => Err(CommandError::Trailing(rest.to_owned())),
        }
    }
}

fn parse_coords(verb: &'static str, args: &str) -> Result<Coord2, CommandError> {
    let mut parts = args.split_whitespace();
    let (Some(x), Some(y)) = (parts.next(), parts.next()) else {
        return Err(CommandError::MissingCoords(verb));
    };
    if let Some(extra) = parts.next() {
        return Err(CommandError::Trailing(extra.to_owned()));
    }
    Ok((parse_axis(x)?, parse_axis(y)?))
}

fn parse_axis(text: &str) -> Result<Coord, CommandError> {
    text.parse()
        .map_err(|_| CommandError::BadCoord(text.to_owned()))
}
