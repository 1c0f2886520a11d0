//! Console command parsing

use std::path::PathBuf;
use thiserror::Error;

use crate::state::SessionKind;

/// Longest value the duration picker offers, in minutes
pub const PICKER_MAX_MINUTES: u64 = 60;
/// Shortest value the duration picker offers, in minutes
pub const PICKER_MIN_MINUTES: u64 = 1;

/// A user action read from the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Reset,
    Toggle,
    SwitchTo(SessionKind),
    /// Shift a duration by a signed number of seconds
    Adjust(SessionKind, i64),
    /// Set a duration to an absolute number of minutes
    Set(SessionKind, u64),
    Status,
    Export(PathBuf),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("no command given")]
    Empty,
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),
    #[error("'{0}' is not a valid number of minutes")]
    InvalidMinutes(String),
    #[error("duration must be between 1 and 60 minutes, got {0}")]
    MinutesOutOfRange(u64),
    #[error("usage: {0}")]
    Usage(&'static str),
}

impl Command {
    /// Parse one line of console input
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };
        let args: Vec<&str> = words.collect();

        let command = match (head.to_lowercase().as_str(), args.as_slice()) {
            ("start" | "s", []) => Command::Start,
            ("pause" | "p", []) => Command::Pause,
            ("reset" | "r", []) => Command::Reset,
            ("toggle" | "t", []) => Command::Toggle,
            ("work" | "w", []) => Command::SwitchTo(SessionKind::Work),
            ("break" | "b", []) => Command::SwitchTo(SessionKind::Break),
            ("work" | "w", [delta]) => Command::Adjust(SessionKind::Work, parse_delta(delta)?),
            ("break" | "b", [delta]) => Command::Adjust(SessionKind::Break, parse_delta(delta)?),
            ("set", [kind, minutes]) => Command::Set(parse_kind(kind)?, parse_picker_minutes(minutes)?),
            ("set", _) => return Err(CommandError::Usage("set work|break MINUTES")),
            ("status", []) => Command::Status,
            ("export", [path]) => Command::Export(PathBuf::from(path)),
            ("export", _) => return Err(CommandError::Usage("export PATH")),
            ("help" | "?", []) => Command::Help,
            ("quit" | "q" | "exit", []) => Command::Quit,
            _ => return Err(CommandError::Unknown(line.trim().to_string())),
        };

        Ok(command)
    }
}

/// `+N` / `-N` minutes into signed seconds
fn parse_delta(raw: &str) -> Result<i64, CommandError> {
    if !raw.starts_with(['+', '-']) {
        return Err(CommandError::Usage("work|break +N|-N (use 'set' for an absolute value)"));
    }
    raw.parse::<i64>()
        .ok()
        .and_then(|minutes| minutes.checked_mul(60))
        .ok_or_else(|| CommandError::InvalidMinutes(raw.to_string()))
}

fn parse_kind(raw: &str) -> Result<SessionKind, CommandError> {
    match raw.to_lowercase().as_str() {
        "work" | "w" => Ok(SessionKind::Work),
        "break" | "b" => Ok(SessionKind::Break),
        _ => Err(CommandError::Usage("set work|break MINUTES")),
    }
}

fn parse_picker_minutes(raw: &str) -> Result<u64, CommandError> {
    let minutes = raw
        .parse::<u64>()
        .map_err(|_| CommandError::InvalidMinutes(raw.to_string()))?;
    if !(PICKER_MIN_MINUTES..=PICKER_MAX_MINUTES).contains(&minutes) {
        return Err(CommandError::MinutesOutOfRange(minutes));
    }
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_actions() {
        assert_eq!(Command::parse("start"), Ok(Command::Start));
        assert_eq!(Command::parse("  P "), Ok(Command::Pause));
        assert_eq!(Command::parse("toggle"), Ok(Command::Toggle));
        assert_eq!(Command::parse("break"), Ok(Command::SwitchTo(SessionKind::Break)));
        assert_eq!(Command::parse("q"), Ok(Command::Quit));
    }

    #[test]
    fn parses_signed_adjustments_in_minutes() {
        assert_eq!(Command::parse("work +5"), Ok(Command::Adjust(SessionKind::Work, 300)));
        assert_eq!(Command::parse("break -1"), Ok(Command::Adjust(SessionKind::Break, -60)));
        assert!(matches!(Command::parse("work 5"), Err(CommandError::Usage(_))));
        assert_eq!(
            Command::parse("work +abc"),
            Err(CommandError::InvalidMinutes("+abc".to_string()))
        );
    }

    #[test]
    fn set_respects_picker_range() {
        assert_eq!(Command::parse("set work 45"), Ok(Command::Set(SessionKind::Work, 45)));
        assert_eq!(Command::parse("set b 1"), Ok(Command::Set(SessionKind::Break, 1)));
        assert_eq!(Command::parse("set work 61"), Err(CommandError::MinutesOutOfRange(61)));
        assert_eq!(Command::parse("set work 0"), Err(CommandError::MinutesOutOfRange(0)));
        assert!(matches!(Command::parse("set lunch 5"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn rejects_unknown_and_empty_input() {
        assert_eq!(Command::parse("   "), Err(CommandError::Empty));
        assert_eq!(Command::parse("dance"), Err(CommandError::Unknown("dance".to_string())));
        assert_eq!(
            Command::parse("export /tmp/settings.json"),
            Ok(Command::Export(PathBuf::from("/tmp/settings.json")))
        );
    }
}
