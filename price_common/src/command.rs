//! Operator commands read from the console.
//!
//! Exactly two commands exist. Parsing is an exact, case-sensitive match on the
//! trimmed line, anything else is not a command.
use std::str::FromStr;

use strum_macros::{Display, EnumString};

/// Prompt printed before the first command is read.
pub const PROMPT: &str = "Enter command (START to begin, STOP to end): ";

/// A console command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Command {
    /// Load the configuration and start the workers.
    #[strum(serialize = "START")]
    Start,
    /// Stop the workers, drain the output and exit.
    #[strum(serialize = "STOP")]
    Stop,
}

impl Command {
    /// Parse one console line, ignoring surrounding whitespace.
    pub fn parse_line(line: &str) -> Option<Self> {
        Command::from_str(line.trim()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_trims_newline() {
        assert_eq!(Command::parse_line("START\n"), Some(Command::Start));
        assert_eq!(Command::parse_line("  STOP \r\n"), Some(Command::Stop));
    }

    #[test]
    fn test_parse_line_is_case_sensitive() {
        assert_eq!(Command::parse_line("start"), None);
        assert_eq!(Command::parse_line("Stop"), None);
        assert_eq!(Command::parse_line(""), None);
        assert_eq!(Command::parse_line("STARTED"), None);
    }

    #[test]
    fn test_display_matches_console_keyword() {
        assert_eq!(Command::Start.to_string(), "START");
        assert_eq!(Command::Stop.to_string(), "STOP");
    }
}
