//! Menu rendering and choice parsing

use std::fmt;
use std::io::{self, Write};
use thiserror::Error;

/// One entry of the interactive menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Broadcast,
    Targeted,
    PriorityTest,
    List,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 5] = [
        MenuChoice::Broadcast,
        MenuChoice::Targeted,
        MenuChoice::PriorityTest,
        MenuChoice::List,
        MenuChoice::Exit,
    ];

    /// Number the operator types to pick this entry
    pub fn number(self) -> i64 {
        match self {
            MenuChoice::Broadcast => 1,
            MenuChoice::Targeted => 2,
            MenuChoice::PriorityTest => 3,
            MenuChoice::List => 4,
            MenuChoice::Exit => 5,
        }
    }

    pub fn from_number(n: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|choice| choice.number() == n)
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Broadcast => "Broadcast notification",
            MenuChoice::Targeted => "Targeted notification",
            MenuChoice::PriorityTest => "Multiple notifications (priority test)",
            MenuChoice::List => "List notifications",
            MenuChoice::Exit => "Exit",
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    /// Empty line, non-numeric token, or more than one token
    #[error("Invalid input. Please enter a number between 1-5.")]
    InvalidInput,

    #[error("Invalid choice. Please enter a number between 1-5.")]
    OutOfRange(i64),
}

/// Parse one line of operator input into a menu choice
///
/// The line must hold exactly one integer token; surrounding whitespace is
/// ignored.
pub fn parse_choice(line: &str) -> Result<MenuChoice, MenuError> {
    let mut tokens = line.split_whitespace();

    let (Some(token), None) = (tokens.next(), tokens.next()) else {
        return Err(MenuError::InvalidInput);
    };

    let n: i64 = token.parse().map_err(|_| MenuError::InvalidInput)?;
    MenuChoice::from_number(n).ok_or(MenuError::OutOfRange(n))
}

/// Parse a raw input line; bytes that are not UTF-8 are invalid input
pub fn parse_choice_bytes(line: &[u8]) -> Result<MenuChoice, MenuError> {
    let line = std::str::from_utf8(line).map_err(|_| MenuError::InvalidInput)?;
    parse_choice(line)
}

/// Print the banner, the numbered entries and the prompt
///
/// The prompt has no trailing newline, so the writer is flushed.
pub fn write_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\n========================================")?;
    writeln!(out, "🔔 NATS Notification Test Client")?;
    writeln!(out, "========================================")?;
    writeln!(out, "Connected to NATS server ✅")?;
    writeln!(out, "\nChoose test:")?;
    for choice in MenuChoice::ALL {
        writeln!(out, "{}", choice)?;
    }
    write!(out, "\nEnter choice (1-5): ")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_each_choice() {
        assert_eq!(parse_choice("1"), Ok(MenuChoice::Broadcast));
        assert_eq!(parse_choice("2"), Ok(MenuChoice::Targeted));
        assert_eq!(parse_choice("3"), Ok(MenuChoice::PriorityTest));
        assert_eq!(parse_choice("4"), Ok(MenuChoice::List));
        assert_eq!(parse_choice("5"), Ok(MenuChoice::Exit));
    }

    #[test]
    fn test_parse_ignores_surrounding_whitespace() {
        assert_eq!(parse_choice("  4 \n"), Ok(MenuChoice::List));
        assert_eq!(parse_choice("+2\r\n"), Ok(MenuChoice::Targeted));
    }

    #[test]
    fn test_parse_empty_line() {
        assert_eq!(parse_choice("\n"), Err(MenuError::InvalidInput));
        assert_eq!(parse_choice(""), Err(MenuError::InvalidInput));
    }

    #[test]
    fn test_parse_non_numeric() {
        assert_eq!(parse_choice("abc\n"), Err(MenuError::InvalidInput));
        assert_eq!(parse_choice("1.5"), Err(MenuError::InvalidInput));
        assert_eq!(parse_choice("99999999999999999999999"), Err(MenuError::InvalidInput));
    }

    #[test]
    fn test_parse_extra_tokens() {
        assert_eq!(parse_choice("1 2\n"), Err(MenuError::InvalidInput));
        assert_eq!(parse_choice("3 please"), Err(MenuError::InvalidInput));
    }

    #[test]
    fn test_parse_out_of_range() {
        assert_eq!(parse_choice("0"), Err(MenuError::OutOfRange(0)));
        assert_eq!(parse_choice("6"), Err(MenuError::OutOfRange(6)));
        assert_eq!(parse_choice("-1"), Err(MenuError::OutOfRange(-1)));
    }

    #[test]
    fn test_parse_bytes() {
        assert_eq!(parse_choice_bytes(b"3\n"), Ok(MenuChoice::PriorityTest));
        assert_eq!(parse_choice_bytes(b"\xff\xfe\n"), Err(MenuError::InvalidInput));
        assert_eq!(parse_choice_bytes(b"4\xff\n"), Err(MenuError::InvalidInput));
    }

    #[test]
    fn test_choice_numbers_round_trip() {
        for choice in MenuChoice::ALL {
            assert_eq!(MenuChoice::from_number(choice.number()), Some(choice));
        }
    }

    #[test]
    fn test_write_menu() {
        let mut out = Vec::new();
        write_menu(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("🔔 NATS Notification Test Client"));
        assert!(text.contains("1. Broadcast notification\n"));
        assert!(text.contains("3. Multiple notifications (priority test)\n"));
        assert!(text.contains("5. Exit\n"));
        assert!(text.ends_with("Enter choice (1-5): "));
    }
}
