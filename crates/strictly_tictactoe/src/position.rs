//! Named board positions, numbered 1-9 in row-major order.

use super::error::BoardError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A cell on the tic-tac-toe board.
///
/// Players address cells by number, the way the keypad layout reads:
///
/// ```text
/// 1 | 2 | 3
/// 4 | 5 | 6
/// 7 | 8 | 9
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Position {
    /// Top-left (1)
    TopLeft,
    /// Top-center (2)
    TopCenter,
    /// Top-right (3)
    TopRight,
    /// Middle-left (4)
    MiddleLeft,
    /// Center (5)
    Center,
    /// Middle-right (6)
    MiddleRight,
    /// Bottom-left (7)
    BottomLeft,
    /// Bottom-center (8)
    BottomCenter,
    /// Bottom-right (9)
    BottomRight,
}

impl Position {
    /// All 9 positions in ascending order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Get label for this position (for display).
    pub fn label(self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Converts position to its cell number (1-9).
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Converts position to a zero-based array index (0-8).
    pub(crate) fn index(self) -> usize {
        match self {
            Position::TopLeft => 0,
            Position::TopCenter => 1,
            Position::TopRight => 2,
            Position::MiddleLeft => 3,
            Position::Center => 4,
            Position::MiddleRight => 5,
            Position::BottomLeft => 6,
            Position::BottomCenter => 7,
            Position::BottomRight => 8,
        }
    }

    /// Creates position from its cell number, `None` outside 1-9.
    #[instrument]
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1..=9 => Some(Self::ALL[usize::from(number - 1)]),
            _ => None,
        }
    }

    /// Parses user input such as `"5"` or `"center"`.
    ///
    /// Numbers are tried first; otherwise a case-insensitive label match.
    #[instrument]
    pub fn parse(input: &str) -> Result<Self, BoardError> {
        let trimmed = input.trim();
        if let Ok(number) = trimmed.parse::<u8>() {
            return Self::try_from(number);
        }

        let lower = trimmed.to_lowercase();
        <Position as strum::IntoEnumIterator>::iter()
            .find(|pos| !lower.is_empty() && pos.label().to_lowercase() == lower)
            .ok_or(BoardError::Unrecognized(trimmed.to_string()))
    }
}

impl TryFrom<u8> for Position {
    type Error = BoardError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::from_number(number).ok_or(BoardError::InvalidPosition(number))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}
