//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One side of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Participant {
    /// The person at the keyboard.
    Human,
    /// The computer opponent.
    Computer,
}

impl Participant {
    /// Returns the other participant.
    pub fn opponent(self) -> Self {
        match self {
            Participant::Human => Participant::Computer,
            Participant::Computer => Participant::Human,
        }
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Participant::Human => write!(f, "Human"),
            Participant::Computer => write!(f, "Computer"),
        }
    }
}

/// Content of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Marker {
    /// Nobody has played here.
    #[default]
    Blank,
    /// Claimed by a participant.
    Placed(Participant),
}

impl Marker {
    /// Returns true if nobody has played here.
    pub fn is_blank(self) -> bool {
        matches!(self, Marker::Blank)
    }

    /// Returns the participant holding this cell, if any.
    pub fn owner(self) -> Option<Participant> {
        match self {
            Marker::Blank => None,
            Marker::Placed(participant) => Some(participant),
        }
    }
}

impl From<Participant> for Marker {
    fn from(participant: Participant) -> Self {
        Marker::Placed(participant)
    }
}

/// A single printable character used to draw one participant's marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Symbol(char);

/// Why a character cannot be used as a [`Symbol`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SymbolError {
    /// No character was given.
    #[display("Marker must be a single character, got nothing")]
    Empty,
    /// More than one character was given.
    #[display("Marker must be a single character, got {:?}", _0)]
    TooLong(String),
    /// Whitespace and control characters are reserved for blank cells.
    #[display("Marker {:?} is not printable", _0)]
    NotPrintable(char),
    /// Digits 1-9 label blank cells on the rendered board.
    #[display("Marker {:?} would look like an empty square", _0)]
    SquareLabel(char),
    /// Both participants chose the same character.
    #[display("Marker {:?} is already taken by the opponent", _0)]
    Duplicate(char),
}

impl std::error::Error for SymbolError {}

impl Symbol {
    /// Validates a character as a marker symbol.
    #[instrument]
    pub fn new(c: char) -> Result<Self, SymbolError> {
        if c.is_whitespace() || c.is_control() {
            return Err(SymbolError::NotPrintable(c));
        }
        if ('1'..='9').contains(&c) {
            return Err(SymbolError::SquareLabel(c));
        }
        Ok(Self(c))
    }

    /// Parses a symbol from user text, ignoring surrounding whitespace.
    #[instrument]
    pub fn parse(text: &str) -> Result<Self, SymbolError> {
        let trimmed = text.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Err(SymbolError::Empty),
            (Some(c), None) => Self::new(c),
            (Some(_), Some(_)) => Err(SymbolError::TooLong(trimmed.to_string())),
        }
    }

    /// Returns the underlying character.
    pub fn as_char(self) -> char {
        self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two symbols in play. They never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_getters::Getters)]
pub struct Markers {
    /// Drawn for the human's marks.
    human: Symbol,
    /// Drawn for the computer's marks.
    computer: Symbol,
}

impl Markers {
    /// Pairs two symbols, rejecting identical ones.
    #[instrument]
    pub fn new(human: Symbol, computer: Symbol) -> Result<Self, SymbolError> {
        if human == computer {
            return Err(SymbolError::Duplicate(human.as_char()));
        }
        Ok(Self { human, computer })
    }

    /// Returns the symbol drawn for `participant`.
    pub fn symbol_for(&self, participant: Participant) -> Symbol {
        match participant {
            Participant::Human => self.human,
            Participant::Computer => self.computer,
        }
    }
}

impl Default for Markers {
    /// `X` against the Terminator's `T`.
    fn default() -> Self {
        Self {
            human: Symbol('X'),
            computer: Symbol('T'),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_flips() {
        assert_eq!(Participant::Human.opponent(), Participant::Computer);
        assert_eq!(Participant::Computer.opponent(), Participant::Human);
    }

    #[test]
    fn test_marker_owner() {
        assert_eq!(Marker::Blank.owner(), None);
        assert_eq!(Marker::from(Participant::Human).owner(), Some(Participant::Human));
        assert!(Marker::default().is_blank());
    }

    #[test]
    fn test_symbol_parse() {
        assert_eq!(Symbol::parse(" X ").map(Symbol::as_char), Ok('X'));
        assert_eq!(Symbol::parse(""), Err(SymbolError::Empty));
        assert!(matches!(Symbol::parse("XO"), Err(SymbolError::TooLong(_))));
        assert_eq!(Symbol::new('\t'), Err(SymbolError::NotPrintable('\t')));
    }

    #[test]
    fn test_symbol_rejects_square_labels() {
        assert_eq!(Symbol::parse("2"), Err(SymbolError::SquareLabel('2')));
        assert_eq!(Symbol::new('9'), Err(SymbolError::SquareLabel('9')));
        assert_eq!(Symbol::new('0').map(Symbol::as_char), Ok('0'));
    }

    #[test]
    fn test_markers_must_differ() {
        let x = Symbol::new('X').unwrap();
        let o = Symbol::new('O').unwrap();
        assert!(Markers::new(x, o).is_ok());
        assert_eq!(Markers::new(x, x), Err(SymbolError::Duplicate('X')));
        let markers = Markers::new(x, o).unwrap();
        assert_eq!(markers.symbol_for(Participant::Computer), o);
    }
}
