//! The eight winning lines of a 3x3 board.

use super::position::Position;
use super::types::Participant;
use serde::Serialize;

/// An ordered triple of positions that wins when uniformly marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_new::new)]
pub struct Line([Position; 3]);

impl Line {
    /// The three positions, in order.
    pub fn positions(&self) -> [Position; 3] {
        self.0
    }

    /// Returns true if `position` lies on this line.
    pub fn contains(&self, position: Position) -> bool {
        self.0.contains(&position)
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{}-{}-{}", a, b, c)
    }
}

const CANONICAL: [Line; 8] = [
    // Rows
    Line([Position::TopLeft, Position::TopCenter, Position::TopRight]),
    Line([Position::MiddleLeft, Position::Center, Position::MiddleRight]),
    Line([Position::BottomLeft, Position::BottomCenter, Position::BottomRight]),
    // Columns
    Line([Position::TopLeft, Position::MiddleLeft, Position::BottomLeft]),
    Line([Position::TopCenter, Position::Center, Position::BottomCenter]),
    Line([Position::TopRight, Position::MiddleRight, Position::BottomRight]),
    // Diagonals
    Line([Position::TopLeft, Position::Center, Position::BottomRight]),
    Line([Position::TopRight, Position::Center, Position::BottomLeft]),
];

/// The fixed set of winning lines, in canonical scan order.
///
/// Rows top to bottom, columns left to right, then the two diagonals.
/// Every scan over the board (wins, threats, computer tie-breaks)
/// follows this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WinningLines {
    lines: [Line; 8],
}

impl WinningLines {
    /// The standard rows, columns and diagonals.
    pub const fn standard() -> Self {
        Self { lines: CANONICAL }
    }

    /// Iterates over the lines in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// Lines passing through `position`, in canonical order.
    pub fn through(&self, position: Position) -> impl Iterator<Item = &Line> {
        self.lines.iter().filter(move |line| line.contains(position))
    }
}

impl Default for WinningLines {
    fn default() -> Self {
        Self::standard()
    }
}

/// A line one move away from completion.
///
/// Two cells hold the same participant's marker and the third is blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_new::new, derive_getters::Getters)]
pub struct Threat {
    /// The line under threat.
    line: Line,
    /// Whose two markers sit on the line.
    owner: Participant,
    /// The blank cell that completes the line.
    open: Position,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_position_on_expected_lines() {
        let lines = WinningLines::standard();
        assert_eq!(lines.iter().count(), 8);
        assert_eq!(lines.through(Position::Center).count(), 4);
        assert_eq!(lines.through(Position::TopLeft).count(), 3);
        assert_eq!(lines.through(Position::TopCenter).count(), 2);
    }

    #[test]
    fn test_canonical_order() {
        let lines: Vec<String> = WinningLines::standard().iter().map(Line::to_string).collect();
        assert_eq!(
            lines,
            ["1-2-3", "4-5-6", "7-8-9", "1-4-7", "2-5-8", "3-6-9", "1-5-9", "3-5-7"]
        );
    }
}
