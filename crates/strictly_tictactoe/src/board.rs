//! The 3x3 board and its line scans.

use super::error::BoardError;
use super::lines::{Threat, WinningLines};
use super::position::Position;
use super::types::{Marker, Markers, Participant};
use serde::Serialize;
use tracing::{debug, instrument};

/// A single cell: where it is and what it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Square {
    position: Position,
    marker: Marker,
}

impl Square {
    /// Creates a blank square at `position`.
    pub fn blank(position: Position) -> Self {
        Self {
            position,
            marker: Marker::Blank,
        }
    }

    /// Where this square sits.
    pub fn position(&self) -> Position {
        self.position
    }

    /// What this square holds.
    pub fn marker(&self) -> Marker {
        self.marker
    }

    /// Returns true if nobody has played here.
    pub fn is_blank(&self) -> bool {
        self.marker.is_blank()
    }

    /// Claims a blank square. A marked square is never overwritten.
    fn claim(&mut self, participant: Participant) -> Result<(), BoardError> {
        if !self.is_blank() {
            return Err(BoardError::SquareOccupied(self.position));
        }
        self.marker = Marker::Placed(participant);
        Ok(())
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    /// Squares in row-major order.
    squares: [Square; 9],
    lines: WinningLines,
}

impl Board {
    /// Creates an empty board over the standard winning lines.
    pub fn new() -> Self {
        Self::with_lines(WinningLines::standard())
    }

    /// Creates an empty board scanning the given winning lines.
    pub fn with_lines(lines: WinningLines) -> Self {
        Self {
            squares: Position::ALL.map(Square::blank),
            lines,
        }
    }

    /// Places `participant`'s marker on the square numbered `number` (1-9).
    ///
    /// # Errors
    ///
    /// - [`BoardError::InvalidPosition`] if `number` is outside 1-9.
    /// - [`BoardError::SquareOccupied`] if the square is already marked.
    #[instrument(skip(self))]
    pub fn place_marker(&mut self, number: u8, participant: Participant) -> Result<Position, BoardError> {
        let position = Position::try_from(number)?;
        self.place(position, participant)?;
        Ok(position)
    }

    /// Places `participant`'s marker at an already-resolved position.
    #[instrument(skip(self))]
    pub fn place(&mut self, position: Position, participant: Participant) -> Result<(), BoardError> {
        self.squares[position.index()].claim(participant)?;
        debug!(%position, ?participant, "Marker placed");
        Ok(())
    }

    /// Returns the square at `position`.
    pub fn square(&self, position: Position) -> Square {
        self.squares[position.index()]
    }

    /// Returns the marker at `position`.
    pub fn marker(&self, position: Position) -> Marker {
        self.square(position).marker
    }

    /// Checks if a square is blank.
    pub fn is_empty(&self, position: Position) -> bool {
        self.square(position).is_blank()
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Returns the winning lines this board scans.
    pub fn lines(&self) -> &WinningLines {
        &self.lines
    }

    /// Blank positions in ascending order.
    pub fn empty_positions(&self) -> Vec<Position> {
        self.squares
            .iter()
            .filter(|square| square.is_blank())
            .map(Square::position)
            .collect()
    }

    /// Checks if the board is full.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|square| !square.is_blank())
    }

    /// Returns the owner of the first completed line, in canonical order.
    pub fn winner(&self) -> Option<Participant> {
        self.lines.iter().find_map(|line| {
            let [a, b, c] = line.positions().map(|pos| self.marker(pos));
            match a {
                Marker::Placed(participant) if a == b && b == c => Some(participant),
                _ => None,
            }
        })
    }

    /// Returns every line that is one move from completion, in canonical order.
    ///
    /// A line qualifies when exactly two of its cells hold the same
    /// participant's marker and the third is blank. Completed lines and
    /// lines shared by both participants never qualify.
    pub fn find_threats(&self) -> Vec<Threat> {
        self.lines
            .iter()
            .filter_map(|line| {
                let mut open = None;
                let mut owner = None;
                for pos in line.positions() {
                    match self.marker(pos) {
                        Marker::Blank if open.is_none() => open = Some(pos),
                        Marker::Blank => return None,
                        Marker::Placed(p) if owner.is_none_or(|o| o == p) => owner = Some(p),
                        Marker::Placed(_) => return None,
                    }
                }
                Some(Threat::new(*line, owner?, open?))
            })
            .collect()
    }

    /// Sets every square back to blank. The winning lines are untouched.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.squares = Position::ALL.map(Square::blank);
        debug!("Board reset");
    }

    /// Draws the board; blank squares show their number.
    pub fn render(&self, markers: &Markers) -> String {
        let cell = |pos: Position| match self.marker(pos) {
            Marker::Blank => pos.number().to_string(),
            Marker::Placed(p) => markers.symbol_for(p).to_string(),
        };

        let rows: Vec<String> = Position::ALL
            .chunks(3)
            .map(|row| {
                let cells: Vec<String> = row.iter().map(|&pos| format!(" {} ", cell(pos))).collect();
                cells.join("|")
            })
            .collect();
        rows.join("\n---+---+---\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
