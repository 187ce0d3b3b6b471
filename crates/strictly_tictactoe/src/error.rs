//! Error types for placement, turn order and match flow.
//!
//! Every error here is recoverable: the caller corrects its input or
//! waits for the right phase and tries again.

use super::position::Position;
use super::types::Participant;

/// Error raised when a placement is rejected by the board.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// The number does not address a cell.
    #[display("Position {} is outside 1-9", _0)]
    InvalidPosition(u8),

    /// The cell already holds a marker.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The input is neither a cell number nor a cell label.
    #[display("{:?} is not a square", _0)]
    Unrecognized(String),
}

impl std::error::Error for BoardError {}

/// Error raised by the turn coordinator.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum TurnError {
    /// The board refused the placement.
    #[display("{}", _0)]
    Board(BoardError),

    /// The other participant holds the turn.
    #[display("It's not {}'s turn", _0)]
    NotYourTurn(Participant),

    /// The round already ended.
    #[display("Round is already over")]
    RoundOver,

    /// The computer was asked to move on a full board.
    #[display("No moves available")]
    NoMovesAvailable,
}

impl std::error::Error for TurnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TurnError::Board(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BoardError> for TurnError {
    fn from(err: BoardError) -> Self {
        TurnError::Board(err)
    }
}

/// Error raised by the match controller.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MatchError {
    /// A turn could not be played.
    #[display("{}", _0)]
    Turn(TurnError),

    /// A champion was crowned; only a full reset starts play again.
    #[display("The match already has a champion")]
    ChampionDecided,

    /// The current round has not finished yet.
    #[display("The current round is still being played")]
    RoundInProgress,
}

impl std::error::Error for MatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatchError::Turn(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TurnError> for MatchError {
    fn from(err: TurnError) -> Self {
        MatchError::Turn(err)
    }
}

impl From<BoardError> for MatchError {
    fn from(err: BoardError) -> Self {
        MatchError::Turn(TurnError::Board(err))
    }
}

impl MatchError {
    /// Returns the board rejection underneath, if that is what this is.
    ///
    /// Front ends use this to decide whether to re-prompt for a square.
    pub fn board_error(&self) -> Option<&BoardError> {
        match self {
            MatchError::Turn(TurnError::Board(err)) => Some(err),
            _ => None,
        }
    }
}
