//! Turn-taking state machine for a single round.
//!
//! The coordinator owns no board. It borrows the board for exactly one
//! placement per turn and then decides who moves next, so the same
//! participant can never play twice in a row.

use super::board::Board;
use super::error::TurnError;
use super::position::Position;
use super::selector::{MoveSelector, RandomSource};
use super::types::Participant;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Phase of the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TurnState {
    /// Waiting for the caller to supply the human's square.
    HumanTurn,
    /// Waiting for the computer to pick.
    ComputerTurn,
    /// A line was completed or the board filled up.
    RoundOver,
}

impl TurnState {
    /// The state in which `participant` is to move.
    pub fn turn_of(participant: Participant) -> Self {
        match participant {
            Participant::Human => TurnState::HumanTurn,
            Participant::Computer => TurnState::ComputerTurn,
        }
    }

    /// Who is to move, or `None` once the round is over.
    pub fn to_move(self) -> Option<Participant> {
        match self {
            TurnState::HumanTurn => Some(Participant::Human),
            TurnState::ComputerTurn => Some(Participant::Computer),
            TurnState::RoundOver => None,
        }
    }
}

/// A placement accepted by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_getters::Getters)]
pub struct Turn {
    /// Who played.
    participant: Participant,
    /// Where they played.
    position: Position,
    /// The state after the placement.
    next: TurnState,
}

/// Alternates control between human and computer across one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnCoordinator {
    state: TurnState,
    last_mover: Option<Participant>,
}

impl TurnCoordinator {
    /// Opens a round with `first_mover` to play.
    #[instrument]
    pub fn start(first_mover: Participant) -> Self {
        debug!(?first_mover, "Round opened");
        Self {
            state: TurnState::turn_of(first_mover),
            last_mover: None,
        }
    }

    /// Current phase.
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Who made the most recent placement this round.
    pub fn last_mover(&self) -> Option<Participant> {
        self.last_mover
    }

    /// Returns true once the round has ended.
    pub fn is_round_over(&self) -> bool {
        self.state == TurnState::RoundOver
    }

    /// Plays the human's square.
    ///
    /// The square arrives as a raw cell number. On any error the state is
    /// unchanged and the caller asks again.
    #[instrument(skip(self, board))]
    pub fn play_human(&mut self, board: &mut Board, number: u8) -> Result<Turn, TurnError> {
        self.expect_turn(Participant::Human)?;
        let position = board.place_marker(number, Participant::Human)?;
        Ok(self.advance(board, Participant::Human, position))
    }

    /// Lets the computer pick and play its square.
    #[instrument(skip(self, board, selector))]
    pub fn play_computer<R: RandomSource>(
        &mut self,
        board: &mut Board,
        selector: &mut MoveSelector<R>,
    ) -> Result<Turn, TurnError> {
        self.expect_turn(Participant::Computer)?;
        let position = selector
            .choose_move(board)
            .ok_or(TurnError::NoMovesAvailable)?;
        board.place(position, Participant::Computer)?;
        Ok(self.advance(board, Participant::Computer, position))
    }

    fn expect_turn(&self, participant: Participant) -> Result<(), TurnError> {
        match self.state.to_move() {
            None => Err(TurnError::RoundOver),
            Some(p) if p == participant => Ok(()),
            Some(_) => Err(TurnError::NotYourTurn(participant)),
        }
    }

    fn advance(&mut self, board: &Board, participant: Participant, position: Position) -> Turn {
        self.last_mover = Some(participant);
        self.state = if board.winner().is_some() || board.is_full() {
            info!(?participant, %position, "Round over");
            TurnState::RoundOver
        } else {
            TurnState::turn_of(participant.opponent())
        };
        Turn {
            participant,
            position,
            next: self.state,
        }
    }
}
