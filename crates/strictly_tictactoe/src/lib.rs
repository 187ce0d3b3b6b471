//! Tic-tac-toe match engine.
//!
//! A human plays a computer opponent over repeated rounds until one of them
//! reaches the configured number of round wins.
//!
//! # Architecture
//!
//! - **Board**: nine [`Square`]s scanned against the eight [`WinningLines`]
//! - **MoveSelector**: the computer's easy / medium / hard heuristics
//! - **TurnCoordinator**: alternates human and computer within a round
//! - **MatchController**: scores rounds and crowns a champion
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use strictly_tictactoe::{MatchConfig, MatchController, TurnState};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = MatchConfig::default().with_max_wins(3).validate()?;
//! let mut game = MatchController::new(settings, StdRng::seed_from_u64(1));
//!
//! assert_eq!(game.turn_state(), TurnState::HumanTurn);
//! game.human_move(5)?;
//! game.computer_move()?;
//! assert_eq!(game.board().empty_positions().len(), 7);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod championship;
mod config;
mod error;
mod lines;
mod position;
mod selector;
mod turn;
mod types;

pub use board::{Board, Square};
pub use championship::{MatchController, MatchStatus, RoundOutcome, Scoreboard};
pub use config::{
    ConfigError, DEFAULT_MAX_WINS, FirstMover, MAX_WINS, MIN_WINS, MatchConfig, MatchSettings,
};
pub use error::{BoardError, MatchError, TurnError};
pub use lines::{Line, Threat, WinningLines};
pub use position::Position;
pub use selector::{Difficulty, MoveSelector, Opponent, RandomSource};
pub use turn::{Turn, TurnCoordinator, TurnState};
pub use types::{Marker, Markers, Participant, Symbol, SymbolError};
