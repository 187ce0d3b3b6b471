//! Computer opponent: tiered single-ply move selection.

use super::board::Board;
use super::position::Position;
use super::types::Participant;
use rand::Rng;
use rand::rngs::{StdRng, ThreadRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// How hard the computer tries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Random empty square.
    Easy,
    /// Blocks the human's two-in-a-row, otherwise random.
    Medium,
    /// Completes its own two-in-a-row, then blocks, otherwise random.
    #[default]
    Hard,
}

/// The three computer personalities on offer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Opponent {
    /// Plays at random.
    #[strum(serialize = "r2d2", serialize = "easy")]
    #[serde(alias = "easy")]
    R2D2,
    /// Defends but never attacks.
    #[strum(serialize = "c3p0", serialize = "medium")]
    #[serde(alias = "medium")]
    C3P0,
    /// Attacks, then defends.
    #[default]
    #[strum(serialize = "terminator", serialize = "hard")]
    #[serde(alias = "hard")]
    Terminator,
}

impl Opponent {
    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Opponent::R2D2 => "R2D2",
            Opponent::C3P0 => "C3P0",
            Opponent::Terminator => "Terminator",
        }
    }

    /// The tier this opponent plays at.
    pub fn difficulty(self) -> Difficulty {
        match self {
            Opponent::R2D2 => Difficulty::Easy,
            Opponent::C3P0 => Difficulty::Medium,
            Opponent::Terminator => Difficulty::Hard,
        }
    }

    /// The opponent's default marker: the first letter of its name.
    pub fn initial(self) -> char {
        match self {
            Opponent::R2D2 => 'R',
            Opponent::C3P0 => 'C',
            Opponent::Terminator => 'T',
        }
    }
}

impl std::fmt::Display for Opponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Source of randomness for the easy tier and for fallbacks.
///
/// Injected so tests can script exact picks.
pub trait RandomSource {
    /// Returns an index in `0..len`. Never called with `len == 0`.
    fn pick(&mut self, len: usize) -> usize;
}

impl RandomSource for StdRng {
    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

impl RandomSource for ThreadRng {
    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }
}

/// Chooses the computer's square.
#[derive(Debug, Clone)]
pub struct MoveSelector<R> {
    difficulty: Difficulty,
    rng: R,
}

impl<R: RandomSource> MoveSelector<R> {
    /// Creates a selector playing at `difficulty`.
    pub fn new(difficulty: Difficulty, rng: R) -> Self {
        Self { difficulty, rng }
    }

    /// The configured tier.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The injected random source.
    pub(crate) fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Returns the square the computer plays, or `None` on a full board.
    ///
    /// Ties between several qualifying lines go to the first line in
    /// canonical order.
    #[instrument(skip(self, board), fields(difficulty = %self.difficulty))]
    pub fn choose_move(&mut self, board: &Board) -> Option<Position> {
        let choice = match self.difficulty {
            Difficulty::Easy => self.random_move(board),
            Difficulty::Medium => Self::completing_move(board, Participant::Human)
                .or_else(|| self.random_move(board)),
            Difficulty::Hard => Self::completing_move(board, Participant::Computer)
                .or_else(|| Self::completing_move(board, Participant::Human))
                .or_else(|| self.random_move(board)),
        };
        debug!(position = ?choice, "Computer chose square");
        choice
    }

    /// Open square of the first threat owned by `owner`.
    ///
    /// For the computer this wins the round; for the human it blocks.
    fn completing_move(board: &Board, owner: Participant) -> Option<Position> {
        board
            .find_threats()
            .into_iter()
            .find(|threat| *threat.owner() == owner)
            .map(|threat| *threat.open())
    }

    fn random_move(&mut self, board: &Board) -> Option<Position> {
        let empty = board.empty_positions();
        if empty.is_empty() {
            return None;
        }
        let index = self.rng.pick(empty.len());
        // Wrap out-of-range picks; an empty square exists.
        Some(empty[index % empty.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    /// Always picks the same index.
    struct Fixed(usize);

    impl RandomSource for Fixed {
        fn pick(&mut self, _len: usize) -> usize {
            self.0
        }
    }

    fn board_with(human: &[u8], computer: &[u8]) -> Board {
        let mut board = Board::new();
        for &n in human {
            board.place_marker(n, Participant::Human).unwrap();
        }
        for &n in computer {
            board.place_marker(n, Participant::Computer).unwrap();
        }
        board
    }

    #[test]
    fn test_easy_picks_from_empty_positions() {
        let board = board_with(&[1, 2], &[5]);
        let mut selector = MoveSelector::new(Difficulty::Easy, Fixed(0));
        assert_eq!(selector.choose_move(&board), Some(Position::TopRight));

        let mut selector = MoveSelector::new(Difficulty::Easy, Fixed(5));
        assert_eq!(selector.choose_move(&board), Some(Position::BottomRight));
    }

    #[test]
    fn test_easy_ignores_threats() {
        let board = board_with(&[1, 2], &[5]);
        let mut selector = MoveSelector::new(Difficulty::Easy, Fixed(1));
        assert_eq!(selector.choose_move(&board), Some(Position::MiddleLeft));
    }

    #[test]
    fn test_medium_blocks() {
        let board = board_with(&[1, 2], &[5]);
        let mut selector = MoveSelector::new(Difficulty::Medium, Fixed(0));
        assert_eq!(selector.choose_move(&board), Some(Position::TopRight));
    }

    #[test]
    fn test_medium_does_not_attack() {
        // Computer could win at 6, human threatens 3.
        let board = board_with(&[1, 2], &[5, 8, 4]);
        let mut selector = MoveSelector::new(Difficulty::Medium, Fixed(0));
        assert_eq!(selector.choose_move(&board), Some(Position::TopRight));
    }

    #[test]
    fn test_hard_attacks_before_blocking() {
        // X X .
        // O O .
        // X . .
        let board = board_with(&[1, 2, 7], &[4, 5]);
        let mut selector = MoveSelector::new(Difficulty::Hard, Fixed(0));
        assert_eq!(selector.choose_move(&board), Some(Position::MiddleRight));
    }

    #[test]
    fn test_hard_falls_back_to_random() {
        let board = board_with(&[1], &[]);
        let mut selector = MoveSelector::new(Difficulty::Hard, Fixed(0));
        assert_eq!(selector.choose_move(&board), Some(Position::TopCenter));
    }

    #[test]
    fn test_out_of_range_pick_still_moves() {
        let board = board_with(&[1, 2], &[5]);
        let mut selector = MoveSelector::new(Difficulty::Easy, Fixed(7));
        assert_eq!(selector.choose_move(&board), Some(Position::MiddleLeft));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let board = board_with(&[1, 3, 4, 8, 9], &[2, 5, 6, 7]);
        let mut selector = MoveSelector::new(Difficulty::Easy, Fixed(0));
        assert_eq!(selector.choose_move(&board), None);
    }

    #[test]
    fn test_opponent_lookup() {
        assert_eq!(Opponent::from_str("terminator"), Ok(Opponent::Terminator));
        assert_eq!(Opponent::from_str("Medium"), Ok(Opponent::C3P0));
        assert_eq!(Opponent::R2D2.difficulty(), Difficulty::Easy);
        assert_eq!(Opponent::C3P0.initial(), 'C');
        assert_eq!(Difficulty::from_str("HARD"), Ok(Difficulty::Hard));
    }
}
