//! Tests for the computer opponent's move selection.

use rand::SeedableRng;
use rand::rngs::StdRng;
use strictly_tictactoe::{Board, Difficulty, MoveSelector, Participant, Position, RandomSource};

/// Replays a fixed list of indices, then keeps returning the last one.
struct Scripted {
    picks: Vec<usize>,
    next: usize,
}

impl Scripted {
    fn new(picks: &[usize]) -> Self {
        Self {
            picks: picks.to_vec(),
            next: 0,
        }
    }
}

impl RandomSource for Scripted {
    fn pick(&mut self, len: usize) -> usize {
        let index = self.picks[self.next.min(self.picks.len() - 1)];
        self.next += 1;
        index.min(len - 1)
    }
}

fn board_with(human: &[u8], computer: &[u8]) -> Board {
    let mut board = Board::new();
    for &n in human {
        board.place_marker(n, Participant::Human).expect("Valid placement");
    }
    for &n in computer {
        board.place_marker(n, Participant::Computer).expect("Valid placement");
    }
    board
}

#[test]
fn test_hard_blocks_top_row() {
    // X X .
    // . O .
    // . . .
    let board = board_with(&[1, 2], &[5]);
    let mut selector = MoveSelector::new(Difficulty::Hard, Scripted::new(&[8]));
    assert_eq!(selector.choose_move(&board), Some(Position::TopRight));
}

#[test]
fn test_hard_prefers_winning_over_blocking() {
    // Both sides threaten; hard wins at 9, medium blocks at 3.
    // X X .
    // . . .
    // O O .
    let board = board_with(&[1, 2], &[7, 8]);
    let mut selector = MoveSelector::new(Difficulty::Hard, Scripted::new(&[0]));
    assert_eq!(selector.choose_move(&board), Some(Position::BottomRight));

    let mut medium = MoveSelector::new(Difficulty::Medium, Scripted::new(&[0]));
    assert_eq!(medium.choose_move(&board), Some(Position::TopRight));
}

#[test]
fn test_first_canonical_line_breaks_ties() {
    // Human threatens the middle row (open 6), the left column (open 7)
    // and the diagonal (open 9).
    // X . .
    // X X .
    // . . .
    let board = board_with(&[1, 4, 5], &[]);
    let mut selector = MoveSelector::new(Difficulty::Medium, Scripted::new(&[0]));
    // Rows scan before columns and diagonals; 4-5-6 comes first.
    assert_eq!(selector.choose_move(&board), Some(Position::MiddleRight));
}

#[test]
fn test_easy_uses_injected_source() {
    let board = board_with(&[5], &[]);
    let mut selector = MoveSelector::new(Difficulty::Easy, Scripted::new(&[0, 3, 7]));
    assert_eq!(selector.choose_move(&board), Some(Position::TopLeft));
    assert_eq!(selector.choose_move(&board), Some(Position::MiddleLeft));
    assert_eq!(selector.choose_move(&board), Some(Position::BottomRight));
}

#[test]
fn test_seeded_selection_is_reproducible() {
    let board = board_with(&[1], &[9]);
    let mut a = MoveSelector::new(Difficulty::Easy, StdRng::seed_from_u64(42));
    let mut b = MoveSelector::new(Difficulty::Easy, StdRng::seed_from_u64(42));
    for _ in 0..10 {
        let pick = a.choose_move(&board);
        assert_eq!(pick, b.choose_move(&board));
        let pick = pick.expect("Board has room");
        assert!(board.empty_positions().contains(&pick));
    }
}

#[test]
fn test_every_tier_plays_the_last_square() {
    let board = board_with(&[1, 3, 4, 8], &[2, 5, 6, 7]);
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let mut selector = MoveSelector::new(difficulty, Scripted::new(&[0]));
        assert_eq!(selector.choose_move(&board), Some(Position::BottomRight));
    }
}
