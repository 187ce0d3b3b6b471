//! Tests for rounds, scoring and the championship.

use strictly_tictactoe::{
    FirstMover, MatchConfig, MatchController, MatchError, MatchStatus, Opponent, Participant,
    RandomSource, RoundOutcome, TurnState,
};

/// Replays a fixed list of indices, then always picks the first candidate.
struct Scripted(std::collections::VecDeque<usize>);

impl Scripted {
    fn first() -> Self {
        Self(Default::default())
    }

    fn new(picks: &[usize]) -> Self {
        Self(picks.iter().copied().collect())
    }
}

impl RandomSource for Scripted {
    fn pick(&mut self, len: usize) -> usize {
        self.0.pop_front().unwrap_or(0).min(len - 1)
    }
}

fn controller(max_wins: u32, rng: Scripted) -> MatchController<Scripted> {
    let settings = MatchConfig::default()
        .with_max_wins(max_wins)
        .with_opponent(Opponent::R2D2)
        .with_human_marker("X")
        .with_first_mover(FirstMover::Human)
        .validate()
        .expect("Valid settings");
    MatchController::new(settings, rng)
}

/// Plays one round: the computer moves whenever it holds the turn, the
/// human plays `moves` in order.
fn play_round(game: &mut MatchController<Scripted>, moves: &[u8]) -> RoundOutcome {
    let mut moves = moves.iter().copied();
    loop {
        match game.turn_state() {
            TurnState::HumanTurn => {
                let number = moves.next().expect("Script ran out of human moves");
                game.human_move(number).expect("Legal human move");
            }
            TurnState::ComputerTurn => {
                game.computer_move().expect("Computer always has a move");
            }
            TurnState::RoundOver => {
                return game.current_round_outcome().expect("Settled round");
            }
        }
    }
}

// R2D2 with `Scripted::first()` always takes the lowest empty square,
// which keeps these rounds predictable.

/// Human opens: X on 1, 4, 7; computer takes 2, 3.
const HUMAN_OPENS_AND_WINS: [u8; 3] = [1, 4, 7];
/// Computer opens on 1; X on 2, 5, 8; computer takes 3, 4.
const COMPUTER_OPENS_HUMAN_WINS: [u8; 3] = [2, 5, 8];

#[test]
fn test_scenario_tie_leaves_scores() {
    // X O X
    // X O O
    // O X X
    let mut game = controller(5, Scripted::new(&[0, 1, 0, 0]));
    let outcome = play_round(&mut game, &[1, 3, 4, 8, 9]);

    assert_eq!(outcome, RoundOutcome::Tie);
    assert!(game.board().is_full());
    assert_eq!(*game.scoreboard().human(), 0);
    assert_eq!(*game.scoreboard().computer(), 0);
    assert_eq!(game.status(), MatchStatus::AwaitingContinue);
}

#[test]
fn test_scenario_three_straight_wins_crowns_human() {
    let mut game = controller(3, Scripted::first());

    assert_eq!(play_round(&mut game, &HUMAN_OPENS_AND_WINS), RoundOutcome::Human);
    game.next_round().expect("Match continues");
    assert_eq!(game.opener(), Participant::Computer);

    assert_eq!(play_round(&mut game, &COMPUTER_OPENS_HUMAN_WINS), RoundOutcome::Human);
    game.next_round().expect("Match continues");

    assert_eq!(play_round(&mut game, &COMPUTER_OPENS_HUMAN_WINS), RoundOutcome::Human);

    assert!(game.is_champion_decided());
    assert_eq!(game.champion(), Some(Participant::Human));
    assert_eq!(game.champion_marker().map(|s| s.as_char()), Some('X'));
    assert_eq!(game.next_round(), Err(MatchError::ChampionDecided));
    assert_eq!(game.human_move(9), Err(MatchError::ChampionDecided));
}

#[test]
fn test_champion_regardless_of_computer_score() {
    let mut game = controller(2, Scripted::first());

    // X on 9, 8, 6 leaves the top row to the computer.
    assert_eq!(play_round(&mut game, &[9, 8, 6]), RoundOutcome::Computer);
    game.next_round().expect("Match continues");
    assert_eq!(game.opener(), Participant::Human);

    assert_eq!(play_round(&mut game, &HUMAN_OPENS_AND_WINS), RoundOutcome::Human);
    game.next_round().expect("Match continues");
    assert!(!game.is_champion_decided());

    assert_eq!(play_round(&mut game, &COMPUTER_OPENS_HUMAN_WINS), RoundOutcome::Human);
    assert_eq!(game.champion(), Some(Participant::Human));
    assert_eq!(*game.scoreboard().computer(), 1);
    assert_eq!(
        game.history(),
        &[RoundOutcome::Computer, RoundOutcome::Human, RoundOutcome::Human]
    );
}

#[test]
fn test_scenario_reset_board_keeps_scores_full_reset_clears() {
    let mut game = controller(5, Scripted::first());
    play_round(&mut game, &HUMAN_OPENS_AND_WINS);

    game.reset_board().expect("No champion yet");
    assert_eq!(*game.scoreboard().human(), 1);
    assert_eq!(game.board().empty_positions().len(), 9);
    assert_eq!(game.current_round_outcome(), None);
    assert_eq!(game.round(), 2);

    game.full_reset();
    assert_eq!(*game.scoreboard().human(), 0);
    assert_eq!(*game.scoreboard().computer(), 0);
    assert_eq!(game.round(), 1);
    assert!(game.history().is_empty());
    assert_eq!(game.turn_state(), TurnState::HumanTurn);
}

#[test]
fn test_full_reset_after_champion_allows_play() {
    let mut game = controller(1, Scripted::first());
    play_round(&mut game, &HUMAN_OPENS_AND_WINS);
    assert!(game.is_champion_decided());
    assert_eq!(game.reset_board(), Err(MatchError::ChampionDecided));

    game.full_reset();
    assert_eq!(game.status(), MatchStatus::InRound);
    assert_eq!(game.champion(), None);
    assert_eq!(play_round(&mut game, &HUMAN_OPENS_AND_WINS), RoundOutcome::Human);
}

#[test]
fn test_rejected_square_is_recoverable() {
    let mut game = controller(5, Scripted::first());
    game.human_move(5).expect("Blank square");
    game.computer_move().expect("Computer moves");

    let err = game.human_move(1).expect_err("Computer took 1");
    assert!(err.board_error().is_some());
    let err = game.human_move(0).expect_err("Out of range");
    assert!(err.board_error().is_some());

    assert_eq!(game.turn_state(), TurnState::HumanTurn);
    game.human_move(9).expect("Blank square");
}

#[test]
fn test_computer_cannot_move_out_of_turn() {
    let mut game = controller(5, Scripted::first());
    let err = game.computer_move().expect_err("Human opens");
    assert!(err.board_error().is_none());
    assert_eq!(game.board().empty_positions().len(), 9);
}
