//! Match controller: rounds, scores and the championship.

use super::board::Board;
use super::config::MatchSettings;
use super::error::MatchError;
use super::selector::{MoveSelector, RandomSource};
use super::turn::{Turn, TurnCoordinator, TurnState};
use super::types::{Markers, Participant, Symbol};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// The human completed a line.
    Human,
    /// The computer completed a line.
    Computer,
    /// The board filled up with no line.
    Tie,
}

impl RoundOutcome {
    /// Returns the round winner if there is one.
    pub fn winner(self) -> Option<Participant> {
        match self {
            RoundOutcome::Human => Some(Participant::Human),
            RoundOutcome::Computer => Some(Participant::Computer),
            RoundOutcome::Tie => None,
        }
    }
}

impl From<Option<Participant>> for RoundOutcome {
    fn from(winner: Option<Participant>) -> Self {
        match winner {
            Some(Participant::Human) => RoundOutcome::Human,
            Some(Participant::Computer) => RoundOutcome::Computer,
            None => RoundOutcome::Tie,
        }
    }
}

impl std::fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundOutcome::Human => write!(f, "Human wins"),
            RoundOutcome::Computer => write!(f, "Computer wins"),
            RoundOutcome::Tie => write!(f, "Tie"),
        }
    }
}

/// Rounds won by each participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
pub struct Scoreboard {
    /// Rounds the human has won.
    human: u32,
    /// Rounds the computer has won.
    computer: u32,
}

impl Scoreboard {
    /// Score of `participant`.
    pub fn score_for(&self, participant: Participant) -> u32 {
        match participant {
            Participant::Human => self.human,
            Participant::Computer => self.computer,
        }
    }

    /// Adds one to the round winner's score. Ties change nothing.
    fn record(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::Human => self.human += 1,
            RoundOutcome::Computer => self.computer += 1,
            RoundOutcome::Tie => {}
        }
    }
}

/// Where the match stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    /// A round is being played.
    InRound,
    /// The round ended; waiting for the caller to continue.
    AwaitingContinue,
    /// Someone reached the win threshold.
    Champion(Participant),
}

/// Drives repeated rounds until a champion is crowned.
///
/// The controller owns the board. Placements go through the turn
/// coordinator; everything else reads.
#[derive(Debug, Clone)]
pub struct MatchController<R> {
    settings: MatchSettings,
    board: Board,
    turns: TurnCoordinator,
    selector: MoveSelector<R>,
    scoreboard: Scoreboard,
    status: MatchStatus,
    round: u32,
    opener: Participant,
    outcome: Option<RoundOutcome>,
    history: Vec<RoundOutcome>,
}

impl<R: RandomSource> MatchController<R> {
    /// Starts a match with round 1 ready to play.
    #[instrument(skip(rng))]
    pub fn new(settings: MatchSettings, mut rng: R) -> Self {
        let opener = settings.first_mover().resolve(&mut rng);
        info!(opponent = %settings.opponent(), ?opener, max_wins = settings.max_wins(), "Match started");
        Self {
            board: Board::new(),
            turns: TurnCoordinator::start(opener),
            selector: MoveSelector::new(settings.difficulty(), rng),
            settings,
            scoreboard: Scoreboard::default(),
            status: MatchStatus::InRound,
            round: 1,
            opener,
            outcome: None,
            history: Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Play
    // ─────────────────────────────────────────────────────────────

    /// Plays the human's square, given as a cell number.
    ///
    /// Board rejections come back as [`MatchError::Turn`]; the caller
    /// asks for another square and tries again.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn human_move(&mut self, number: u8) -> Result<Turn, MatchError> {
        self.ensure_playable()?;
        let turn = self.turns.play_human(&mut self.board, number)?;
        self.settle_if_over();
        Ok(turn)
    }

    /// Lets the computer take its turn.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn computer_move(&mut self) -> Result<Turn, MatchError> {
        self.ensure_playable()?;
        let turn = self.turns.play_computer(&mut self.board, &mut self.selector)?;
        self.settle_if_over();
        Ok(turn)
    }

    fn ensure_playable(&self) -> Result<(), MatchError> {
        match self.status {
            MatchStatus::Champion(_) => Err(MatchError::ChampionDecided),
            MatchStatus::InRound | MatchStatus::AwaitingContinue => Ok(()),
        }
    }

    fn settle_if_over(&mut self) {
        if !self.turns.is_round_over() {
            return;
        }

        let outcome = RoundOutcome::from(self.board.winner());
        self.scoreboard.record(outcome);
        self.history.push(outcome);
        self.outcome = Some(outcome);
        info!(
            round = self.round,
            %outcome,
            human = self.scoreboard.human,
            computer = self.scoreboard.computer,
            "Round settled"
        );

        self.status = match outcome.winner() {
            Some(winner) if self.scoreboard.score_for(winner) >= *self.settings.max_wins() => {
                info!(champion = %winner, "Champion decided");
                MatchStatus::Champion(winner)
            }
            _ => MatchStatus::AwaitingContinue,
        };
    }

    // ─────────────────────────────────────────────────────────────
    //  Between rounds
    // ─────────────────────────────────────────────────────────────

    /// Continues the match: opens the next round with scores intact.
    ///
    /// # Errors
    ///
    /// - [`MatchError::RoundInProgress`] if the current round has not ended.
    /// - [`MatchError::ChampionDecided`] once the match is over.
    #[instrument(skip(self))]
    pub fn next_round(&mut self) -> Result<(), MatchError> {
        match self.status {
            MatchStatus::InRound => Err(MatchError::RoundInProgress),
            MatchStatus::Champion(_) => Err(MatchError::ChampionDecided),
            MatchStatus::AwaitingContinue => self.reset_board(),
        }
    }

    /// Clears the board for another round, keeping the scores.
    ///
    /// After a finished round the participant who did not move last opens
    /// the next one and the round counter advances. Called mid-round it
    /// replays the same round from scratch with the same opener.
    #[instrument(skip(self))]
    pub fn reset_board(&mut self) -> Result<(), MatchError> {
        if let MatchStatus::Champion(_) = self.status {
            return Err(MatchError::ChampionDecided);
        }

        if self.outcome.is_some() {
            self.round += 1;
            if let Some(last) = self.turns.last_mover() {
                self.opener = last.opponent();
            }
        }
        self.board.reset();
        self.turns = TurnCoordinator::start(self.opener);
        self.outcome = None;
        self.status = MatchStatus::InRound;
        debug!(round = self.round, opener = ?self.opener, "Board reset");
        Ok(())
    }

    /// Starts an entirely new match: empty board, zero scores, round 1.
    ///
    /// The configured first mover applies again.
    #[instrument(skip(self))]
    pub fn full_reset(&mut self) {
        self.opener = self.settings.first_mover().resolve(self.selector.rng_mut());
        self.board.reset();
        self.turns = TurnCoordinator::start(self.opener);
        self.scoreboard = Scoreboard::default();
        self.status = MatchStatus::InRound;
        self.round = 1;
        self.outcome = None;
        self.history.clear();
        info!(opener = ?self.opener, "Match reset");
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// The board, for rendering.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The current turn phase.
    pub fn turn_state(&self) -> TurnState {
        self.turns.state()
    }

    /// Where the match stands.
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    /// Outcome of the current round, once it has ended.
    pub fn current_round_outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    /// Outcomes of every settled round since the last full reset.
    pub fn history(&self) -> &[RoundOutcome] {
        &self.history
    }

    /// Current scores.
    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Round number, starting at 1.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Who opened the current round.
    pub fn opener(&self) -> Participant {
        self.opener
    }

    /// The settings this match runs on.
    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    /// The symbols in play.
    pub fn markers(&self) -> &Markers {
        self.settings.markers()
    }

    /// Returns true once a champion is crowned.
    pub fn is_champion_decided(&self) -> bool {
        matches!(self.status, MatchStatus::Champion(_))
    }

    /// The champion, if decided.
    pub fn champion(&self) -> Option<Participant> {
        match self.status {
            MatchStatus::Champion(participant) => Some(participant),
            _ => None,
        }
    }

    /// The champion's symbol, if decided.
    pub fn champion_marker(&self) -> Option<Symbol> {
        self.champion()
            .map(|participant| self.settings.markers().symbol_for(participant))
    }
}
