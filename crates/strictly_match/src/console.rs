//! Line-oriented terminal front end.
//!
//! Reads answers from any `BufRead` and writes to any `Write`, so a whole
//! session can be scripted in tests. End of input quits cleanly.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::str::FromStr;
use strictly_tictactoe::{
    FirstMover, MAX_WINS, MIN_WINS, MatchConfig, MatchController, MatchError, MatchSettings,
    Opponent, Participant, Position, RandomSource, RoundOutcome, Symbol, TurnState,
};
use tracing::{debug, info, instrument, warn};

/// Short rules summary printed by `strictly_match rules`.
pub const RULES: &str = "\
Tic-tac-toe is played on a 3x3 grid numbered 1-9:

   1 | 2 | 3
  ---+---+---
   4 | 5 | 6
  ---+---+---
   7 | 8 | 9

You and the computer take turns marking an empty square. The first to get
three markers in a row, column or diagonal wins the round; a full board with
no line is a tie. Each round win scores one point and the first to reach the
win target is the champion.

Opponents:
  R2D2        plays at random
  C3P0        blocks your two-in-a-rows
  Terminator  finishes its own two-in-a-rows, then blocks yours";

/// The input stream ended; the session stops without error.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Input closed")]
pub struct InputClosed;

/// Joins choices as `1, 2, or 3`.
pub fn join_or(positions: &[Position]) -> String {
    let numbers: Vec<String> = positions.iter().map(|p| p.number().to_string()).collect();
    match numbers.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} or {}", first, second),
        [rest @ .., last] => format!("{}, or {}", rest.join(", "), last),
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "ye" | "yes")
}

fn is_no(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "n" | "no")
}

/// Terminal session over arbitrary input and output streams.
pub struct Console<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> Console<I, O> {
    /// Creates a console.
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    /// Consumes the console, returning the output stream.
    pub fn into_output(self) -> O {
        self.output
    }

    fn say(&mut self, text: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "=> {}", text).context("Failed to write to terminal")
    }

    fn print(&mut self, text: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{}", text).context("Failed to write to terminal")
    }

    fn ask(&mut self, question: impl std::fmt::Display) -> Result<String> {
        self.say(question)?;
        self.output.flush().context("Failed to flush terminal")?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from terminal")?;
        if read == 0 {
            return Err(InputClosed.into());
        }
        Ok(line.trim().to_string())
    }

    fn ask_yes_no(&mut self, question: &str) -> Result<bool> {
        loop {
            let answer = self.ask(question)?;
            if is_yes(&answer) {
                return Ok(true);
            }
            if is_no(&answer) {
                return Ok(false);
            }
            self.say("Sorry, must enter y or n.")?;
        }
    }

    /// Runs sessions until the player declines a rematch or input ends.
    #[instrument(skip_all)]
    pub fn run<R: RandomSource>(&mut self, config: MatchConfig, interactive: bool, rng: &mut R) -> Result<()> {
        match self.session(config, interactive, rng) {
            Err(err) if err.is::<InputClosed>() => {
                debug!("Input closed, leaving");
                Ok(())
            }
            other => other,
        }
    }

    fn session<R: RandomSource>(&mut self, mut config: MatchConfig, interactive: bool, rng: &mut R) -> Result<()> {
        let name = if interactive { self.ask_name()? } else { "Player".to_string() };
        self.say(format!("Welcome to Tic Tac Toe, {}!", name))?;

        loop {
            if interactive {
                config = self.setup(config)?;
            }
            let settings = config.validate().context("Invalid match settings")?;
            let mut game = MatchController::new(settings, &mut *rng);

            loop {
                self.play_match(&mut game, &name)?;
                if !self.ask_yes_no("Would you like to play again? (y/n)")? {
                    self.say("Thanks for playing Tic Tac Toe! Goodbye!")?;
                    return Ok(());
                }
                if interactive && !self.ask_yes_no("Keep the same opponent and settings? (y/n)")? {
                    break;
                }
                game.full_reset();
                self.say("Let's play again!")?;
            }
        }
    }

    fn ask_name(&mut self) -> Result<String> {
        loop {
            let name = self.ask("What's your name?")?;
            if !name.is_empty() {
                return Ok(name);
            }
            self.say("Please enter a name.")?;
        }
    }

    /// Walks through the match settings, offering the current values as
    /// defaults. An empty answer keeps the default.
    fn setup(&mut self, config: MatchConfig) -> Result<MatchConfig> {
        let mut config = config;

        let opponent = loop {
            let answer = self.ask(format!(
                "Choose your opponent: 1) R2D2 (easy) 2) C3P0 (medium) 3) Terminator (hard) [{}]",
                config.opponent()
            ))?;
            let choice = match answer.as_str() {
                "" => Some(*config.opponent()),
                "1" => Some(Opponent::R2D2),
                "2" => Some(Opponent::C3P0),
                "3" => Some(Opponent::Terminator),
                other => Opponent::from_str(other).ok(),
            };
            match choice {
                Some(opponent) => break opponent,
                None => self.say("Please pick 1, 2 or 3.")?,
            }
        };
        config = config.with_opponent(opponent);
        self.say(format!("You chose to play against: {}!", opponent))?;

        let computer = match config.computer_marker() {
            Some(text) => Symbol::parse(text).context("Invalid computer marker")?,
            None => Symbol::new(opponent.initial()).context("Invalid computer marker")?,
        };
        self.say(format!("{}'s marker: {}", opponent, computer))?;

        let marker = loop {
            let answer = self.ask(format!("Choose a single-character marker [{}]", config.human_marker()))?;
            let text = if answer.is_empty() { config.human_marker().clone() } else { answer };
            match Symbol::parse(&text) {
                Ok(symbol) if symbol != computer => break text,
                Ok(_) => self.say(format!("{} is taken by {}, pick another.", computer, opponent))?,
                Err(err) => self.say(err)?,
            }
        };
        config = config.with_human_marker(marker);

        let max_wins = loop {
            let answer = self.ask(format!(
                "First to how many wins is the champion? ({}-{}) [{}]",
                MIN_WINS,
                MAX_WINS,
                config.max_wins()
            ))?;
            if answer.is_empty() {
                break *config.max_wins();
            }
            match answer.parse::<u32>() {
                Ok(n) if (MIN_WINS..=MAX_WINS).contains(&n) => break n,
                _ => self.say(format!("Please enter a number from {} to {}.", MIN_WINS, MAX_WINS))?,
            }
        };
        config = config.with_max_wins(max_wins);

        let first = loop {
            let answer = self.ask(format!(
                "Who goes first? 1) You 2) {} 3) Random [{}]",
                opponent,
                config.first_mover()
            ))?;
            let choice = match answer.as_str() {
                "" => Some(*config.first_mover()),
                "1" => Some(FirstMover::Human),
                "2" => Some(FirstMover::Computer),
                "3" => Some(FirstMover::Random),
                other => FirstMover::from_str(other).ok(),
            };
            match choice {
                Some(first) => break first,
                None => self.say("Please pick 1, 2 or 3.")?,
            }
        };
        Ok(config.with_first_mover(first))
    }

    /// Plays rounds until a champion is crowned.
    #[instrument(skip_all)]
    fn play_match<R: RandomSource>(&mut self, game: &mut MatchController<R>, name: &str) -> Result<()> {
        let settings = *game.settings();
        self.say(format!("First to {} is the champion!", settings.max_wins()))?;

        loop {
            self.print(format!("\n--- Round {} ---", game.round()))?;
            let outcome = self.play_round(game, &settings)?;
            self.show_board(game)?;
            match outcome {
                RoundOutcome::Human => self.say("You won!")?,
                RoundOutcome::Computer => self.say(format!("{} won!", settings.opponent()))?,
                RoundOutcome::Tie => self.say("It's a tie!")?,
            }

            if let Some(champion) = game.champion() {
                info!(?champion, rounds = game.round(), "Match finished");
                match champion {
                    Participant::Human => {
                        self.say(format!("Congratulations {}, you are the Champion!", name))?
                    }
                    Participant::Computer => self.say(format!(
                        "{} is the Champion. Better luck next time!",
                        settings.opponent()
                    ))?,
                }
                return Ok(());
            }

            let scores = *game.scoreboard();
            self.print("SCOREBOARD")?;
            self.say(format!("{}: {}", name, scores.human()))?;
            self.say(format!("{}: {}", settings.opponent(), scores.computer()))?;
            self.ask("Press Enter to continue...")?;
            game.next_round().context("Round should be over")?;
        }
    }

    fn play_round<R: RandomSource>(
        &mut self,
        game: &mut MatchController<R>,
        settings: &MatchSettings,
    ) -> Result<RoundOutcome> {
        loop {
            match game.turn_state() {
                TurnState::HumanTurn => {
                    self.show_board(game)?;
                    self.human_turn(game)?;
                }
                TurnState::ComputerTurn => {
                    let turn = game.computer_move().context("Computer failed to move")?;
                    self.say(format!("{} chose square {}.", settings.opponent(), turn.position()))?;
                }
                TurnState::RoundOver => {
                    return game
                        .current_round_outcome()
                        .context("Finished round has no outcome");
                }
            }
        }
    }

    fn human_turn<R: RandomSource>(&mut self, game: &mut MatchController<R>) -> Result<()> {
        loop {
            let choices = join_or(&game.board().empty_positions());
            let answer = self.ask(format!("Choose a square ({}):", choices))?;
            let attempt = Position::parse(&answer)
                .map_err(MatchError::from)
                .and_then(|position| game.human_move(position.number()));
            match attempt {
                Ok(_) => return Ok(()),
                Err(err) if err.board_error().is_some() => {
                    warn!(%err, "Rejected square");
                    self.say("Sorry, that's not a valid choice.")?;
                }
                Err(err) => return Err(err).context("Move rejected"),
            }
        }
    }

    fn show_board<R: RandomSource>(&mut self, game: &MatchController<R>) -> Result<()> {
        let markers = *game.markers();
        self.print("")?;
        self.print(format!(
            "Your marker: {}. Computer marker: {}.",
            markers.human(),
            markers.computer()
        ))?;
        self.print(game.board().render(&markers))?;
        self.print("")
    }
}
