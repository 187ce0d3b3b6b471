//! Match configuration: win threshold, opponent, markers and opener.

use super::selector::{Difficulty, Opponent, RandomSource};
use super::types::{Markers, Participant, Symbol};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Smallest accepted win threshold.
pub const MIN_WINS: u32 = 1;
/// Largest accepted win threshold.
pub const MAX_WINS: u32 = 10;
/// Win threshold when none is configured.
pub const DEFAULT_MAX_WINS: u32 = 5;

/// Who opens the first round of a match.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::EnumString, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FirstMover {
    /// The human opens.
    #[default]
    Human,
    /// The computer opens.
    Computer,
    /// A coin toss decides.
    Random,
}

impl FirstMover {
    /// Settles the choice, tossing a coin for [`FirstMover::Random`].
    #[instrument(skip(rng))]
    pub fn resolve(self, rng: &mut impl RandomSource) -> Participant {
        match self {
            FirstMover::Human => Participant::Human,
            FirstMover::Computer => Participant::Computer,
            FirstMover::Random if rng.pick(2) == 0 => Participant::Human,
            FirstMover::Random => Participant::Computer,
        }
    }
}

/// Raw match configuration, as read from TOML or built by a front end.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchConfig {
    /// Rounds a participant must win to become champion.
    #[serde(default = "default_max_wins")]
    max_wins: u32,

    /// Which computer personality to face.
    #[serde(default, alias = "difficulty")]
    opponent: Opponent,

    /// The human's marker character.
    #[serde(default = "default_human_marker", alias = "human_symbol")]
    human_marker: String,

    /// The computer's marker; defaults to the opponent's initial.
    #[serde(default, alias = "computer_symbol")]
    computer_marker: Option<String>,

    /// Who opens the first round.
    #[serde(default)]
    first_mover: FirstMover,
}

fn default_max_wins() -> u32 {
    DEFAULT_MAX_WINS
}

fn default_human_marker() -> String {
    "X".to_string()
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_wins: default_max_wins(),
            opponent: Opponent::default(),
            human_marker: default_human_marker(),
            computer_marker: None,
            first_mover: FirstMover::default(),
        }
    }
}

impl MatchConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(opponent = %config.opponent, max_wins = config.max_wins, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Overrides the win threshold.
    pub fn with_max_wins(mut self, max_wins: u32) -> Self {
        self.max_wins = max_wins;
        self
    }

    /// Overrides the opponent.
    pub fn with_opponent(mut self, opponent: Opponent) -> Self {
        self.opponent = opponent;
        self
    }

    /// Overrides the human's marker.
    pub fn with_human_marker(mut self, marker: impl Into<String>) -> Self {
        self.human_marker = marker.into();
        self
    }

    /// Overrides the computer's marker.
    pub fn with_computer_marker(mut self, marker: impl Into<String>) -> Self {
        self.computer_marker = Some(marker.into());
        self
    }

    /// Overrides the opener.
    pub fn with_first_mover(mut self, first_mover: FirstMover) -> Self {
        self.first_mover = first_mover;
        self
    }

    /// Checks every field and produces settings the engine can run on.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<MatchSettings, ConfigError> {
        if !(MIN_WINS..=MAX_WINS).contains(&self.max_wins) {
            return Err(ConfigError::new(format!(
                "max_wins must be between {} and {}, got {}",
                MIN_WINS, MAX_WINS, self.max_wins
            )));
        }

        let human = Symbol::parse(&self.human_marker)
            .map_err(|e| ConfigError::new(format!("Invalid human marker: {}", e)))?;
        let computer = match &self.computer_marker {
            Some(text) => Symbol::parse(text),
            None => Symbol::new(self.opponent.initial()),
        }
        .map_err(|e| ConfigError::new(format!("Invalid computer marker: {}", e)))?;
        let markers = Markers::new(human, computer).map_err(|e| ConfigError::new(e.to_string()))?;

        Ok(MatchSettings {
            max_wins: self.max_wins,
            opponent: self.opponent,
            markers,
            first_mover: self.first_mover,
        })
    }
}

/// Validated settings for one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize)]
pub struct MatchSettings {
    /// Rounds needed to win the championship.
    max_wins: u32,
    /// The computer personality.
    opponent: Opponent,
    /// The two distinct symbols.
    markers: Markers,
    /// Who opens the first round.
    first_mover: FirstMover,
}

impl MatchSettings {
    /// The computer's tier.
    pub fn difficulty(&self) -> Difficulty {
        self.opponent.difficulty()
    }
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            max_wins: DEFAULT_MAX_WINS,
            opponent: Opponent::default(),
            markers: Markers::default(),
            first_mover: FirstMover::default(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
