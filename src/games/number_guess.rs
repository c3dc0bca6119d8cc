//! Number guessing against a hidden secret.
//!
//! The secret is drawn uniformly from `1..=max`, where `max` scales with the
//! difficulty. Guesses outside that range are answered with an
//! `out-of-range` hint and are not counted as tries.

use derive_getters::Getters;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Range tier for the secret.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NumberGuessDifficulty {
    /// Secret in 1..=50.
    Easy,
    /// Secret in 1..=100.
    #[default]
    Normal,
    /// Secret in 1..=500.
    Hard,
    /// Secret in 1..=1000.
    Insane,
}

impl NumberGuessDifficulty {
    /// Upper bound of the secret for this tier.
    pub fn max(self) -> u32 {
        match self {
            NumberGuessDifficulty::Easy => 50,
            NumberGuessDifficulty::Normal => 100,
            NumberGuessDifficulty::Hard => 500,
            NumberGuessDifficulty::Insane => 1000,
        }
    }
}

/// Fixed per-session configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberGuessConfig {
    /// Range tier.
    difficulty: NumberGuessDifficulty,
}

impl NumberGuessConfig {
    /// Creates a new configuration.
    pub fn new(difficulty: NumberGuessDifficulty) -> Self {
        Self { difficulty }
    }
}

/// Feedback on the latest guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Hint {
    /// The secret is larger than the guess.
    Higher,
    /// The secret is smaller than the guess.
    Lower,
    /// The guess was the secret.
    Correct,
    /// The guess was outside `1..=max` and did not count.
    OutOfRange,
}

/// Complete number-guess session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberGuessState {
    #[serde(skip)]
    secret: u32,
    tries: u32,
    last: Option<u32>,
    hint: Option<Hint>,
    won: bool,
    max: u32,
    difficulty: NumberGuessDifficulty,
}

impl NumberGuessState {
    /// Starts a game with a freshly drawn secret.
    #[instrument(skip(rng))]
    pub fn new<R: Rng + ?Sized>(config: NumberGuessConfig, rng: &mut R) -> Self {
        let max = config.difficulty.max();
        Self::with_secret(config, rng.gen_range(1..=max))
    }

    /// Starts a game with a known secret.
    ///
    /// The secret is clamped into `1..=max`.
    pub fn with_secret(config: NumberGuessConfig, secret: u32) -> Self {
        let max = config.difficulty.max();
        Self {
            secret: secret.clamp(1, max),
            tries: 0,
            last: None,
            hint: None,
            won: false,
            max,
            difficulty: config.difficulty,
        }
    }

    /// Number of counted guesses.
    pub fn tries(&self) -> u32 {
        self.tries
    }

    /// Last counted guess.
    pub fn last(&self) -> Option<u32> {
        self.last
    }

    /// Feedback on the latest guess.
    pub fn hint(&self) -> Option<Hint> {
        self.hint
    }

    /// Whether the secret has been found.
    pub fn won(&self) -> bool {
        self.won
    }

    /// Upper bound of the secret.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Range tier.
    pub fn difficulty(&self) -> NumberGuessDifficulty {
        self.difficulty
    }

    /// The secret, once it has been guessed.
    pub fn revealed_secret(&self) -> Option<u32> {
        self.won.then_some(self.secret)
    }

    /// Returns the configuration this game was created with.
    pub fn config(&self) -> NumberGuessConfig {
        NumberGuessConfig::new(self.difficulty)
    }

    /// Scores a guess.
    ///
    /// A won game ignores further guesses. Out-of-range guesses only set the
    /// hint.
    #[instrument(skip(self), fields(tries = self.tries, max = self.max))]
    pub fn guess(mut self, n: i64) -> Self {
        if self.won {
            debug!("Guess after win ignored");
            return self;
        }

        let Some(n) = u32::try_from(n).ok().filter(|n| (1..=self.max).contains(n)) else {
            debug!("Guess out of range, not counted");
            self.hint = Some(Hint::OutOfRange);
            return self;
        };

        self.tries += 1;
        self.last = Some(n);
        self.hint = Some(match n.cmp(&self.secret) {
            std::cmp::Ordering::Equal => Hint::Correct,
            std::cmp::Ordering::Less => Hint::Higher,
            std::cmp::Ordering::Greater => Hint::Lower,
        });
        self.won = n == self.secret;

        if self.won {
            info!(tries = self.tries, "Secret found");
        }
        self
    }

    /// Draws a new secret, keeping the difficulty.
    #[instrument(skip(self, rng))]
    pub fn reset<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        Self::new(self.config(), rng)
    }
}
