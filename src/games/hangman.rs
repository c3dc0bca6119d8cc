//! Hangman: reveal a hidden word one letter at a time.

use crate::GameError;
use derive_getters::Getters;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Shown in place of letters not yet guessed.
pub const PLACEHOLDER: char = '_';

/// Words the game draws from; difficulty filters by length.
pub const WORD_POOL: &[&str] = &[
    "go", "code", "game", "react", "pixel", "binary", "dragon", "async", "memory", "network",
    "galaxy", "hangman", "puzzle", "random", "frontend", "backend", "context", "pointer",
    "compiler", "optimize",
];

/// Word length and mistake budget tier.
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
pub enum HangmanDifficulty {
    /// Short words, 8 mistakes.
    Easy,
    /// Medium words, 6 mistakes.
    #[default]
    Normal,
    /// Long words, 5 mistakes.
    Hard,
}

impl HangmanDifficulty {
    /// Number of wrong letters that ends the game.
    pub fn max_wrong(self) -> u32 {
        match self {
            HangmanDifficulty::Easy => 8,
            HangmanDifficulty::Normal => 6,
            HangmanDifficulty::Hard => 5,
        }
    }

    /// Whether a word of `len` letters belongs to this tier.
    pub fn accepts_length(self, len: usize) -> bool {
        match self {
            HangmanDifficulty::Easy => len <= 5,
            HangmanDifficulty::Normal => (4..=8).contains(&len),
            HangmanDifficulty::Hard => len >= 6,
        }
    }

    /// Words of [`WORD_POOL`] in this tier.
    pub fn candidates(self) -> Vec<&'static str> {
        WORD_POOL
            .iter()
            .copied()
            .filter(|w| self.accepts_length(w.len()))
            .collect()
    }
}

/// Fixed per-session configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct HangmanConfig {
    /// Word length and mistake budget tier.
    difficulty: HangmanDifficulty,
}

impl HangmanConfig {
    /// Creates a new configuration.
    pub fn new(difficulty: HangmanDifficulty) -> Self {
        Self { difficulty }
    }
}

/// Complete hangman session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HangmanState {
    #[serde(skip)]
    word: String,
    masked: String,
    guessed: Vec<char>,
    wrong: u32,
    max_wrong: u32,
    finished: bool,
    won: bool,
    difficulty: HangmanDifficulty,
}

impl HangmanState {
    /// Starts a game with a word drawn for the difficulty.
    #[instrument(skip(rng))]
    pub fn new<R: Rng + ?Sized>(config: HangmanConfig, rng: &mut R) -> Self {
        let candidates = config.difficulty.candidates();
        let word = candidates
            .choose(rng)
            .or_else(|| WORD_POOL.choose(rng))
            .copied()
            .unwrap_or("hangman");
        debug!(len = word.len(), "Word drawn");
        Self::with_word(config, word)
    }

    /// Starts a game with a known word.
    ///
    /// The word is lowercased; characters other than ASCII letters are shown
    /// from the start.
    pub fn with_word(config: HangmanConfig, word: &str) -> Self {
        let word = word.to_ascii_lowercase();
        let mut state = Self {
            masked: String::new(),
            word,
            guessed: Vec::new(),
            wrong: 0,
            max_wrong: config.difficulty.max_wrong(),
            finished: false,
            won: false,
            difficulty: config.difficulty,
        };
        state.refresh();
        state
    }

    /// The word with unguessed letters replaced by [`PLACEHOLDER`].
    pub fn masked(&self) -> &str {
        &self.masked
    }

    /// Letters tried so far, in order.
    pub fn guessed(&self) -> &[char] {
        &self.guessed
    }

    /// Number of letters tried that are not in the word.
    pub fn wrong(&self) -> u32 {
        self.wrong
    }

    /// Mistake budget.
    pub fn max_wrong(&self) -> u32 {
        self.max_wrong
    }

    /// Whether the game has ended.
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Whether the word was revealed.
    pub fn won(&self) -> bool {
        self.won
    }

    /// Word length and mistake budget tier.
    pub fn difficulty(&self) -> HangmanDifficulty {
        self.difficulty
    }

    /// The word, once the game has ended.
    pub fn revealed_word(&self) -> Option<&str> {
        self.finished.then_some(self.word.as_str())
    }

    /// Returns the configuration this game was created with.
    pub fn config(&self) -> HangmanConfig {
        HangmanConfig::new(self.difficulty)
    }

    /// Tries a letter.
    ///
    /// Repeated letters and any input after the game has ended change
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] (invalid action) if the game is still running and
    /// `input` does not start with an ASCII letter.
    #[instrument(skip(self), fields(wrong = self.wrong, finished = self.finished))]
    pub fn guess(mut self, input: &str) -> Result<Self, GameError> {
        if self.finished {
            debug!("Guess after game end ignored");
            return Ok(self);
        }

        let letter = normalize_letter(input)?;
        if self.guessed.contains(&letter) {
            debug!(%letter, "Repeated guess ignored");
            return Ok(self);
        }

        self.guessed.push(letter);
        if !self.word.contains(letter) {
            self.wrong += 1;
        }
        self.refresh();

        if self.finished {
            info!(won = self.won, wrong = self.wrong, "Hangman finished");
        }
        Ok(self)
    }

    /// Draws a new word for the same difficulty.
    #[instrument(skip(self, rng))]
    pub fn reset<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        Self::new(self.config(), rng)
    }

    /// Recomputes the mask and the end-of-game flags.
    fn refresh(&mut self) {
        self.masked = self
            .word
            .chars()
            .map(|c| {
                if !c.is_ascii_alphabetic() || self.guessed.contains(&c) {
                    c
                } else {
                    PLACEHOLDER
                }
            })
            .collect();
        self.won = !self.masked.contains(PLACEHOLDER);
        self.finished = self.won || self.wrong >= self.max_wrong;
    }
}

/// Reduces player input to a single lowercase letter.
fn normalize_letter(input: &str) -> Result<char, GameError> {
    match input.trim().chars().next() {
        Some(c) if c.is_ascii_alphabetic() => Ok(c.to_ascii_lowercase()),
        Some(c) => Err(GameError::invalid_action(format!("'{c}' is not a letter"))),
        None => Err(GameError::invalid_action("letter must not be empty")),
    }
}
