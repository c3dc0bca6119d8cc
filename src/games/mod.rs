//! The four mini-games and the tagged union the registry stores.
//!
//! Every engine works on owned snapshots: a transition consumes the current
//! state and returns the next one, so a rejected action never leaves a
//! half-updated state behind.

pub mod hangman;
pub mod number_guess;
pub mod rps;
pub mod tictactoe;

use crate::GameError;
use hangman::{HangmanConfig, HangmanState};
use number_guess::{NumberGuessConfig, NumberGuessState};
use rand::Rng;
use rps::{RpsConfig, RpsState};
use serde::{Deserialize, Serialize};
use tictactoe::{Mark, TicTacToeConfig, TicTacToeState};
use tracing::instrument;

/// Which game a session plays.
#[derive(
    Debug,
    Clone,
    Copy,
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
pub enum GameKind {
    /// Tic-tac-toe.
    TicTacToe,
    /// Number guess.
    NumberGuess,
    /// Hangman.
    Hangman,
    /// Rock-paper-scissors.
    Rps,
}

impl GameKind {
    /// Display name for game listings.
    pub fn title(self) -> &'static str {
        match self {
            GameKind::TicTacToe => "Tic Tac Toe",
            GameKind::NumberGuess => "Number Guess",
            GameKind::Hangman => "Hangman",
            GameKind::Rps => "Rock Paper Scissors",
        }
    }
}

/// Per-kind creation settings. The variant selects the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameConfig {
    /// Tic-tac-toe settings.
    TicTacToe(TicTacToeConfig),
    /// Number guess settings.
    NumberGuess(NumberGuessConfig),
    /// Hangman settings.
    Hangman(HangmanConfig),
    /// Rock-paper-scissors settings.
    Rps(RpsConfig),
}

impl GameConfig {
    /// The game this configuration creates.
    pub fn kind(&self) -> GameKind {
        match self {
            GameConfig::TicTacToe(_) => GameKind::TicTacToe,
            GameConfig::NumberGuess(_) => GameKind::NumberGuess,
            GameConfig::Hangman(_) => GameKind::Hangman,
            GameConfig::Rps(_) => GameKind::Rps,
        }
    }

    /// Default settings for `kind`.
    pub fn default_for(kind: GameKind) -> Self {
        match kind {
            GameKind::TicTacToe => GameConfig::TicTacToe(TicTacToeConfig::default()),
            GameKind::NumberGuess => GameConfig::NumberGuess(NumberGuessConfig::default()),
            GameKind::Hangman => GameConfig::Hangman(HangmanConfig::default()),
            GameKind::Rps => GameConfig::Rps(RpsConfig::default()),
        }
    }

    /// Parses a JSON creation body for `kind`.
    ///
    /// `null` (no body) yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] (validation) if the body does not match the
    /// kind's settings.
    pub fn from_json(kind: GameKind, body: serde_json::Value) -> Result<Self, GameError> {
        if body.is_null() {
            return Ok(Self::default_for(kind));
        }
        let invalid = |e: serde_json::Error| GameError::validation(format!("{kind} config: {e}"));
        let config = match kind {
            GameKind::TicTacToe => serde_json::from_value(body).map(GameConfig::TicTacToe),
            GameKind::NumberGuess => serde_json::from_value(body).map(GameConfig::NumberGuess),
            GameKind::Hangman => serde_json::from_value(body).map(GameConfig::Hangman),
            GameKind::Rps => serde_json::from_value(body).map(GameConfig::Rps),
        };
        config.map_err(invalid)
    }
}

/// A state-changing request for a session.
///
/// `reset` applies to every kind and is a separate registry operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Place a mark; `player` optionally names the requester's mark.
    TicTacToeMove {
        /// Board index (0-8).
        pos: usize,
        /// Mark the requester plays, if stated.
        player: Option<Mark>,
    },
    /// Take back the last move (or human/AI pair).
    TicTacToeUndo,
    /// Guess the secret.
    NumberGuess {
        /// The guessed number.
        n: i64,
    },
    /// Try a letter.
    HangmanGuess {
        /// Raw letter input.
        letter: String,
    },
    /// Play a round.
    RpsPlay {
        /// Raw throw name.
        throw: String,
    },
}

impl Action {
    /// The game this action belongs to.
    pub fn kind(&self) -> GameKind {
        match self {
            Action::TicTacToeMove { .. } | Action::TicTacToeUndo => GameKind::TicTacToe,
            Action::NumberGuess { .. } => GameKind::NumberGuess,
            Action::HangmanGuess { .. } => GameKind::Hangman,
            Action::RpsPlay { .. } => GameKind::Rps,
        }
    }
}

/// Current state of any game. Serializes as the inner state object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_more::From)]
#[serde(untagged)]
pub enum GameState {
    /// Tic-tac-toe state.
    TicTacToe(TicTacToeState),
    /// Number guess state.
    NumberGuess(NumberGuessState),
    /// Hangman state.
    Hangman(HangmanState),
    /// Rock-paper-scissors state.
    Rps(RpsState),
}

impl GameState {
    /// Builds the initial state for `config`.
    #[instrument(skip(rng))]
    pub fn create<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Self {
        match config {
            GameConfig::TicTacToe(c) => TicTacToeState::new(c).into(),
            GameConfig::NumberGuess(c) => NumberGuessState::new(c, rng).into(),
            GameConfig::Hangman(c) => HangmanState::new(c, rng).into(),
            GameConfig::Rps(c) => RpsState::new(c).into(),
        }
    }

    /// The game this state belongs to.
    pub fn kind(&self) -> GameKind {
        match self {
            GameState::TicTacToe(_) => GameKind::TicTacToe,
            GameState::NumberGuess(_) => GameKind::NumberGuess,
            GameState::Hangman(_) => GameKind::Hangman,
            GameState::Rps(_) => GameKind::Rps,
        }
    }

    /// The configuration the state was created with.
    pub fn config(&self) -> GameConfig {
        match self {
            GameState::TicTacToe(s) => GameConfig::TicTacToe(s.config()),
            GameState::NumberGuess(s) => GameConfig::NumberGuess(s.config()),
            GameState::Hangman(s) => GameConfig::Hangman(s.config()),
            GameState::Rps(s) => GameConfig::Rps(s.config()),
        }
    }

    /// Routes `action` to the matching engine.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] (invalid action) if the action belongs to
    /// another kind, or whatever the engine rejects.
    #[instrument(skip(self, rng), fields(kind = %self.kind()))]
    pub fn apply<R: Rng + ?Sized>(self, action: Action, rng: &mut R) -> Result<Self, GameError> {
        match (self, action) {
            (GameState::TicTacToe(s), Action::TicTacToeMove { pos, player }) => {
                Ok(s.play(pos, player, rng)?.into())
            }
            (GameState::TicTacToe(s), Action::TicTacToeUndo) => Ok(s.undo()?.into()),
            (GameState::NumberGuess(s), Action::NumberGuess { n }) => Ok(s.guess(n).into()),
            (GameState::Hangman(s), Action::HangmanGuess { letter }) => {
                Ok(s.guess(&letter)?.into())
            }
            (GameState::Rps(s), Action::RpsPlay { throw }) => Ok(s.play(&throw, rng)?.into()),
            (state, action) => Err(GameError::invalid_action(format!(
                "{} action sent to a {} session",
                action.kind(),
                state.kind()
            ))),
        }
    }

    /// Restarts the game with the same configuration.
    #[instrument(skip(self, rng), fields(kind = %self.kind()))]
    pub fn reset<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        match self {
            GameState::TicTacToe(s) => s.reset().into(),
            GameState::NumberGuess(s) => s.reset(rng).into(),
            GameState::Hangman(s) => s.reset(rng).into(),
            GameState::Rps(s) => s.reset().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_kind_round_trips_through_path_segment() {
        for (text, kind) in [
            ("tictactoe", GameKind::TicTacToe),
            ("numberguess", GameKind::NumberGuess),
            ("hangman", GameKind::Hangman),
            ("rps", GameKind::Rps),
        ] {
            assert_eq!(text.parse::<GameKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), text);
        }
    }

    #[test]
    fn test_config_from_json_body() {
        let config = GameConfig::from_json(
            GameKind::TicTacToe,
            serde_json::json!({"vsAI": true, "difficulty": "optimal"}),
        )
        .unwrap();
        assert_eq!(
            config,
            GameConfig::TicTacToe(TicTacToeConfig::against_ai(tictactoe::Difficulty::Optimal))
        );
    }

    #[test]
    fn test_config_rejects_unknown_difficulty() {
        let err = GameConfig::from_json(
            GameKind::NumberGuess,
            serde_json::json!({"difficulty": "impossible"}),
        )
        .unwrap_err();
        assert!(matches!(err.kind(), crate::GameErrorKind::Validation(_)));
    }

    #[test]
    fn test_mismatched_action_is_invalid() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = GameState::create(GameConfig::default_for(GameKind::Rps), &mut rng);
        let err = state.apply(Action::NumberGuess { n: 3 }, &mut rng).unwrap_err();
        assert!(matches!(err.kind(), crate::GameErrorKind::InvalidAction(_)));
    }

    #[test]
    fn test_config_survives_reset() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = GameConfig::Rps(RpsConfig::new(7));
        let state = GameState::create(config, &mut rng).reset(&mut rng);
        assert_eq!(state.config(), config);
    }
}
