//! Strictly Arcade library - concurrent mini-game sessions
//!
//! Four small games served over a JSON HTTP API, each session kept in a
//! thread-safe in-memory registry.
//!
//! # Architecture
//!
//! - **Games**: pure state machines for tic-tac-toe (with an optional
//!   minimax opponent), number guessing, hangman and rock-paper-scissors
//! - **Session**: registry of live sessions with one lock per session
//! - **Server**: axum router exposing the registry under `/api`
//! - **Config**: server settings from TOML, environment and CLI
//!
//! # Example
//!
//! ```
//! use strictly_arcade::{Action, GameConfig, GameKind, SessionRegistry};
//!
//! let registry = SessionRegistry::new();
//! let (id, _) = registry.create(GameConfig::default_for(GameKind::TicTacToe));
//! let state = registry
//!     .mutate(&id, Action::TicTacToeMove { pos: 4, player: None })
//!     .unwrap();
//! assert_eq!(state.kind(), GameKind::TicTacToe);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod error;
mod games;
mod server;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};

// Crate-level exports - Errors
pub use error::{GameError, GameErrorKind};

// Crate-level exports - HTTP server
pub use server::{ApiError, AppState, cors_layer, router};

// Crate-level exports - Session management
pub use session::{GameSession, SessionId, SessionRegistry};

// Crate-level exports - Game dispatch
pub use games::{Action, GameConfig, GameKind, GameState};

// Crate-level exports - Game types
pub use games::hangman::{HangmanConfig, HangmanDifficulty, HangmanState, PLACEHOLDER, WORD_POOL};
pub use games::number_guess::{Hint, NumberGuessConfig, NumberGuessDifficulty, NumberGuessState};
pub use games::rps::{DEFAULT_TARGET, MatchWinner, RoundResult, RpsConfig, RpsState, Throw};
pub use games::tictactoe::{
    AI, BOARD_SIZE, Board, Difficulty, GameStatus, HUMAN, LINES, Mark, Move, MoveError, Square,
    TicTacToeConfig, TicTacToeState, best_move, check_winner, choose_move, evaluate, is_full,
    random_move, winning_line,
};

// Crate-level exports - Tic-tac-toe invariants
pub use games::tictactoe::{
    AlternatingTurnInvariant, HistoryConsistentInvariant, Invariant, InvariantSet,
    InvariantViolation, StatusConsistentInvariant, TicTacToeInvariants,
};
