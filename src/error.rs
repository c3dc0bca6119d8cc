//! Error types shared by the session registry and the game engines.

use derive_more::{Display, Error};
use tracing::instrument;

/// Category of a failed game operation.
///
/// The HTTP layer maps each kind onto a status code: [`GameErrorKind::NotFound`]
/// becomes 404, every other kind becomes 400.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GameErrorKind {
    /// No session exists under the given id.
    #[display("Session {} not found", _0)]
    NotFound(String),

    /// The move is illegal for the current game state.
    #[display("Invalid move: {}", _0)]
    InvalidMove(String),

    /// The action does not apply to this session (wrong game kind, bad symbol).
    #[display("Invalid action: {}", _0)]
    InvalidAction(String),

    /// The request payload could not be understood.
    #[display("Validation failed: {}", _0)]
    Validation(String),
}

/// Game error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{} at {}:{}", kind, file, line)]
pub struct GameError {
    /// What went wrong.
    pub kind: GameErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GameError {
    /// Creates a new game error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: GameErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Unknown session id.
    #[track_caller]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::new(GameErrorKind::NotFound(id.into()))
    }

    /// Move rejected by the engine.
    #[track_caller]
    pub fn invalid_move(message: impl Into<String>) -> Self {
        Self::new(GameErrorKind::InvalidMove(message.into()))
    }

    /// Action rejected before reaching an engine.
    #[track_caller]
    pub fn invalid_action(message: impl Into<String>) -> Self {
        Self::new(GameErrorKind::InvalidAction(message.into()))
    }

    /// Malformed payload.
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(GameErrorKind::Validation(message.into()))
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &GameErrorKind {
        &self.kind
    }

    /// Whether this error reports an unknown session.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, GameErrorKind::NotFound(_))
    }
}
