//! Session registry shared by all request handlers.
//!
//! The map of sessions sits behind an `RwLock` whose write side is only taken
//! to insert a new session. Each session has its own `Mutex`; a mutation
//! clones the session's `Arc` under the read lock, drops the read lock, then
//! holds only that session's mutex while the engine runs. Two requests for
//! the same session therefore run one after the other, and requests for
//! different sessions never wait on each other.

use crate::GameError;
use crate::games::{Action, GameConfig, GameKind, GameState};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Opaque, unguessable identifier for a game session.
pub type SessionId = String;

/// One client's game.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Session ID.
    pub id: SessionId,
    /// The game state. Its variant fixes the session's kind.
    pub state: GameState,
}

impl GameSession {
    /// Creates a session around an initial state.
    pub fn new(id: SessionId, state: GameState) -> Self {
        Self { id, state }
    }

    /// The game this session plays.
    pub fn kind(&self) -> GameKind {
        self.state.kind()
    }
}

type SessionSlot = Arc<Mutex<GameSession>>;

/// Manages all game sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<SessionId, SessionSlot>>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session registry");
        Self::default()
    }

    /// Creates a session and returns its id with the state it was inserted
    /// with.
    #[instrument(skip(self))]
    pub fn create(&self, config: GameConfig) -> (SessionId, GameState) {
        let state = GameState::create(config, &mut rand::thread_rng());
        let id = Uuid::new_v4().simple().to_string();
        let slot = Arc::new(Mutex::new(GameSession::new(id.clone(), state.clone())));

        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone(), slot);

        info!(session_id = %id, kind = %config.kind(), "Created new session");
        (id, state)
    }

    /// Returns a snapshot of the session's state.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] (not found) for an unknown id.
    #[instrument(skip(self))]
    pub fn get(&self, id: &str) -> Result<GameState, GameError> {
        let slot = self.slot(id)?;
        let session = lock(&slot);
        Ok(session.state.clone())
    }

    /// Returns the kind of the session.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] (not found) for an unknown id.
    #[instrument(skip(self))]
    pub fn kind(&self, id: &str) -> Result<GameKind, GameError> {
        let slot = self.slot(id)?;
        let kind = lock(&slot).kind();
        Ok(kind)
    }

    /// Applies `action` to the session under its lock and returns the new
    /// state.
    ///
    /// The stored state is replaced only when the engine accepts the action.
    /// The session's kind never changes, so an action of another kind is
    /// always rejected.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] for an unknown id, an action of another kind, or
    /// a move the engine rejects.
    #[instrument(skip(self))]
    pub fn mutate(&self, id: &str, action: Action) -> Result<GameState, GameError> {
        let slot = self.slot(id)?;
        let mut session = lock(&slot);

        let next = session
            .state
            .clone()
            .apply(action, &mut rand::thread_rng())
            .inspect_err(|e| warn!(kind = %session.kind(), error = %e, "Action rejected"))?;
        session.state = next.clone();

        debug!("Session updated");
        Ok(next)
    }

    /// Restarts the session's game with its original configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] (not found) for an unknown id.
    #[instrument(skip(self))]
    pub fn reset(&self, id: &str) -> Result<GameState, GameError> {
        let slot = self.slot(id)?;
        let mut session = lock(&slot);

        let next = session.state.clone().reset(&mut rand::thread_rng());
        session.state = next.clone();

        info!(kind = %session.kind(), "Session reset");
        Ok(next)
    }

    /// Lists all active session IDs.
    #[instrument(skip(self))]
    pub fn list_sessions(&self) -> Vec<SessionId> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        sessions.keys().cloned().collect()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no sessions exist.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up a session's slot, releasing the map lock before returning.
    fn slot(&self, id: &str) -> Result<SessionSlot, GameError> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        sessions.get(id).cloned().ok_or_else(|| {
            debug!(session_id = id, "Session not found");
            GameError::not_found(id)
        })
    }
}

/// Locks a session, recovering from poisoning.
///
/// States are only ever replaced whole after a successful transition, so a
/// guard recovered from a panicking holder still sees a consistent state.
fn lock(slot: &SessionSlot) -> MutexGuard<'_, GameSession> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::rps::RpsConfig;

    #[test]
    fn test_ids_are_unique_and_opaque() {
        let registry = SessionRegistry::new();
        let (a, _) = registry.create(GameConfig::default_for(GameKind::Rps));
        let (b, _) = registry.create(GameConfig::default_for(GameKind::Rps));
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_failed_action_leaves_state_untouched() {
        let registry = SessionRegistry::new();
        let (id, before) = registry.create(GameConfig::Rps(RpsConfig::new(3)));
        let err = registry
            .mutate(&id, Action::RpsPlay { throw: "lizard".into() })
            .unwrap_err();
        assert!(!err.is_not_found());
        assert_eq!(registry.get(&id).unwrap(), before);
    }

    #[test]
    fn test_unknown_id() {
        let registry = SessionRegistry::new();
        assert!(registry.get("nope").unwrap_err().is_not_found());
        assert!(registry.reset("nope").unwrap_err().is_not_found());
        assert!(registry.kind("nope").unwrap_err().is_not_found());
    }
}
