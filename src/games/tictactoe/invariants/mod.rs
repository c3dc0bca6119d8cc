//! First-class invariants for tic-tac-toe.
//!
//! Invariants are properties every reachable [`TicTacToeState`] satisfies.
//! The engine checks them after each transition in debug builds, and the
//! tests check them directly.

mod alternating_turn;
mod history_consistent;
mod status_consistent;

pub use alternating_turn::AlternatingTurnInvariant;
pub use history_consistent::HistoryConsistentInvariant;
pub use status_consistent::StatusConsistentInvariant;

use super::TicTacToeState;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// All tic-tac-toe invariants as a composable set.
pub type TicTacToeInvariants = (
    AlternatingTurnInvariant,
    HistoryConsistentInvariant,
    StatusConsistentInvariant,
);

/// Panics in debug builds if `state` breaks an invariant.
pub(super) fn debug_assert_invariants(state: &TicTacToeState) {
    if cfg!(debug_assertions)
        && let Err(violations) = TicTacToeInvariants::check_all(state)
    {
        panic!("tic-tac-toe invariants violated: {violations:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Mark, Move, TicTacToeConfig};

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        let state = TicTacToeState::new(TicTacToeConfig::default());
        assert!(TicTacToeInvariants::check_all(&state).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_replay() {
        let moves = [
            Move::new(0, Mark::X),
            Move::new(4, Mark::O),
            Move::new(2, Mark::X),
        ];
        let state = TicTacToeState::replay(TicTacToeConfig::default(), &moves).unwrap();
        assert!(TicTacToeInvariants::check_all(&state).is_ok());
    }
}
