//! Alternating turn invariant: players alternate X, O, X, O, ...

use super::super::{Mark, TicTacToeState};
use super::Invariant;

/// Invariant: Players alternate turns, starting with X.
///
/// Equivalently, X has placed the same number of marks as O or one more,
/// and the player to move follows from the history length.
pub struct AlternatingTurnInvariant;

impl Invariant<TicTacToeState> for AlternatingTurnInvariant {
    fn holds(state: &TicTacToeState) -> bool {
        let history = state.history();

        let alternates = history
            .iter()
            .enumerate()
            .all(|(i, mv)| mv.player == if i % 2 == 0 { Mark::X } else { Mark::O });

        let expected_next = if history.len() % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        };

        let x = state.board().count(Mark::X);
        let o = state.board().count(Mark::O);

        alternates && state.current_player() == expected_next && (x == o || x == o + 1)
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}
