//! History consistency invariant: history length matches occupied squares.

use super::super::{Square, TicTacToeState};
use super::Invariant;

/// Invariant: Every move in history owns exactly one occupied square.
///
/// No moves are missing, no squares are filled without a move.
pub struct HistoryConsistentInvariant;

impl Invariant<TicTacToeState> for HistoryConsistentInvariant {
    fn holds(state: &TicTacToeState) -> bool {
        let occupied = state
            .board()
            .squares()
            .iter()
            .filter(|s| **s != Square::Empty)
            .count();

        let matches_board = state
            .history()
            .iter()
            .all(|mv| state.board().get(mv.pos) == Some(Square::Occupied(mv.player)));

        occupied == state.history().len() && matches_board
    }

    fn description() -> &'static str {
        "History length matches number of occupied squares"
    }
}
