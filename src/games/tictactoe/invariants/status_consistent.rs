//! Status invariant: the recorded outcome agrees with the board.

use super::super::rules::evaluate;
use super::super::TicTacToeState;
use super::Invariant;

/// Invariant: `winner` is set iff a line is complete or the board is full,
/// and `winningLine` names the completed line.
pub struct StatusConsistentInvariant;

impl Invariant<TicTacToeState> for StatusConsistentInvariant {
    fn holds(state: &TicTacToeState) -> bool {
        evaluate(state.board()) == (state.status(), state.winning_line())
    }

    fn description() -> &'static str {
        "Game status agrees with the board"
    }
}
