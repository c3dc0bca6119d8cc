//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](super::Board). Both the move path and the
//! minimax search evaluate positions through these functions, so a finished
//! game is recognized identically everywhere.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner, winning_line};

use super::{Board, GameStatus};

/// Evaluates the board into a status and, for a win, the completed line.
pub fn evaluate(board: &Board) -> (GameStatus, Option<[usize; 3]>) {
    if let Some((mark, line)) = winning_line(board) {
        (GameStatus::Won(mark), Some(line))
    } else if is_full(board) {
        (GameStatus::Draw, None)
    } else {
        (GameStatus::InProgress, None)
    }
}
