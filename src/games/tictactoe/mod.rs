//! Tic-tac-toe with an optional computer opponent.

mod ai;
mod game;
mod invariants;
mod rules;
mod types;

pub use ai::{best_move, choose_move, random_move};
pub use game::{AI, HUMAN, TicTacToeConfig, TicTacToeState};
pub use invariants::{
    AlternatingTurnInvariant, HistoryConsistentInvariant, Invariant, InvariantSet,
    InvariantViolation, StatusConsistentInvariant, TicTacToeInvariants,
};
pub use rules::{LINES, check_winner, evaluate, is_full, winning_line};
pub use types::{BOARD_SIZE, Board, Difficulty, GameStatus, Mark, Move, MoveError, Square};
