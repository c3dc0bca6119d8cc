//! Computer opponent for tic-tac-toe.
//!
//! Two tiers are available:
//! - [`Difficulty::Easy`] picks uniformly among the empty squares.
//! - [`Difficulty::Optimal`] runs an exhaustive minimax search over the
//!   remaining game tree. A 9-square board needs no pruning; the search
//!   stops at every won or full board, which keeps it to a few tens of
//!   thousands of nodes from the opening reply.
//!
//! Minimax scores are from the AI's point of view. Wins score
//! `WIN - depth` and losses `depth - WIN`, so the AI takes the fastest win
//! and drags out a lost position as long as possible.

use super::rules::{check_winner, is_full};
use super::{Board, Difficulty, Mark, Square};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Base score of a decided game, larger than any search depth.
const WIN: i32 = 10;

/// Chooses the AI's square, or `None` if the board is full.
#[instrument(skip(board, rng), fields(board = %board.display()))]
pub fn choose_move<R: Rng + ?Sized>(
    board: &Board,
    ai: Mark,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<usize> {
    let choice = match difficulty {
        Difficulty::Easy => random_move(board, rng),
        Difficulty::Optimal => best_move(board, ai),
    };
    debug!(?choice, ?difficulty, "AI chose square");
    choice
}

/// Picks a uniformly random empty square.
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
    board.empty_squares().choose(rng).copied()
}

/// Returns the minimax-optimal square for `ai`.
///
/// Ties go to the lowest square index.
pub fn best_move(board: &Board, ai: Mark) -> Option<usize> {
    let mut scratch = *board;
    let mut best: Option<(usize, i32)> = None;

    for pos in board.empty_squares() {
        scratch.set(pos, Square::Occupied(ai));
        let score = minimax(&mut scratch, ai, ai.opponent(), 1);
        scratch.set(pos, Square::Empty);

        // Strict comparison keeps the earliest square on ties.
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((pos, score));
        }
    }

    best.map(|(pos, _)| pos)
}

/// Scores `board` with `to_move` about to play, `depth` plies below the root.
fn minimax(board: &mut Board, ai: Mark, to_move: Mark, depth: i32) -> i32 {
    match check_winner(board) {
        Some(mark) if mark == ai => return WIN - depth,
        Some(_) => return depth - WIN,
        None if is_full(board) => return 0,
        None => {}
    }

    let maximizing = to_move == ai;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for pos in board.empty_squares() {
        board.set(pos, Square::Occupied(to_move));
        let score = minimax(board, ai, to_move.opponent(), depth + 1);
        board.set(pos, Square::Empty);

        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn board_with(cells: &[(usize, Mark)]) -> Board {
        let mut board = Board::new();
        for &(pos, mark) in cells {
            board.set(pos, Square::Occupied(mark));
        }
        board
    }

    #[test]
    fn test_takes_immediate_win() {
        // O O _ / X X _ / X _ _  -> O completes the top row.
        let board = board_with(&[
            (0, Mark::O),
            (1, Mark::O),
            (3, Mark::X),
            (4, Mark::X),
            (6, Mark::X),
        ]);
        assert_eq!(best_move(&board, Mark::O), Some(2));
    }

    #[test]
    fn test_blocks_immediate_loss() {
        // X X _ / _ O _ / _ _ _  -> O must block square 2.
        let board = board_with(&[(0, Mark::X), (1, Mark::X), (4, Mark::O)]);
        assert_eq!(best_move(&board, Mark::O), Some(2));
    }

    #[test]
    fn test_tie_break_prefers_lowest_square() {
        // Both 2 (top row) and 3 (left column) win at once for O.
        let board = board_with(&[
            (0, Mark::O),
            (1, Mark::O),
            (4, Mark::X),
            (8, Mark::X),
            (7, Mark::X),
            (6, Mark::O),
        ]);
        assert_eq!(best_move(&board, Mark::O), Some(2));
    }

    #[test]
    fn test_answers_corner_opening_with_center() {
        let board = board_with(&[(0, Mark::X)]);
        assert_eq!(best_move(&board, Mark::O), Some(4));
    }

    #[test]
    fn test_full_board_has_no_move() {
        use Mark::{O, X};
        let board = board_with(&[
            (0, X),
            (1, O),
            (2, X),
            (3, O),
            (4, X),
            (5, X),
            (6, O),
            (7, X),
            (8, O),
        ]);
        assert_eq!(best_move(&board, O), None);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_move(&board, &mut rng), None);
    }

    #[test]
    fn test_random_move_picks_empty_square() {
        let board = board_with(&[(0, Mark::X), (4, Mark::O), (8, Mark::X)]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let pos = random_move(&board, &mut rng).unwrap();
            assert!(board.is_empty(pos));
        }
    }
}
