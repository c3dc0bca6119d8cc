//! Tic-tac-toe state machine.
//!
//! A game is `InProgress` until a line is completed (`Won`) or the board
//! fills up (`Draw`); both are terminal. Against the computer the human
//! always plays X and the AI answers every human move with O before the
//! call returns, so callers only ever see the human to move.

use super::ai::choose_move;
use super::invariants::debug_assert_invariants;
use super::rules::evaluate;
use super::types::{BOARD_SIZE, Board, Difficulty, GameStatus, Mark, Move, MoveError, Square};
use derive_getters::Getters;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// The human's mark when playing the computer.
pub const HUMAN: Mark = Mark::X;

/// The computer's mark.
pub const AI: Mark = Mark::O;

/// Fixed per-session configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct TicTacToeConfig {
    /// Whether O is played by the computer.
    #[serde(rename = "vsAI")]
    vs_ai: bool,
    /// Computer strength (ignored when `vs_ai` is false).
    difficulty: Difficulty,
}

impl TicTacToeConfig {
    /// Creates a new configuration.
    pub fn new(vs_ai: bool, difficulty: Difficulty) -> Self {
        Self { vs_ai, difficulty }
    }

    /// Two humans sharing one board.
    pub fn two_player() -> Self {
        Self::new(false, Difficulty::Easy)
    }

    /// Human versus the computer.
    pub fn against_ai(difficulty: Difficulty) -> Self {
        Self::new(true, difficulty)
    }
}

/// Complete tic-tac-toe session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicTacToeState {
    /// The board.
    board: Board,
    /// Mark to be placed next.
    current_player: Mark,
    /// Outcome so far.
    #[serde(rename = "winner")]
    status: GameStatus,
    /// Completed line, once the game is won.
    winning_line: Option<[usize; 3]>,
    /// Every placed mark, oldest first.
    #[serde(rename = "moves")]
    history: Vec<Move>,
    /// Whether O is played by the computer.
    #[serde(rename = "vsAI")]
    vs_ai: bool,
    /// Computer strength.
    difficulty: Difficulty,
}

impl TicTacToeState {
    /// Creates an empty game with X to move.
    #[instrument]
    pub fn new(config: TicTacToeConfig) -> Self {
        Self {
            board: Board::new(),
            current_player: Mark::X,
            status: GameStatus::InProgress,
            winning_line: None,
            history: Vec::new(),
            vs_ai: config.vs_ai,
            difficulty: config.difficulty,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark to be placed next.
    pub fn current_player(&self) -> Mark {
        self.current_player
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the completed line of a won game.
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        self.winning_line
    }

    /// Returns the move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Whether O is played by the computer.
    pub fn vs_ai(&self) -> bool {
        self.vs_ai
    }

    /// Returns the computer strength.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Returns the configuration this game was created with.
    pub fn config(&self) -> TicTacToeConfig {
        TicTacToeConfig::new(self.vs_ai, self.difficulty)
    }

    /// Places the current player's mark at `pos` and, against the computer,
    /// applies the AI's reply.
    ///
    /// `requested_by` names the mark the caller believes it is playing; when
    /// given it must match the player to move.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] if the game is over, `pos` is off the board or
    /// taken, or it is not the requester's (or, against the computer, the
    /// human's) turn.
    #[instrument(skip(self, rng), fields(to_move = %self.current_player, vs_ai = self.vs_ai))]
    pub fn play<R: Rng + ?Sized>(
        mut self,
        pos: usize,
        requested_by: Option<Mark>,
        rng: &mut R,
    ) -> Result<Self, MoveError> {
        if self.status.is_over() {
            warn!(pos, "Move attempted after game over");
            return Err(MoveError::GameOver);
        }
        if pos >= BOARD_SIZE {
            return Err(MoveError::OutOfBounds(pos));
        }
        if !self.board.is_empty(pos) {
            return Err(MoveError::SquareOccupied(pos));
        }
        if let Some(mark) = requested_by
            && mark != self.current_player
        {
            return Err(MoveError::WrongPlayer(mark));
        }
        if self.vs_ai && self.current_player != HUMAN {
            return Err(MoveError::WrongPlayer(HUMAN));
        }

        self.place(pos)?;

        if self.vs_ai && !self.status.is_over() {
            if let Some(reply) = choose_move(&self.board, AI, self.difficulty, rng) {
                self.place(reply)?;
            }
        }

        info!(pos, status = ?self.status, marks = self.history.len(), "Move applied");
        debug_assert_invariants(&self);
        Ok(self)
    }

    /// Takes back the last move, or the last human/AI pair against the
    /// computer so the human is to move again.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::NothingToUndo`] if no move has been made.
    #[instrument(skip(self), fields(marks = self.history.len()))]
    pub fn undo(self) -> Result<Self, MoveError> {
        let mut history = self.history.clone();
        let last = history.pop().ok_or(MoveError::NothingToUndo)?;

        if self.vs_ai && last.player == AI {
            history.pop();
        }

        debug!(remaining = history.len(), "Replaying truncated history");
        Self::replay(self.config(), &history)
    }

    /// Clears the board, keeping the configuration.
    #[instrument(skip(self))]
    pub fn reset(self) -> Self {
        Self::new(self.config())
    }

    /// Rebuilds a game by playing `moves` on an empty board.
    ///
    /// No AI replies are generated; the computer's moves must be part of
    /// `moves`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] if any move is illegal at its point in the
    /// sequence.
    #[instrument(skip(moves), fields(count = moves.len()))]
    pub fn replay(config: TicTacToeConfig, moves: &[Move]) -> Result<Self, MoveError> {
        let mut state = Self::new(config);
        for mv in moves {
            if state.status.is_over() {
                return Err(MoveError::GameOver);
            }
            if mv.player != state.current_player {
                return Err(MoveError::WrongPlayer(mv.player));
            }
            state.place(mv.pos)?;
        }
        debug_assert_invariants(&state);
        Ok(state)
    }

    /// Places the current mark without turn or AI handling.
    fn place(&mut self, pos: usize) -> Result<(), MoveError> {
        if pos >= BOARD_SIZE {
            return Err(MoveError::OutOfBounds(pos));
        }
        if !self.board.is_empty(pos) {
            return Err(MoveError::SquareOccupied(pos));
        }

        let mark = self.current_player;
        self.board.set(pos, Square::Occupied(mark));
        self.history.push(Move::new(pos, mark));
        self.current_player = mark.opponent();

        let (status, line) = evaluate(&self.board);
        self.status = status;
        self.winning_line = line;
        Ok(())
    }
}
