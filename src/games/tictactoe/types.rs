//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize, Serializer};

/// Number of squares on the board.
pub const BOARD_SIZE: usize = 9;

/// A player's mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum Mark {
    /// Player X (goes first, always the human against the AI).
    X,
    /// Player O (goes second, always the AI against a human).
    O,
}

impl Mark {
    /// Returns the opponent mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

// Clients test squares for truthiness, so empty is "" rather than null.
impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Square::Empty => serializer.serialize_str(""),
            Square::Occupied(mark) => mark.serialize(serializer),
        }
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; BOARD_SIZE],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; BOARD_SIZE],
        }
    }

    /// Gets the square at the given position (0-8).
    pub fn get(&self, pos: usize) -> Option<Square> {
        self.squares.get(pos).copied()
    }

    /// Places a mark, returning `false` when the position is off the board.
    pub fn set(&mut self, pos: usize, square: Square) -> bool {
        match self.squares.get_mut(pos) {
            Some(slot) => {
                *slot = square;
                true
            }
            None => false,
        }
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Square::Empty))
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; BOARD_SIZE] {
        &self.squares
    }

    /// Indices of all empty squares, ascending.
    pub fn empty_squares(&self) -> Vec<usize> {
        (0..BOARD_SIZE).filter(|&pos| self.is_empty(pos)).collect()
    }

    /// Number of squares holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|&&sq| sq == Square::Occupied(mark))
            .count()
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Mark),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// Whether the game has ended.
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }
}

// Wire format for `winner`: "" while playing, "X"/"O" on a win, "D" on a draw.
impl Serialize for GameStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GameStatus::InProgress => serializer.serialize_str(""),
            GameStatus::Won(mark) => mark.serialize(serializer),
            GameStatus::Draw => serializer.serialize_str("D"),
        }
    }
}

/// AI strength when playing against the computer.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// Random empty square.
    #[default]
    Easy,
    /// Full minimax search; never loses.
    Optimal,
}

/// A placed mark in the move history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Board index (0-8).
    pub pos: usize,
    /// The mark that was placed.
    pub player: Mark,
}

impl Move {
    /// Creates a new move.
    pub fn new(pos: usize, player: Mark) -> Self {
        Self { pos, player }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.pos)
    }
}

/// Error that can occur when applying or undoing a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The position is not on the board.
    #[display("Position {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(usize),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// It's not this player's turn.
    #[display("It's not {}'s turn", _0)]
    WrongPlayer(Mark),

    /// There is no move to take back.
    #[display("No moves to undo")]
    NothingToUndo,
}

impl std::error::Error for MoveError {}

impl From<MoveError> for crate::GameError {
    #[track_caller]
    fn from(err: MoveError) -> Self {
        crate::GameError::invalid_move(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_serializes_empty_as_blank() {
        let mut board = Board::new();
        board.set(4, Square::Occupied(Mark::X));
        let json = serde_json::to_value(board).unwrap();
        assert_eq!(
            json,
            serde_json::json!(["", "", "", "", "X", "", "", "", ""])
        );
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_value(GameStatus::InProgress).unwrap(), "");
        assert_eq!(serde_json::to_value(GameStatus::Won(Mark::O)).unwrap(), "O");
        assert_eq!(serde_json::to_value(GameStatus::Draw).unwrap(), "D");
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut board = Board::new();
        assert!(!board.set(9, Square::Occupied(Mark::X)));
        assert_eq!(board.empty_squares().len(), 9);
    }

    #[test]
    fn test_difficulty_parses_lowercase() {
        assert_eq!("optimal".parse::<Difficulty>().unwrap(), Difficulty::Optimal);
        assert!("hard".parse::<Difficulty>().is_err());
    }
}
