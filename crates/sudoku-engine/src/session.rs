use std::collections::HashSet;
use std::error::Error;
use std::fmt;

use rand::RngExt;

use crate::board::{Cell, Grid, SolvedBoard};
use crate::completion::{completed_digits, is_board_solved, is_digit_fully_placed};
use crate::difficulty::Difficulty;
use crate::puzzle::{generate_puzzle, generate_puzzle_with_rng};
use crate::validation::{get_all_conflicts, matches_solution};

/// Outcome of a placement, judged against the paired solution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionError {
    /// The target cell is a given and cannot be edited.
    GivenCell { row: usize, col: usize },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::GivenCell { row, col } => {
                write!(f, "cell ({row}, {col}) is a given and cannot be edited")
            }
        }
    }
}

impl Error for SessionError {}

/// One game: the frozen puzzle, its solution, and the live player grid.
///
/// The session owns the bookkeeping a presentation layer needs after each
/// edit: which cells disagree with the solution, which digits are fully
/// placed, and whether the game is won. It holds no presentation state and
/// is a plain value; dropping it ends the game.
#[derive(Clone, Debug)]
pub struct GameSession {
    puzzle: Grid,
    solution: SolvedBoard,
    board: Grid,
    invalid: HashSet<(usize, usize)>,
    difficulty: Difficulty,
    won: bool,
}

impl GameSession {
    /// Start a new game at `difficulty`.
    pub fn new(difficulty: Difficulty) -> Self {
        let (puzzle, solution) = generate_puzzle(difficulty);
        Self::from_parts(puzzle, solution, difficulty)
    }

    /// Seeded variant of [`GameSession::new`].
    pub fn new_with_rng<R: RngExt>(difficulty: Difficulty, rng: &mut R) -> Self {
        let (puzzle, solution) = generate_puzzle_with_rng(difficulty, rng);
        Self::from_parts(puzzle, solution, difficulty)
    }

    fn from_parts(puzzle: Grid, solution: SolvedBoard, difficulty: Difficulty) -> Self {
        Self {
            board: puzzle,
            puzzle,
            solution,
            invalid: HashSet::new(),
            difficulty,
            won: false,
        }
    }

    /// Place `digit` at (row, col). Rejects given cells; otherwise reports
    /// whether the digit agrees with the solution and refreshes the
    /// invalid-cell set and win flag.
    pub fn place_digit(
        &mut self,
        row: usize,
        col: usize,
        digit: u8,
    ) -> Result<Placement, SessionError> {
        debug_assert!((1..=9).contains(&digit), "digit out of range: {digit}");
        if self.board[row][col].is_given() {
            return Err(SessionError::GivenCell { row, col });
        }
        self.board[row][col] = Cell::Player(digit);

        let placement = if matches_solution(&self.solution, digit, row, col) {
            self.invalid.remove(&(row, col));
            Placement::Correct
        } else {
            self.invalid.insert((row, col));
            Placement::Incorrect
        };

        self.won = self.invalid.is_empty() && is_board_solved(&self.board, &self.solution);
        Ok(placement)
    }

    /// Clear the player digit at (row, col), if any.
    pub fn clear_cell(&mut self, row: usize, col: usize) -> Result<(), SessionError> {
        if self.board[row][col].is_given() {
            return Err(SessionError::GivenCell { row, col });
        }
        self.board[row][col] = Cell::Empty;
        self.invalid.remove(&(row, col));
        self.won = false;
        Ok(())
    }

    /// Whether (row, col) was pre-filled by the generator and is locked.
    pub fn is_given(&self, row: usize, col: usize) -> bool {
        self.puzzle[row][col].is_given()
    }

    pub fn value(&self, row: usize, col: usize) -> Option<u8> {
        self.board[row][col].digit()
    }

    /// The live player grid.
    pub fn board(&self) -> &Grid {
        &self.board
    }

    /// The puzzle as carved, before any player edit.
    pub fn puzzle(&self) -> &Grid {
        &self.puzzle
    }

    pub fn solution(&self) -> &SolvedBoard {
        &self.solution
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Cells whose player digit disagrees with the solution.
    pub fn invalid_cells(&self) -> &HashSet<(usize, usize)> {
        &self.invalid
    }

    pub fn is_digit_completed(&self, digit: u8) -> bool {
        is_digit_fully_placed(&self.board, &self.solution, digit)
    }

    /// Per-digit completion, index 0 = digit 1.
    pub fn completed_digits(&self) -> [bool; 9] {
        completed_digits(&self.board, &self.solution)
    }

    /// Structural row/col/box collisions on the live grid.
    pub fn conflicts(&self) -> Vec<(usize, usize)> {
        get_all_conflicts(&self.board)
    }
}
