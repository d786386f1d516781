use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    /// Placed by the generator; locked against edits.
    Given(u8),
    /// Placed by the player.
    Player(u8),
    Empty,
}

impl Cell {
    pub fn digit(&self) -> Option<u8> {
        match self {
            Cell::Given(d) | Cell::Player(d) => Some(*d),
            Cell::Empty => None,
        }
    }

    pub fn is_given(&self) -> bool {
        matches!(self, Cell::Given(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Player-facing 9x9 grid: givens, player digits, holes.
pub type Grid = [[Cell; 9]; 9];

/// Fully solved grid paired with a puzzle. Digits 1-9 only.
pub type SolvedBoard = [[u8; 9]; 9];

pub fn empty_grid() -> Grid {
    [[Cell::Empty; 9]; 9]
}
