pub mod board;
pub mod completion;
pub mod difficulty;
pub mod puzzle;
pub mod session;
pub mod validation;

pub use board::{Cell, Grid, SolvedBoard};
pub use difficulty::Difficulty;
pub use session::{GameSession, Placement, SessionError};
