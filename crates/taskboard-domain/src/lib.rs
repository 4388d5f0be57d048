pub mod board;
pub mod card;
pub mod column;
pub mod commands;
pub mod focus;
pub mod operations;
pub mod ordering;

pub use board::Board;
pub use card::{Card, CardId};
pub use column::ColumnSet;
pub use commands::{AddPlacement, Command, CommandContext, CommandOutcome};
pub use focus::{FocusRef, MoveDirection, VerticalDirection};
pub use operations::BoardOperations;
pub use ordering::InvariantViolation;
