use serde::{Deserialize, Serialize};
use std::fmt;

/// The selected card, addressed by where it sits rather than by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FocusRef {
    pub column: usize,
    pub position: usize,
}

impl FocusRef {
    pub fn new(column: usize, position: usize) -> Self {
        Self { column, position }
    }
}

impl fmt::Display for FocusRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column {} position {}", self.column, self.position)
    }
}

/// Direction for moving a card between columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Left,
    Right,
}

/// Direction for moving a card inside its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalDirection {
    Up,
    Down,
}
