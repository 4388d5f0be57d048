use taskboard_core::{TaskboardError, TaskboardResult};

use crate::focus::MoveDirection;

/// The fixed, ordered list of workflow stages.
///
/// Set once at startup; there is no runtime add or remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSet {
    names: Vec<String>,
}

impl ColumnSet {
    pub fn new(names: Vec<String>) -> TaskboardResult<Self> {
        if names.is_empty() {
            return Err(TaskboardError::Validation(
                "a board needs at least one column".to_string(),
            ));
        }
        Ok(Self { names })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.names.len() - 1
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.names.len()
    }

    /// Index of the neighbouring column, or `None` at the board edge.
    pub fn adjacent(&self, index: usize, direction: MoveDirection) -> Option<usize> {
        match direction {
            MoveDirection::Left => index.checked_sub(1),
            MoveDirection::Right => {
                let next = index + 1;
                self.contains(next).then_some(next)
            }
        }
    }
}

impl Default for ColumnSet {
    fn default() -> Self {
        Self {
            names: taskboard_core::config::DEFAULT_COLUMNS
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}
