use serde::{Deserialize, Serialize};

/// One request from whatever drives the board, one JSON object per line in
/// a session: `{"command": "move_left", "column": 0, "position": 2}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum LogicalCommand {
    Add {
        name: String,
        #[serde(default)]
        description: String,
        #[serde(default)]
        column: usize,
    },
    Edit {
        column: usize,
        position: usize,
        name: String,
        #[serde(default)]
        description: String,
    },
    Delete {
        column: usize,
        position: usize,
    },
    MoveUp {
        column: usize,
        position: usize,
    },
    MoveDown {
        column: usize,
        position: usize,
    },
    MoveLeft {
        column: usize,
        position: usize,
    },
    MoveRight {
        column: usize,
        position: usize,
    },
    /// Resort and redraw every column.
    Show,
    Quit,
}
