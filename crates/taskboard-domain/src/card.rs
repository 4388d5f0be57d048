use serde::{Deserialize, Serialize};

pub type CardId = u64;

/// A unit of work on the board.
///
/// Identity is the `id`: two cards compare equal when their ids match,
/// regardless of where they sit or what they say.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub column: usize,
    #[serde(rename = "pos")]
    pub position: usize,
}

impl Card {
    pub fn new(
        id: CardId,
        name: String,
        description: String,
        column: usize,
        position: usize,
    ) -> Self {
        Self {
            id,
            name,
            description,
            column,
            position,
        }
    }

    pub(crate) fn move_to(&mut self, column: usize, position: usize) {
        self.column = column;
        self.position = position;
    }

    pub(crate) fn update_text(&mut self, name: String, description: String) {
        self.name = name;
        self.description = description;
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Card {}
