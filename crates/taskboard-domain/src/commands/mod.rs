use serde::Serialize;
use std::collections::BTreeSet;
use taskboard_core::{DefaultCardConfig, TaskboardError, TaskboardResult};

use crate::{Card, CardId, ColumnSet, FocusRef};

pub mod card_commands;

pub use card_commands::*;

/// Trait for domain commands that mutate the board.
/// Commands check their preconditions first and only then touch cards.
pub trait Command: Send + Sync {
    /// Execute this command, mutating the cards in `context`
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<CommandOutcome>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}

/// Context passed to commands for mutation.
/// Borrows the parts of a [`crate::Board`] separately so commands can read
/// the columns while rewriting cards.
pub struct CommandContext<'a> {
    pub columns: &'a ColumnSet,
    pub cards: &'a mut Vec<Card>,
    pub next_card_id: &'a mut CardId,
    pub default_card: &'a DefaultCardConfig,
}

impl CommandContext<'_> {
    /// Whether another id can still be handed out.
    pub fn has_free_card_id(&self) -> bool {
        *self.next_card_id < CardId::MAX
    }

    pub fn allocate_card_id(&mut self) -> TaskboardResult<CardId> {
        let id = *self.next_card_id;
        *self.next_card_id = id
            .checked_add(1)
            .ok_or_else(|| TaskboardError::Internal("card ids are exhausted".to_string()))?;
        Ok(id)
    }

    /// Put the placeholder card at (0, 0). Only valid on an empty board.
    pub fn push_default_card(&mut self) -> TaskboardResult<FocusRef> {
        let id = self.allocate_card_id()?;
        self.cards.push(Card::new(
            id,
            self.default_card.name.clone(),
            self.default_card.description.clone(),
            0,
            0,
        ));
        Ok(FocusRef::new(0, 0))
    }
}

/// What a command did, for the layer that redraws the board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    /// Whether any card changed. No-ops are not persisted.
    pub changed: bool,
    /// Columns whose contents must be redrawn.
    pub redraw: BTreeSet<usize>,
    /// Card that should receive the selection afterwards.
    pub focus: Option<FocusRef>,
}

impl CommandOutcome {
    pub fn unchanged(focus: Option<FocusRef>) -> Self {
        Self {
            changed: false,
            redraw: BTreeSet::new(),
            focus,
        }
    }

    pub fn changed(redraw: impl IntoIterator<Item = usize>, focus: Option<FocusRef>) -> Self {
        Self {
            changed: true,
            redraw: redraw.into_iter().collect(),
            focus,
        }
    }
}

/// Where `AddCard` puts a card when the board is completely empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AddPlacement {
    /// Always the requested column.
    #[default]
    RequestedColumn,
    /// The very first card on an empty board goes to column 0 whatever was asked.
    LegacyFirstCardInFirstColumn,
}
