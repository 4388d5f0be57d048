use taskboard_core::{DefaultCardConfig, TaskboardError, TaskboardResult};

use crate::commands::{Command, CommandContext, CommandOutcome};
use crate::ordering::{self, InvariantViolation};
use crate::{Card, CardId, ColumnSet, FocusRef};

/// The whole collection of cards plus the fixed columns they live in.
///
/// Cards are only changed through [`Command`]s so that every column keeps a
/// contiguous position sequence.
#[derive(Debug, Clone)]
pub struct Board {
    columns: ColumnSet,
    cards: Vec<Card>,
    next_card_id: CardId,
    default_card: DefaultCardConfig,
}

impl Board {
    pub fn new(columns: ColumnSet, default_card: DefaultCardConfig) -> Self {
        Self {
            columns,
            cards: Vec::new(),
            next_card_id: 0,
            default_card,
        }
    }

    /// Board holding just the placeholder card at (0, 0).
    pub fn seeded(columns: ColumnSet, default_card: DefaultCardConfig) -> Self {
        let card = Card::new(
            0,
            default_card.name.clone(),
            default_card.description.clone(),
            0,
            0,
        );
        Self {
            columns,
            cards: vec![card],
            next_card_id: 1,
            default_card,
        }
    }

    /// Rebuild a board from persisted cards, in display order.
    ///
    /// Fails when a stored id leaves no room for the next one.
    pub fn from_cards(
        columns: ColumnSet,
        mut cards: Vec<Card>,
        default_card: DefaultCardConfig,
    ) -> TaskboardResult<Self> {
        ordering::sort_cards(&mut cards);
        let next_card_id = match cards.iter().map(|c| c.id).max() {
            Some(max) => max.checked_add(1).ok_or_else(|| {
                TaskboardError::Serialization(format!("card id {} is out of range", max))
            })?,
            None => 0,
        };
        Ok(Self {
            columns,
            cards,
            next_card_id,
            default_card,
        })
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn next_card_id(&self) -> CardId {
        self.next_card_id
    }

    /// Cards of one column, ordered by position.
    pub fn column_cards(&self, column: usize) -> Vec<&Card> {
        let mut cards: Vec<&Card> = self.cards.iter().filter(|c| c.column == column).collect();
        cards.sort_by_key(|c| c.position);
        cards
    }

    pub fn column_len(&self, column: usize) -> usize {
        ordering::next_position_in_column(&self.cards, column)
    }

    pub fn card_at(&self, focus: FocusRef) -> Option<&Card> {
        ordering::index_at(&self.cards, focus).map(|i| &self.cards[i])
    }

    pub fn find(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Focus on the first card of the first non-empty column.
    pub fn initial_focus(&self) -> Option<FocusRef> {
        (0..self.columns.len())
            .find(|&c| self.column_len(c) > 0)
            .map(|c| FocusRef::new(c, 0))
    }

    /// Run a command against this board.
    ///
    /// Commands validate before touching any card, so an `Err` leaves the
    /// board exactly as it was.
    pub fn execute(&mut self, command: &dyn Command) -> TaskboardResult<CommandOutcome> {
        tracing::debug!("Executing: {}", command.description());

        let mut context = CommandContext {
            columns: &self.columns,
            cards: &mut self.cards,
            next_card_id: &mut self.next_card_id,
            default_card: &self.default_card,
        };
        command.execute(&mut context)
    }

    /// Stable sort by `(column, position)` so iteration matches display order.
    pub fn resort(&mut self) {
        ordering::sort_cards(&mut self.cards);
    }

    pub fn check(&self) -> Vec<InvariantViolation> {
        ordering::find_violations(&self.cards, &self.columns)
    }

    /// Fix up cards loaded from a file that breaks the invariants.
    ///
    /// Later cards sharing an id get fresh ids, then positions are
    /// recompacted. Reports whether anything changed.
    pub fn repair(&mut self) -> TaskboardResult<bool> {
        let duplicates = ordering::duplicate_id_indices(&self.cards);
        for &idx in &duplicates {
            let id = self.next_card_id;
            self.next_card_id = id
                .checked_add(1)
                .ok_or_else(|| TaskboardError::Internal("card ids are exhausted".to_string()))?;
            self.cards[idx].id = id;
        }

        let changed = ordering::repair_positions(&mut self.cards, &self.columns);
        if changed {
            self.resort();
        }
        Ok(changed || !duplicates.is_empty())
    }
}
