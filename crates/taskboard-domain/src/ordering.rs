//! Card ordering rules.
//!
//! Pure functions over a card slice that compute and maintain the per-column
//! position sequence. Every column must hold positions `0..k` with no gaps
//! and no duplicates; the commands in [`crate::commands`] use these helpers to
//! keep it that way.

use crate::{Card, CardId, ColumnSet, FocusRef, MoveDirection, VerticalDirection};
use std::collections::BTreeSet;
use std::fmt;

/// Result of computing a column move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardMoveResult {
    pub target_column: usize,
    pub new_position: usize,
}

/// A way in which a card slice breaks the position invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    DuplicateId { card_id: CardId },
    ColumnOutOfRange { card_id: CardId, column: usize },
    DuplicatePosition { column: usize, position: usize },
    Gap { column: usize, expected: usize, found: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId { card_id } => {
                write!(f, "more than one card has id {}", card_id)
            }
            Self::ColumnOutOfRange { card_id, column } => {
                write!(f, "card {} refers to missing column {}", card_id, column)
            }
            Self::DuplicatePosition { column, position } => {
                write!(f, "column {} has more than one card at position {}", column, position)
            }
            Self::Gap {
                column,
                expected,
                found,
            } => write!(
                f,
                "column {} skips from position {} to {}",
                column, expected, found
            ),
        }
    }
}

/// Count cards in a column and return the next append position.
pub fn next_position_in_column(cards: &[Card], column: usize) -> usize {
    cards.iter().filter(|c| c.column == column).count()
}

/// Index into `cards` of the card sitting at `focus`.
pub fn index_at(cards: &[Card], focus: FocusRef) -> Option<usize> {
    cards
        .iter()
        .position(|c| c.column == focus.column && c.position == focus.position)
}

/// Shift every card below `removed_position` in `column` up by one.
///
/// Call after a card has left the column, whether deleted or moved away.
pub fn close_gap(cards: &mut [Card], column: usize, removed_position: usize) {
    for card in cards
        .iter_mut()
        .filter(|c| c.column == column && c.position > removed_position)
    {
        card.position -= 1;
    }
}

/// Compact card positions in a column to be sequential (0, 1, 2, ...).
///
/// Relative order is kept; ties on position fall back to the card id.
pub fn compact_column_positions(cards: &mut [Card], column: usize) -> bool {
    let mut indices: Vec<usize> = cards
        .iter()
        .enumerate()
        .filter(|(_, c)| c.column == column)
        .map(|(i, _)| i)
        .collect();

    indices.sort_by_key(|&i| (cards[i].position, cards[i].id));

    let mut changed = false;
    for (new_pos, &idx) in indices.iter().enumerate() {
        if cards[idx].position != new_pos {
            cards[idx].position = new_pos;
            changed = true;
        }
    }
    changed
}

/// Position of the neighbour a card would swap with, or `None` at the column edge.
pub fn neighbour_position(
    column_len: usize,
    position: usize,
    direction: VerticalDirection,
) -> Option<usize> {
    match direction {
        VerticalDirection::Up => position.checked_sub(1),
        VerticalDirection::Down => {
            let next = position + 1;
            (next < column_len).then_some(next)
        }
    }
}

/// Compute the result of moving a card left or right between columns.
///
/// Returns `None` if there is no column in that direction. The card lands at
/// the tail of the target column.
pub fn compute_card_column_move(
    card: &Card,
    columns: &ColumnSet,
    cards: &[Card],
    direction: MoveDirection,
) -> Option<CardMoveResult> {
    let target_column = columns.adjacent(card.column, direction)?;
    Some(CardMoveResult {
        target_column,
        new_position: next_position_in_column(cards, target_column),
    })
}

/// Stable sort by `(column, position)`, matching display order.
pub fn sort_cards(cards: &mut [Card]) {
    cards.sort_by_key(|c| (c.column, c.position));
}

/// Where selection should land after the card at `(column, removed_position)` left.
///
/// Prefers the card that slid into the vacated slot, then the new tail of the
/// same column, then the first card of the first non-empty column.
pub fn focus_after_removal(
    cards: &[Card],
    columns: &ColumnSet,
    column: usize,
    removed_position: usize,
) -> Option<FocusRef> {
    let remaining = next_position_in_column(cards, column);
    if remaining > 0 {
        return Some(FocusRef::new(column, removed_position.min(remaining - 1)));
    }
    (0..columns.len())
        .find(|&c| next_position_in_column(cards, c) > 0)
        .map(|c| FocusRef::new(c, 0))
}

/// List every way `cards` breaks the position invariant.
pub fn find_violations(cards: &[Card], columns: &ColumnSet) -> Vec<InvariantViolation> {
    let duplicated: BTreeSet<CardId> = duplicate_id_indices(cards)
        .into_iter()
        .map(|i| cards[i].id)
        .collect();
    let mut violations: Vec<InvariantViolation> = duplicated
        .into_iter()
        .map(|card_id| InvariantViolation::DuplicateId { card_id })
        .collect();

    violations.extend(
        cards
            .iter()
            .filter(|c| !columns.contains(c.column))
            .map(|c| InvariantViolation::ColumnOutOfRange {
                card_id: c.id,
                column: c.column,
            }),
    );

    for column in 0..columns.len() {
        let mut positions: Vec<usize> = cards
            .iter()
            .filter(|c| c.column == column)
            .map(|c| c.position)
            .collect();
        positions.sort_unstable();

        for pair in positions.windows(2) {
            if pair[0] == pair[1] {
                violations.push(InvariantViolation::DuplicatePosition {
                    column,
                    position: pair[0],
                });
            }
        }

        positions.dedup();
        if let Some((expected, &found)) = positions
            .iter()
            .enumerate()
            .find(|(expected, found)| expected != *found)
        {
            violations.push(InvariantViolation::Gap {
                column,
                expected,
                found,
            });
        }
    }

    violations
}

/// Indices of cards whose id already appeared earlier in `cards`.
pub fn duplicate_id_indices(cards: &[Card]) -> Vec<usize> {
    let mut seen = BTreeSet::new();
    cards
        .iter()
        .enumerate()
        .filter(|(_, c)| !seen.insert(c.id))
        .map(|(i, _)| i)
        .collect()
}

/// Restore the invariant on an arbitrary card slice.
///
/// Cards pointing at a missing column are appended to the last column in id
/// order; then every column is compacted. Returns whether anything moved.
pub fn repair_positions(cards: &mut [Card], columns: &ColumnSet) -> bool {
    let last = columns.last_index();
    let mut stray: Vec<usize> = cards
        .iter()
        .enumerate()
        .filter(|(_, c)| !columns.contains(c.column))
        .map(|(i, _)| i)
        .collect();
    stray.sort_by_key(|&i| cards[i].id);

    let mut changed = !stray.is_empty();
    let mut tail = next_position_in_column(cards, last);
    for idx in stray {
        cards[idx].move_to(last, tail);
        tail += 1;
    }

    for column in 0..columns.len() {
        changed |= compact_column_positions(cards, column);
    }
    changed
}
