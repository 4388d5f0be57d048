use super::{AddPlacement, Command, CommandContext, CommandOutcome};
use crate::ordering;
use crate::{Card, FocusRef, MoveDirection, VerticalDirection};
use taskboard_core::{TaskboardError, TaskboardResult};

fn require_name(name: &str) -> TaskboardResult<()> {
    if name.trim().is_empty() {
        return Err(TaskboardError::Validation(
            "card name must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn resolve(context: &CommandContext, focus: FocusRef) -> TaskboardResult<usize> {
    ordering::index_at(context.cards.as_slice(), focus)
        .ok_or_else(|| TaskboardError::NotFound(format!("no card at {}", focus)))
}

/// Create a new card at the tail of a column
pub struct AddCard {
    pub name: String,
    pub description: String,
    pub column: usize,
    pub placement: AddPlacement,
}

impl Command for AddCard {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<CommandOutcome> {
        require_name(&self.name)?;

        let column = match self.placement {
            AddPlacement::LegacyFirstCardInFirstColumn if context.cards.is_empty() => 0,
            _ => self.column,
        };
        if !context.columns.contains(column) {
            return Err(TaskboardError::Validation(format!(
                "column {} does not exist (board has {} columns)",
                column,
                context.columns.len()
            )));
        }

        let position = ordering::next_position_in_column(context.cards, column);
        let id = context.allocate_card_id()?;
        context.cards.push(Card::new(
            id,
            self.name.clone(),
            self.description.clone(),
            column,
            position,
        ));

        Ok(CommandOutcome::changed(
            [column],
            Some(FocusRef::new(column, position)),
        ))
    }

    fn description(&self) -> String {
        format!("Add card '{}' to column {}", self.name, self.column)
    }
}

/// Replace the name and description of a card
pub struct EditCard {
    pub focus: FocusRef,
    pub name: String,
    pub description: String,
}

impl Command for EditCard {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<CommandOutcome> {
        require_name(&self.name)?;
        let idx = resolve(context, self.focus)?;

        context.cards[idx].update_text(self.name.clone(), self.description.clone());

        Ok(CommandOutcome::changed([self.focus.column], Some(self.focus)))
    }

    fn description(&self) -> String {
        format!("Edit card at {}", self.focus)
    }
}

/// Remove a card and close the gap it leaves in its column
pub struct DeleteCard {
    pub focus: FocusRef,
}

impl Command for DeleteCard {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<CommandOutcome> {
        let idx = resolve(context, self.focus)?;
        if context.cards.len() == 1 && !context.has_free_card_id() {
            return Err(TaskboardError::Internal(
                "no card id left for the default card".to_string(),
            ));
        }

        let removed = context.cards.remove(idx);
        ordering::close_gap(context.cards, removed.column, removed.position);

        let mut redraw = vec![removed.column];
        let focus = if context.cards.is_empty() {
            redraw.push(0);
            Some(context.push_default_card()?)
        } else {
            ordering::focus_after_removal(
                context.cards,
                context.columns,
                removed.column,
                removed.position,
            )
        };

        Ok(CommandOutcome::changed(redraw, focus))
    }

    fn description(&self) -> String {
        format!("Delete card at {}", self.focus)
    }
}

/// Swap a card with its neighbour in the same column
pub struct MoveCardWithinColumn {
    pub focus: FocusRef,
    pub direction: VerticalDirection,
}

impl Command for MoveCardWithinColumn {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<CommandOutcome> {
        let idx = resolve(context, self.focus)?;

        let column_len = ordering::next_position_in_column(context.cards, self.focus.column);
        let Some(target) =
            ordering::neighbour_position(column_len, self.focus.position, self.direction)
        else {
            return Ok(CommandOutcome::unchanged(Some(self.focus)));
        };
        let target_focus = FocusRef::new(self.focus.column, target);
        let neighbour = resolve(context, target_focus)?;

        context.cards[neighbour].position = self.focus.position;
        context.cards[idx].position = target;

        Ok(CommandOutcome::changed(
            [self.focus.column],
            Some(target_focus),
        ))
    }

    fn description(&self) -> String {
        format!("Move card at {} {:?}", self.focus, self.direction)
    }
}

/// Move a card to the tail of the neighbouring column.
///
/// Both columns are renumbered in the same step: the card takes the next free
/// slot on the target side and the cards below it on the source side shift up.
pub struct MoveCardAcrossColumns {
    pub focus: FocusRef,
    pub direction: MoveDirection,
}

impl Command for MoveCardAcrossColumns {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<CommandOutcome> {
        let idx = resolve(context, self.focus)?;

        let Some(result) = ordering::compute_card_column_move(
            &context.cards[idx],
            context.columns,
            context.cards,
            self.direction,
        ) else {
            return Ok(CommandOutcome::unchanged(Some(self.focus)));
        };

        context.cards[idx].move_to(result.target_column, result.new_position);
        ordering::close_gap(context.cards, self.focus.column, self.focus.position);

        Ok(CommandOutcome::changed(
            [self.focus.column, result.target_column],
            Some(FocusRef::new(result.target_column, result.new_position)),
        ))
    }

    fn description(&self) -> String {
        format!("Move card at {} {:?}", self.focus, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, CardId, ColumnSet};
    use taskboard_core::DefaultCardConfig;

    fn empty_board() -> Board {
        Board::new(ColumnSet::default(), DefaultCardConfig::default())
    }

    fn board_with(cards: &[(CardId, usize, usize)]) -> Board {
        Board::from_cards(
            ColumnSet::default(),
            cards
                .iter()
                .map(|&(id, column, position)| {
                    Card::new(id, format!("Card {}", id), String::new(), column, position)
                })
                .collect(),
            DefaultCardConfig::default(),
        )
        .unwrap()
    }

    fn add(name: &str, column: usize) -> AddCard {
        AddCard {
            name: name.to_string(),
            description: String::new(),
            column,
            placement: AddPlacement::RequestedColumn,
        }
    }

    fn layout(board: &Board) -> Vec<(CardId, usize, usize)> {
        let mut cards: Vec<_> = board
            .cards()
            .iter()
            .map(|c| (c.id, c.column, c.position))
            .collect();
        cards.sort_by_key(|&(_, column, position)| (column, position));
        cards
    }

    // --- AddCard ---

    #[test]
    fn add_appends_to_tail_with_fresh_id() {
        let mut board = board_with(&[(0, 1, 0), (1, 1, 1)]);
        let outcome = board.execute(&add("Third", 1)).unwrap();

        assert!(outcome.changed);
        assert_eq!(outcome.redraw.iter().copied().collect::<Vec<_>>(), vec![1]);
        assert_eq!(outcome.focus, Some(FocusRef::new(1, 2)));
        let card = board.find(2).unwrap();
        assert_eq!((card.column, card.position), (1, 2));
        assert_eq!(card.name, "Third");
    }

    #[test]
    fn add_fails_cleanly_when_ids_are_exhausted() {
        let mut board = board_with(&[(CardId::MAX - 1, 0, 0)]);
        assert_eq!(board.next_card_id(), CardId::MAX);

        let err = board.execute(&add("One too many", 0)).unwrap_err();
        assert!(matches!(err, TaskboardError::Internal(_)));
        assert_eq!(board.len(), 1);
        assert_eq!(board.next_card_id(), CardId::MAX);
    }

    #[test]
    fn add_rejects_empty_name_without_change() {
        let mut board = board_with(&[(0, 0, 0)]);
        let before = layout(&board);

        let err = board.execute(&add("", 0)).unwrap_err();
        assert!(err.is_validation());
        let err = board.execute(&add("   ", 0)).unwrap_err();
        assert!(err.is_validation());

        assert_eq!(layout(&board), before);
        assert_eq!(board.next_card_id(), 1);
    }

    #[test]
    fn add_rejects_missing_column() {
        let mut board = empty_board();
        let err = board.execute(&add("Nowhere", 4)).unwrap_err();
        assert!(err.is_validation());
        assert!(board.is_empty());
    }

    #[test]
    fn first_card_goes_to_requested_column() {
        let mut board = empty_board();
        board.execute(&add("Review", 2)).unwrap();
        assert_eq!(layout(&board), vec![(0, 2, 0)]);
    }

    #[test]
    fn legacy_placement_forces_first_card_into_first_column() {
        let mut board = empty_board();
        let legacy = AddCard {
            placement: AddPlacement::LegacyFirstCardInFirstColumn,
            ..add("Review", 2)
        };
        let outcome = board.execute(&legacy).unwrap();
        assert_eq!(layout(&board), vec![(0, 0, 0)]);
        assert_eq!(outcome.focus, Some(FocusRef::new(0, 0)));

        // Only the very first card is affected.
        board.execute(&legacy).unwrap();
        assert_eq!(layout(&board), vec![(0, 0, 0), (1, 2, 0)]);
    }

    // --- EditCard ---

    #[test]
    fn edit_replaces_text_in_place() {
        let mut board = board_with(&[(0, 0, 0), (1, 0, 1)]);
        let outcome = board
            .execute(&EditCard {
                focus: FocusRef::new(0, 1),
                name: "Renamed".to_string(),
                description: "details".to_string(),
            })
            .unwrap();

        assert_eq!(outcome.focus, Some(FocusRef::new(0, 1)));
        let card = board.find(1).unwrap();
        assert_eq!(card.name, "Renamed");
        assert_eq!(card.description, "details");
        assert_eq!((card.column, card.position), (0, 1));
    }

    #[test]
    fn edit_rejects_empty_name() {
        let mut board = board_with(&[(0, 0, 0)]);
        let err = board
            .execute(&EditCard {
                focus: FocusRef::new(0, 0),
                name: String::new(),
                description: "ignored".to_string(),
            })
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(board.find(0).unwrap().name, "Card 0");
    }

    #[test]
    fn edit_unknown_focus_is_not_found() {
        let mut board = board_with(&[(0, 0, 0)]);
        let err = board
            .execute(&EditCard {
                focus: FocusRef::new(1, 0),
                name: "x".to_string(),
                description: String::new(),
            })
            .unwrap_err();
        assert!(matches!(err, TaskboardError::NotFound(_)));
    }

    // --- DeleteCard ---

    #[test]
    fn delete_closes_gap() {
        let mut board = board_with(&[(0, 0, 0), (1, 0, 1), (2, 0, 2), (3, 1, 0)]);
        let outcome = board
            .execute(&DeleteCard {
                focus: FocusRef::new(0, 1),
            })
            .unwrap();

        assert_eq!(layout(&board), vec![(0, 0, 0), (2, 0, 1), (3, 1, 0)]);
        assert_eq!(outcome.focus, Some(FocusRef::new(0, 1)));
        assert_eq!(outcome.redraw.iter().copied().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn delete_last_card_synthesizes_default() {
        let mut board = board_with(&[(5, 2, 0)]);
        let outcome = board
            .execute(&DeleteCard {
                focus: FocusRef::new(2, 0),
            })
            .unwrap();

        assert_eq!(board.len(), 1);
        let card = &board.cards()[0];
        assert_eq!(card.name, "The default card");
        assert_eq!((card.column, card.position), (0, 0));
        assert_eq!(card.id, 6, "ids are never reused");
        assert_eq!(outcome.focus, Some(FocusRef::new(0, 0)));
        assert_eq!(
            outcome.redraw.iter().copied().collect::<Vec<_>>(),
            vec![0, 2]
        );
    }

    #[test]
    fn delete_emptying_a_column_focuses_first_non_empty_column() {
        let mut board = board_with(&[(0, 1, 0), (1, 3, 0)]);
        let outcome = board
            .execute(&DeleteCard {
                focus: FocusRef::new(1, 0),
            })
            .unwrap();
        assert_eq!(outcome.focus, Some(FocusRef::new(3, 0)));
    }

    // --- MoveCardWithinColumn ---

    #[test]
    fn move_up_swaps_with_previous() {
        let mut board = board_with(&[(0, 0, 0), (1, 0, 1), (2, 0, 2)]);
        let outcome = board
            .execute(&MoveCardWithinColumn {
                focus: FocusRef::new(0, 2),
                direction: VerticalDirection::Up,
            })
            .unwrap();

        assert_eq!(layout(&board), vec![(0, 0, 0), (2, 0, 1), (1, 0, 2)]);
        assert_eq!(outcome.focus, Some(FocusRef::new(0, 1)));
    }

    #[test]
    fn move_down_swaps_with_next() {
        let mut board = board_with(&[(0, 0, 0), (1, 0, 1)]);
        board
            .execute(&MoveCardWithinColumn {
                focus: FocusRef::new(0, 0),
                direction: VerticalDirection::Down,
            })
            .unwrap();
        assert_eq!(layout(&board), vec![(1, 0, 0), (0, 0, 1)]);
    }

    #[test]
    fn move_up_at_top_and_down_at_bottom_are_noops() {
        let mut board = board_with(&[(0, 0, 0), (1, 0, 1)]);
        let before = layout(&board);

        let up = board
            .execute(&MoveCardWithinColumn {
                focus: FocusRef::new(0, 0),
                direction: VerticalDirection::Up,
            })
            .unwrap();
        let down = board
            .execute(&MoveCardWithinColumn {
                focus: FocusRef::new(0, 1),
                direction: VerticalDirection::Down,
            })
            .unwrap();

        assert!(!up.changed);
        assert!(!down.changed);
        assert_eq!(down.focus, Some(FocusRef::new(0, 1)));
        assert_eq!(layout(&board), before);
    }

    // --- MoveCardAcrossColumns ---

    #[test]
    fn move_right_appends_and_renumbers_both_columns() {
        let mut board = board_with(&[(0, 0, 0), (1, 0, 1), (2, 0, 2), (3, 1, 0)]);
        let outcome = board
            .execute(&MoveCardAcrossColumns {
                focus: FocusRef::new(0, 0),
                direction: MoveDirection::Right,
            })
            .unwrap();

        assert_eq!(
            layout(&board),
            vec![(1, 0, 0), (2, 0, 1), (3, 1, 0), (0, 1, 1)]
        );
        assert_eq!(outcome.focus, Some(FocusRef::new(1, 1)));
        assert_eq!(
            outcome.redraw.iter().copied().collect::<Vec<_>>(),
            vec![0, 1]
        );
    }

    #[test]
    fn move_left_into_empty_column() {
        let mut board = board_with(&[(0, 2, 0), (1, 2, 1)]);
        board
            .execute(&MoveCardAcrossColumns {
                focus: FocusRef::new(2, 1),
                direction: MoveDirection::Left,
            })
            .unwrap();
        assert_eq!(layout(&board), vec![(1, 1, 0), (0, 2, 0)]);
    }

    #[test]
    fn move_across_at_board_edges_are_noops() {
        let mut board = board_with(&[(0, 0, 0), (1, 3, 0)]);
        let before = layout(&board);

        let left = board
            .execute(&MoveCardAcrossColumns {
                focus: FocusRef::new(0, 0),
                direction: MoveDirection::Left,
            })
            .unwrap();
        let right = board
            .execute(&MoveCardAcrossColumns {
                focus: FocusRef::new(3, 0),
                direction: MoveDirection::Right,
            })
            .unwrap();

        assert!(!left.changed);
        assert!(!right.changed);
        assert_eq!(layout(&board), before);
    }

    #[test]
    fn move_unknown_focus_leaves_board_untouched() {
        let mut board = board_with(&[(0, 0, 0)]);
        let err = board
            .execute(&MoveCardAcrossColumns {
                focus: FocusRef::new(0, 3),
                direction: MoveDirection::Right,
            })
            .unwrap_err();
        assert!(matches!(err, TaskboardError::NotFound(_)));
        assert_eq!(layout(&board), vec![(0, 0, 0)]);
    }
}
