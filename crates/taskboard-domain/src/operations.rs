use crate::commands::{
    AddCard, AddPlacement, CommandOutcome, DeleteCard, EditCard, MoveCardAcrossColumns,
    MoveCardWithinColumn,
};
use crate::{Board, FocusRef, MoveDirection, VerticalDirection};
use taskboard_core::TaskboardResult;

/// The card operations a board exposes to whatever drives it.
/// Every mutating method goes through a [`crate::Command`].
pub trait BoardOperations {
    fn add_card(
        &mut self,
        name: String,
        description: String,
        column: usize,
        placement: AddPlacement,
    ) -> TaskboardResult<CommandOutcome>;
    fn edit_card(
        &mut self,
        focus: FocusRef,
        name: String,
        description: String,
    ) -> TaskboardResult<CommandOutcome>;
    fn delete_card(&mut self, focus: FocusRef) -> TaskboardResult<CommandOutcome>;
    fn move_card_within_column(
        &mut self,
        focus: FocusRef,
        direction: VerticalDirection,
    ) -> TaskboardResult<CommandOutcome>;
    fn move_card_across_columns(
        &mut self,
        focus: FocusRef,
        direction: MoveDirection,
    ) -> TaskboardResult<CommandOutcome>;
}

impl BoardOperations for Board {
    fn add_card(
        &mut self,
        name: String,
        description: String,
        column: usize,
        placement: AddPlacement,
    ) -> TaskboardResult<CommandOutcome> {
        self.execute(&AddCard {
            name,
            description,
            column,
            placement,
        })
    }

    fn edit_card(
        &mut self,
        focus: FocusRef,
        name: String,
        description: String,
    ) -> TaskboardResult<CommandOutcome> {
        self.execute(&EditCard {
            focus,
            name,
            description,
        })
    }

    fn delete_card(&mut self, focus: FocusRef) -> TaskboardResult<CommandOutcome> {
        self.execute(&DeleteCard { focus })
    }

    fn move_card_within_column(
        &mut self,
        focus: FocusRef,
        direction: VerticalDirection,
    ) -> TaskboardResult<CommandOutcome> {
        self.execute(&MoveCardWithinColumn { focus, direction })
    }

    fn move_card_across_columns(
        &mut self,
        focus: FocusRef,
        direction: MoveDirection,
    ) -> TaskboardResult<CommandOutcome> {
        self.execute(&MoveCardAcrossColumns { focus, direction })
    }
}
