use crate::cli::{CardAction, Direction};
use serde_json::json;
use taskboard_cli::{output, BoardController, LogicalCommand, RecordingSink};
use taskboard_persistence::CardStore;

pub async fn handle<S: CardStore>(
    controller: &mut BoardController<S>,
    action: CardAction,
) -> anyhow::Result<()> {
    let command = match action {
        CardAction::List { column } => {
            let cards: Vec<_> = controller
                .board()
                .cards()
                .iter()
                .filter(|card| column.map_or(true, |c| card.column == c))
                .cloned()
                .collect();
            output::output_list(cards);
            return Ok(());
        }
        CardAction::Add {
            name,
            description,
            column,
        } => LogicalCommand::Add {
            name,
            description,
            column,
        },
        CardAction::Edit {
            at,
            name,
            description,
        } => LogicalCommand::Edit {
            column: at.column,
            position: at.position,
            name,
            description,
        },
        CardAction::Delete { at } => LogicalCommand::Delete {
            column: at.column,
            position: at.position,
        },
        CardAction::Move { at, direction } => {
            let (column, position) = (at.column, at.position);
            match direction {
                Direction::Up => LogicalCommand::MoveUp { column, position },
                Direction::Down => LogicalCommand::MoveDown { column, position },
                Direction::Left => LogicalCommand::MoveLeft { column, position },
                Direction::Right => LogicalCommand::MoveRight { column, position },
            }
        }
    };

    let mut sink = RecordingSink::new();
    let outcome = controller.execute(command, &mut sink).await?;
    let card = outcome.focus.and_then(|f| controller.board().card_at(f));

    output::output_success(json!({
        "changed": outcome.changed,
        "redraw": outcome.redraw,
        "focus": outcome.focus,
        "card": card,
    }));
    Ok(())
}
