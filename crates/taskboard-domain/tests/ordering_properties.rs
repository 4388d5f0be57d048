use proptest::prelude::*;
use proptest::test_runner::Config;
use taskboard_core::DefaultCardConfig;
use taskboard_domain::{
    AddPlacement, Board, BoardOperations, ColumnSet, FocusRef, MoveDirection, VerticalDirection,
};

/// One user action, aimed at whichever card `pick` lands on.
#[derive(Debug, Clone)]
enum Op {
    Add { column: usize },
    Delete { pick: usize },
    Up { pick: usize },
    Down { pick: usize },
    Left { pick: usize },
    Right { pick: usize },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => (0_usize..4).prop_map(|column| Op::Add { column }),
        1 => any::<usize>().prop_map(|pick| Op::Delete { pick }),
        1 => any::<usize>().prop_map(|pick| Op::Up { pick }),
        1 => any::<usize>().prop_map(|pick| Op::Down { pick }),
        1 => any::<usize>().prop_map(|pick| Op::Left { pick }),
        1 => any::<usize>().prop_map(|pick| Op::Right { pick }),
    ]
}

fn focus_of(board: &Board, pick: usize) -> FocusRef {
    let card = &board.cards()[pick % board.len()];
    FocusRef::new(card.column, card.position)
}

proptest! {
    #![proptest_config(Config::with_cases(128))]
    #[test]
    fn positions_stay_contiguous_after_every_operation(ops in prop::collection::vec(op(), 1..200)) {
        let mut board = Board::seeded(ColumnSet::default(), DefaultCardConfig::default());

        for (step, op) in ops.into_iter().enumerate() {
            let result = match op {
                Op::Add { column } => board.add_card(
                    format!("card {}", step),
                    String::new(),
                    column,
                    AddPlacement::default(),
                ),
                Op::Delete { pick } => board.delete_card(focus_of(&board, pick)),
                Op::Up { pick } => {
                    board.move_card_within_column(focus_of(&board, pick), VerticalDirection::Up)
                }
                Op::Down { pick } => {
                    board.move_card_within_column(focus_of(&board, pick), VerticalDirection::Down)
                }
                Op::Left { pick } => {
                    board.move_card_across_columns(focus_of(&board, pick), MoveDirection::Left)
                }
                Op::Right { pick } => {
                    board.move_card_across_columns(focus_of(&board, pick), MoveDirection::Right)
                }
            };
            prop_assert!(result.is_ok(), "step {}: {:?}", step, result);
            board.resort();

            let violations = board.check();
            prop_assert!(violations.is_empty(), "step {}: {:?}", step, violations);
            prop_assert!(!board.is_empty());
        }
    }

    #[test]
    fn ids_stay_unique_and_below_next_id(ops in prop::collection::vec(op(), 1..100)) {
        let mut board = Board::seeded(ColumnSet::default(), DefaultCardConfig::default());

        for op in ops {
            let _ = match op {
                Op::Add { column } => {
                    board.add_card("x".into(), String::new(), column, AddPlacement::default())
                }
                Op::Delete { pick } => board.delete_card(focus_of(&board, pick)),
                Op::Right { pick } => {
                    board.move_card_across_columns(focus_of(&board, pick), MoveDirection::Right)
                }
                _ => continue,
            };
            board.resort();
        }

        let mut ids: Vec<u64> = board.cards().iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), board.len());
        prop_assert!(board.cards().iter().all(|c| c.id < board.next_card_id()));
    }
}
