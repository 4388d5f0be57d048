use crate::traits::CardStore;
use taskboard_core::{DefaultCardConfig, TaskboardResult};
use taskboard_domain::{Board, ColumnSet};

/// Load the board held by `store`.
///
/// An absent or empty store is seeded with the default card, and the seeded
/// board is written back before returning. Read or parse failures are
/// returned unchanged and nothing is written.
pub async fn load_board<S: CardStore + ?Sized>(
    store: &S,
    columns: ColumnSet,
    default_card: DefaultCardConfig,
) -> TaskboardResult<Board> {
    match store.load().await? {
        Some(cards) if !cards.is_empty() => {
            tracing::debug!("Loaded {} cards from {}", cards.len(), store.location());
            Board::from_cards(columns, cards, default_card)
        }
        _ => {
            let board = Board::seeded(columns, default_card);
            store.save(board.cards()).await?;
            tracing::info!("Seeded new board at {}", store.location());
            Ok(board)
        }
    }
}

/// Overwrite the store with every card on the board.
pub async fn save_board<S: CardStore + ?Sized>(store: &S, board: &Board) -> TaskboardResult<()> {
    store.save(board.cards()).await
}
