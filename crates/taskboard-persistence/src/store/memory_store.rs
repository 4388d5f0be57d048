use crate::traits::CardStore;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use taskboard_core::{TaskboardError, TaskboardResult};
use taskboard_domain::Card;
use tokio::sync::Mutex;

/// In-memory card store.
///
/// Stands in for a file in tests and can be told to fail saves so callers can
/// exercise their storage error paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cards: Mutex<Option<Vec<Card>>>,
    fail_saves: AtomicBool,
    save_count: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self {
            cards: Mutex::new(Some(cards)),
            ..Self::default()
        }
    }

    /// Make every following `save` fail with an IO error until reset.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    pub async fn stored(&self) -> Option<Vec<Card>> {
        self.cards.lock().await.clone()
    }
}

#[async_trait]
impl CardStore for MemoryStore {
    async fn load(&self) -> TaskboardResult<Option<Vec<Card>>> {
        Ok(self.cards.lock().await.clone())
    }

    async fn save(&self, cards: &[Card]) -> TaskboardResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(TaskboardError::Io(std::io::Error::other(
                "memory store is set to fail saves",
            )));
        }
        *self.cards.lock().await = Some(cards.to_vec());
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
