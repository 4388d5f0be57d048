use async_trait::async_trait;
use taskboard_core::TaskboardResult;
use taskboard_domain::Card;

/// Trait for abstract card storage.
/// The whole card list is read and written as one document; there are no
/// partial updates.
#[async_trait]
pub trait CardStore: Send + Sync {
    /// Load every stored card, or `None` if nothing has been stored yet
    async fn load(&self) -> TaskboardResult<Option<Vec<Card>>>;

    /// Replace the stored cards with `cards`
    async fn save(&self, cards: &[Card]) -> TaskboardResult<()>;

    /// Human-readable location, used in log and error messages
    fn location(&self) -> String;
}

/// Trait for serialization/deserialization strategies
pub trait Serializer<T: Send + Sync>: Send + Sync {
    /// Serialize data to bytes
    fn serialize(&self, data: &T) -> TaskboardResult<Vec<u8>>;

    /// Deserialize data from bytes
    fn deserialize(&self, bytes: &[u8]) -> TaskboardResult<T>;
}

/// On-disk format versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormatVersion {
    /// Records keyed `column`/`position`/`name`/`description`, without ids
    Legacy,
    /// Records keyed `id`/`name`/`desc`/`column`/`pos`
    Current,
}
