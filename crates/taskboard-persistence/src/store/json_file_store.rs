use crate::migration::Migrator;
use crate::store::atomic_writer::AtomicWriter;
use crate::traits::{CardStore, FormatVersion, Serializer};
use crate::JsonSerializer;
use std::path::{Path, PathBuf};
use taskboard_core::TaskboardResult;
use taskboard_domain::Card;

/// JSON file-based card store.
/// The file holds a single array of card records and is replaced atomically
/// on every save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a new JSON file store
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl CardStore for JsonFileStore {
    async fn load(&self) -> TaskboardResult<Option<Vec<Card>>> {
        if !self.path.exists() {
            tracing::info!("No card file at {}", self.path.display());
            return Ok(None);
        }

        // Detect current file version
        let current_version = Migrator::detect_version(&self.path).await?;

        // Migrate if necessary
        if current_version == FormatVersion::Legacy {
            tracing::info!(
                "Detected legacy format at {}. Starting migration...",
                self.path.display()
            );
            Migrator::migrate(FormatVersion::Legacy, FormatVersion::Current, &self.path).await?;
            tracing::info!("Migration completed successfully");
        }

        let file_bytes = AtomicWriter::read_all(&self.path).await?;
        let cards: Vec<Card> = JsonSerializer.deserialize(&file_bytes)?;

        tracing::info!(
            "Loaded {} cards ({} bytes) from {}",
            cards.len(),
            file_bytes.len(),
            self.path.display()
        );

        Ok(Some(cards))
    }

    async fn save(&self, cards: &[Card]) -> TaskboardResult<()> {
        let json_bytes = JsonSerializer.serialize(&cards.to_vec())?;

        // Write atomically to disk
        AtomicWriter::write_atomic(&self.path, &json_bytes).await?;

        tracing::info!(
            "Saved {} cards ({} bytes) to {}",
            cards.len(),
            json_bytes.len(),
            self.path.display()
        );

        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
