use crate::store::atomic_writer::AtomicWriter;
use crate::traits::{FormatVersion, Serializer};
use crate::JsonSerializer;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use taskboard_core::{TaskboardError, TaskboardResult};
use taskboard_domain::Card;

/// A card record in the legacy layout.
#[derive(Debug, Deserialize)]
struct LegacyCard {
    column: usize,
    position: usize,
    name: String,
    #[serde(default)]
    description: String,
}

/// Orchestrates migrations between format versions
pub struct Migrator;

impl Migrator {
    /// Detect the version of a persisted file
    pub async fn detect_version(path: &Path) -> TaskboardResult<FormatVersion> {
        if !path.exists() {
            return Ok(FormatVersion::Current);
        }

        let content = tokio::fs::read(path).await?;
        let value: Value = serde_json::from_slice(&content)
            .map_err(|e| TaskboardError::Serialization(e.to_string()))?;

        Ok(Self::detect_value_version(&value))
    }

    /// Legacy records carry `position` and no `id`; anything else is current.
    pub fn detect_value_version(value: &Value) -> FormatVersion {
        let first = value.as_array().and_then(|records| records.first());
        match first {
            Some(record) if record.get("id").is_none() && record.get("position").is_some() => {
                FormatVersion::Legacy
            }
            _ => FormatVersion::Current,
        }
    }

    /// Migrate a file from one version to another
    pub async fn migrate(from: FormatVersion, to: FormatVersion, path: &Path) -> TaskboardResult<()> {
        if from == to {
            return Ok(());
        }

        match (from, to) {
            (FormatVersion::Legacy, FormatVersion::Current) => Self::migrate_legacy(path).await,
            _ => Err(TaskboardError::Serialization(format!(
                "Unsupported migration: {:?} -> {:?}",
                from, to
            ))),
        }
    }

    /// Convert legacy records, assigning ids in display order.
    pub fn convert_legacy(value: Value) -> TaskboardResult<Vec<Card>> {
        let mut legacy: Vec<LegacyCard> = serde_json::from_value(value)
            .map_err(|e| TaskboardError::Serialization(e.to_string()))?;
        legacy.sort_by_key(|c| (c.column, c.position));

        Ok(legacy
            .into_iter()
            .enumerate()
            .map(|(id, c)| Card::new(id as u64, c.name, c.description, c.column, c.position))
            .collect())
    }

    async fn migrate_legacy(path: &Path) -> TaskboardResult<()> {
        let content = tokio::fs::read(path).await?;
        let legacy_data: Value = serde_json::from_slice(&content)
            .map_err(|e| TaskboardError::Serialization(e.to_string()))?;

        // Create backup
        let backup_path = path.with_extension("legacy.backup");
        tokio::fs::copy(path, &backup_path).await?;
        tracing::info!("Created backup at {}", backup_path.display());

        let cards = Self::convert_legacy(legacy_data)?;
        let bytes = JsonSerializer.serialize(&cards)?;
        AtomicWriter::write_atomic(path, &bytes).await?;

        tracing::info!(
            "Migrated {} cards in {} to the current format",
            cards.len(),
            path.display()
        );

        match Self::verify_migration(path, &cards).await {
            Ok(()) => {
                if let Err(e) = tokio::fs::remove_file(&backup_path).await {
                    tracing::warn!(
                        "Migration successful but failed to remove backup at {}: {}",
                        backup_path.display(),
                        e
                    );
                } else {
                    tracing::info!("Migration verified, backup removed");
                }
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    "Migration verification failed: {}. Backup preserved at {}",
                    e,
                    backup_path.display()
                );
                Err(e)
            }
        }
    }

    /// Re-read the migrated file and compare it with what was written
    async fn verify_migration(path: &Path, expected: &[Card]) -> TaskboardResult<()> {
        let migrated_content = tokio::fs::read(path).await?;
        let migrated: Vec<Card> = JsonSerializer.deserialize(&migrated_content)?;

        let same = migrated.len() == expected.len()
            && migrated.iter().zip(expected).all(|(a, b)| {
                a.id == b.id
                    && a.name == b.name
                    && a.description == b.description
                    && a.column == b.column
                    && a.position == b.position
            });
        if !same {
            return Err(TaskboardError::Serialization(
                "Migrated cards do not match the converted legacy records".to_string(),
            ));
        }

        tracing::debug!("Migration verification passed");
        Ok(())
    }
}
