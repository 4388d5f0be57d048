use std::path::Path;
use taskboard_core::TaskboardResult;
use tokio::fs;
use tokio::io::AsyncWriteExt;

#[cfg(unix)]
fn new_file_permissions() -> Option<std::fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<std::fs::Permissions> {
    None
}

/// Atomic file writer that prevents data corruption
/// Uses write-to-temp-file → atomic-rename pattern for safety
pub struct AtomicWriter;

impl AtomicWriter {
    /// Write data to a file atomically
    /// Writes to a temporary file first, flushes it to disk, then renames it
    /// over the target. Readers see either the old contents or the new ones.
    pub async fn write_atomic(path: &Path, data: &[u8]) -> TaskboardResult<()> {
        // Create temp file in same directory to ensure same filesystem
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let temp_file = tempfile::NamedTempFile::new_in(parent)?;
        if let Some(permissions) = Self::target_permissions(path).await? {
            temp_file.as_file().set_permissions(permissions)?;
        }

        let mut file = fs::File::from_std(temp_file.reopen()?);
        file.write_all(data).await?;
        file.sync_all().await?;
        drop(file);

        // Atomic rename (atomic on POSIX systems)
        temp_file.persist(path).map_err(|e| e.error)?;

        tracing::debug!(
            "Atomically wrote {} bytes to {}",
            data.len(),
            path.display()
        );
        Ok(())
    }

    /// Permissions the replacement file should carry: those of the existing
    /// file, or 0644 for a new one on Unix. The temp file starts out 0600.
    async fn target_permissions(path: &Path) -> TaskboardResult<Option<std::fs::Permissions>> {
        match fs::metadata(path).await {
            Ok(metadata) => Ok(Some(metadata.permissions())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(new_file_permissions()),
            Err(e) => Err(e.into()),
        }
    }

    /// Read all data from a file
    pub async fn read_all(path: &Path) -> TaskboardResult<Vec<u8>> {
        let data = fs::read(path).await?;
        tracing::debug!("Read {} bytes from {}", data.len(), path.display());
        Ok(data)
    }
}
