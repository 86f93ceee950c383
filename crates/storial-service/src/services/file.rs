//! Cover file storage on the local filesystem

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use storial_core::DomainError;
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, instrument, warn};

use super::error::ServiceResult;

/// Stores cover images under a single directory
#[derive(Debug, Clone)]
pub struct FileService {
    dir: PathBuf,
}

impl FileService {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding every stored file
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of a stored file
    pub fn full_path(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    /// Whether `filename` names a plain file inside the cover directory
    pub fn is_safe_filename(filename: &str) -> bool {
        !filename.is_empty()
            && !filename.contains(['/', '\\'])
            && !filename.contains("..")
    }

    /// Store `bytes` under a fresh `{unix_millis}{.ext}` name
    ///
    /// The extension is taken from `original_name`. Returns the stored filename.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload(&self, original_name: &str, bytes: &[u8]) -> ServiceResult<String> {
        fs::create_dir_all(&self.dir).await.map_err(storage_error)?;

        let ext = extension_of(original_name);
        let mut stamp = Utc::now().timestamp_millis();
        loop {
            let filename = format!("{stamp}{ext}");
            let open = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.full_path(&filename))
                .await;

            match open {
                Ok(file) => {
                    write_or_discard(&self.full_path(&filename), file, bytes).await?;
                    debug!(filename = %filename, "Cover stored");
                    return Ok(filename);
                }
                // Two uploads in the same millisecond
                Err(e) if e.kind() == ErrorKind::AlreadyExists => stamp += 1,
                Err(e) => return Err(storage_error(e)),
            }
        }
    }

    /// Delete a stored file, ignoring failures
    ///
    /// An empty filename is a no-op.
    pub async fn remove_file(&self, filename: &str) {
        if filename.is_empty() {
            return;
        }
        if let Err(e) = fs::remove_file(self.full_path(filename)).await {
            warn!(filename = %filename, error = %e, "Failed to remove cover file");
        }
    }

    /// Read a file's raw bytes
    pub async fn get(&self, full_path: &Path) -> ServiceResult<Vec<u8>> {
        fs::read(full_path).await.map_err(storage_error)
    }
}

fn extension_of(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}

/// Write `bytes` through `writer`, deleting `path` when the write fails
async fn write_or_discard<W>(path: &Path, mut writer: W, bytes: &[u8]) -> ServiceResult<()>
where
    W: AsyncWrite + Unpin,
{
    let written = async {
        writer.write_all(bytes).await?;
        writer.flush().await
    }
    .await;

    if let Err(e) = written {
        drop(writer);
        if let Err(remove_err) = fs::remove_file(path).await {
            warn!(error = %remove_err, path = %path.display(), "Failed to remove partial file");
        }
        return Err(storage_error(e));
    }
    Ok(())
}

fn storage_error(e: std::io::Error) -> super::error::ServiceError {
    DomainError::StorageError(e.to_string()).into()
}
