use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;

/// Byte store for uploaded CV files, keyed by server-generated filename.
/// The record of *which* filename belongs to a user lives on the user row;
/// this trait only moves bytes.
#[async_trait]
pub trait CvStore: Send + Sync {
    async fn save(&self, filename: &str, body: Bytes) -> anyhow::Result<()>;
    /// `Ok(None)` when no such file exists.
    async fn read(&self, filename: &str) -> anyhow::Result<Option<Vec<u8>>>;
    /// Idempotent; removing a missing file is not an error.
    async fn delete(&self, filename: &str) -> anyhow::Result<()>;
}

/// Filesystem-backed store rooted at `CV_UPLOAD_DIR`.
#[derive(Clone)]
pub struct FsCvStore {
    root: PathBuf,
}

impl FsCvStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }
}

#[async_trait]
impl CvStore for FsCvStore {
    async fn save(&self, filename: &str, body: Bytes) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .context("create cv upload dir")?;
        tokio::fs::write(self.path_for(filename), &body)
            .await
            .context("write cv file")?;
        Ok(())
    }

    async fn read(&self, filename: &str) -> anyhow::Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.path_for(filename)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context("read cv file"),
        }
    }

    async fn delete(&self, filename: &str) -> anyhow::Result<()> {
        match tokio::fs::remove_file(self.path_for(filename)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context("delete cv file"),
        }
    }
}
