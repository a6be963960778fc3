use crate::export::EncodedDatasets;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Destination for encoded tables (a directory, a browser download, a test double).
#[async_trait]
pub trait DatasetSink: Send + Sync {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl DatasetSink for DirectorySink {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("Failed to create output directory {:?}", self.root))?;
        let path = self.root.join(file_name);
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write {:?}", path))?;
        debug!("Wrote {} bytes to {:?}", bytes.len(), path);
        Ok(())
    }
}

/// Saves titles first, then credits.
pub async fn export_datasets(sink: &dyn DatasetSink, encoded: &EncodedDatasets) -> Result<()> {
    for table in [&encoded.titles, &encoded.credits] {
        sink.save(table.file_name, &table.bytes).await?;
        info!("Saved {} ({} rows)", table.file_name, table.rows);
    }
    Ok(())
}
