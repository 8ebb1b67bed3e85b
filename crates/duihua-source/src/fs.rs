use std::io::ErrorKind;
use std::path::PathBuf;

use crate::{ContentSource, SourceError};

/// Files under a local directory
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait::async_trait]
impl ContentSource for FsSource {
    async fn fetch(&self, path: &str) -> Result<String, SourceError> {
        let full = self.root.join(path);
        tracing::debug!("Reading {}", full.display());

        tokio::fs::read_to_string(&full).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => SourceError::NotFound(full.display().to_string()),
            _ => SourceError::IoError(e),
        })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}
