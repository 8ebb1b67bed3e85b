use std::sync::Arc;

mod fs;
mod http;
mod loader;
mod memory;

pub use fs::FsSource;
pub use http::HttpSource;
pub use loader::{load_packs, load_vocabulary};
pub use memory::MemorySource;

/// Where static JSON content comes from
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    /// Raw text of a file relative to the source root
    async fn fetch(&self, path: &str) -> Result<String, SourceError>;

    /// Human readable location for logs and error screens
    fn describe(&self) -> String;
}

/// Pick a source for a configured location: URLs go over HTTP, anything
/// else is a directory
pub fn source_for(location: &str) -> Arc<dyn ContentSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Arc::new(HttpSource::new(location))
    } else {
        Arc::new(FsSource::new(location))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Parse error in {file}: {source}")]
    ParseError {
        file: String,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_pick_http() {
        assert!(source_for("https://example.com/packs").describe().starts_with("https://"));
        assert!(source_for("./packs").describe().contains("packs"));
    }
}
