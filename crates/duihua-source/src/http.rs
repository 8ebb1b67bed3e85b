use reqwest::StatusCode;

use crate::{ContentSource, SourceError};

/// Files served under a base URL
#[derive(Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait::async_trait]
impl ContentSource for HttpSource {
    async fn fetch(&self, path: &str) -> Result<String, SourceError> {
        let url = self.url_for(path);
        tracing::debug!("Fetching {url}");

        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(url));
        }

        if !response.status().is_success() {
            return Err(SourceError::HttpStatus {
                status: response.status().as_u16(),
                url,
            });
        }

        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_with_single_slash() {
        let source = HttpSource::new("http://localhost:8000/packs/");
        assert_eq!(source.url_for("packs.json"), "http://localhost:8000/packs/packs.json");
        assert_eq!(source.url_for("/daily.json"), "http://localhost:8000/packs/daily.json");
    }
}
