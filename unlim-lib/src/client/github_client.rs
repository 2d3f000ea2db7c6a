use crate::config::Config;
use crate::models::release::{ContentResponse, UpdateError};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;

/// Anything that can hand back a repository file the way the GitHub contents API does.
#[async_trait]
pub trait ContentSource {
    async fn fetch_file(&self, path: &str) -> Result<ContentResponse, UpdateError>;
}

#[async_trait]
impl<T: ContentSource + Sync + ?Sized> ContentSource for &T {
    async fn fetch_file(&self, path: &str) -> Result<ContentResponse, UpdateError> {
        (**self).fetch_file(path).await
    }
}

#[derive(Debug, Clone)]
pub struct GitHubContentsClient {
    api_base_url: String,
    client: Client,
}

impl GitHubContentsClient {
    /// No request timeout is set; reqwest's defaults apply.
    pub fn new(config: &Config) -> Result<Self, UpdateError> {
        let client = Client::builder()
            .user_agent(concat!("unlim-update/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(GitHubContentsClient {
            api_base_url: config.api_base_url.clone(),
            client,
        })
    }

    fn file_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl ContentSource for GitHubContentsClient {
    async fn fetch_file(&self, path: &str) -> Result<ContentResponse, UpdateError> {
        let url = self.file_url(path);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        if response.status().is_success() {
            let content: ContentResponse = response.json().await?;
            debug!(
                "Fetched {} (sha {})",
                content.path.as_deref().unwrap_or(path),
                content.sha.as_deref().unwrap_or("unknown")
            );
            Ok(content)
        } else {
            Err(UpdateError::ApiError(response.status().to_string()))
        }
    }
}
