//! Remote content source
//!
//! The engine only depends on the [`ContentSource`] trait: fetch the
//! registry listing once, list a component directory, and retrieve a
//! file's bytes. [`GithubSource`] is the production implementation
//! over the GitHub trees and contents APIs. Timeouts live here, not
//! in the engine.

use async_trait::async_trait;
use serde::Deserialize;

use super::{RegistryEntry, RegistryError};

/// Default registry repository (`owner/name` on GitHub)
pub const DEFAULT_REGISTRY_REPO: &str = "elevatedthird/propel-components";

const GITHUB_API_VERSION: &str = "2022-11-28";

/// One file inside a remote component directory
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteFile {
    /// File name, without any directory prefix
    pub name: String,

    /// Raw-content retrieval handle. Directories in a contents
    /// listing carry no download URL.
    #[serde(default)]
    pub download_url: Option<String>,
}

/// Read-only access to the remote component collection
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the full registry listing. Called once per session.
    async fn fetch_index(&self) -> Result<Vec<RegistryEntry>, RegistryError>;

    /// List the files directly under a registry path.
    async fn list_component(&self, path: &str) -> Result<Vec<RemoteFile>, RegistryError>;

    /// Retrieve the raw bytes of a listed file.
    async fn fetch_file(&self, file: &RemoteFile) -> Result<Vec<u8>, RegistryError>;
}

/// Shape of the GitHub recursive tree response
#[derive(Debug, Deserialize)]
struct TreeResponse {
    tree: Vec<RegistryEntry>,
}

/// Content source backed by a GitHub repository
pub struct GithubSource {
    client: reqwest::Client,
    api_url: String,
}

impl GithubSource {
    /// Build a source for `owner/name`, resolved against the public
    /// GitHub API.
    pub fn new(repo: &str) -> Result<Self, RegistryError> {
        use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );

        let client = reqwest::Client::builder()
            .user_agent(concat!("compkit/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| RegistryError::RegistryUnavailable {
                reason: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_url: format!("https://api.github.com/repos/{repo}"),
        })
    }
}

#[async_trait]
impl ContentSource for GithubSource {
    async fn fetch_index(&self) -> Result<Vec<RegistryEntry>, RegistryError> {
        let url = format!("{}/git/trees/main?recursive=1", self.api_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            RegistryError::RegistryUnavailable {
                reason: e.to_string(),
            }
        })?;

        if !response.status().is_success() {
            return Err(RegistryError::RegistryUnavailable {
                reason: format!("HTTP {} from {url}", response.status()),
            });
        }

        // A response without the `tree` field is as unusable as a
        // failed request.
        let body: TreeResponse =
            response
                .json()
                .await
                .map_err(|e| RegistryError::RegistryUnavailable {
                    reason: format!("unexpected listing shape: {e}"),
                })?;

        Ok(body.tree)
    }

    async fn list_component(&self, path: &str) -> Result<Vec<RemoteFile>, RegistryError> {
        let url = format!("{}/contents/{path}", self.api_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            RegistryError::ComponentFetchFailed {
                path: path.to_string(),
                reason: e.to_string(),
            }
        })?;

        if !response.status().is_success() {
            return Err(RegistryError::ComponentFetchFailed {
                path: path.to_string(),
                reason: format!("HTTP {} from {url}", response.status()),
            });
        }

        response
            .json()
            .await
            .map_err(|e| RegistryError::ComponentFetchFailed {
                path: path.to_string(),
                reason: format!("unexpected listing shape: {e}"),
            })
    }

    async fn fetch_file(&self, file: &RemoteFile) -> Result<Vec<u8>, RegistryError> {
        let url = file
            .download_url
            .as_deref()
            .ok_or_else(|| RegistryError::ComponentFetchFailed {
                path: file.name.clone(),
                reason: "entry has no download URL".to_string(),
            })?;

        let response =
            self.client
                .get(url)
                .send()
                .await
                .map_err(|e| RegistryError::ComponentFetchFailed {
                    path: file.name.clone(),
                    reason: e.to_string(),
                })?;

        if !response.status().is_success() {
            return Err(RegistryError::ComponentFetchFailed {
                path: file.name.clone(),
                reason: format!("HTTP {} from {url}", response.status()),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RegistryError::ComponentFetchFailed {
                path: file.name.clone(),
                reason: e.to_string(),
            })?;

        Ok(bytes.to_vec())
    }
}
