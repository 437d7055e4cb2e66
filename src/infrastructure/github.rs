//! GitHub contents API client

use crate::error::{DevlogError, Result};
use crate::infrastructure::source::{ContentSource, RemoteContent};
use crate::infrastructure::Config;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Url;
use std::time::Duration;

const USER_AGENT: &str = concat!("devlog/", env!("CARGO_PKG_VERSION"));
const ACCEPT_JSON: &str = "application/vnd.github.v3+json";

/// Reads a notes repository through the GitHub contents API
#[derive(Debug, Clone)]
pub struct GithubSource {
    http: reqwest::Client,
    base: Url,
    owner: String,
    repository: String,
}

impl GithubSource {
    /// Build a client authenticated with a bearer token
    pub fn new(config: &Config, token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .map_err(|_| DevlogError::Config("Access token contains invalid characters".into()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(GithubSource {
            http,
            base: parse_base(&config.api_base)?,
            owner: config.owner.clone(),
            repository: config.repository.clone(),
        })
    }

    fn repo_url(&self) -> Result<Url> {
        self.join(&format!("repos/{}/{}", self.owner, self.repository))
    }

    fn contents_url(&self, path: &str) -> Result<Url> {
        self.join(&format!(
            "repos/{}/{}/contents/{}",
            self.owner,
            self.repository,
            path.trim_matches('/')
        ))
    }

    fn join(&self, relative: &str) -> Result<Url> {
        self.base
            .join(relative)
            .map_err(|e| DevlogError::Config(format!("Invalid API path '{}': {}", relative, e)))
    }
}

/// Parse the API base, making sure relative joins append to it
fn parse_base(api_base: &str) -> Result<Url> {
    let normalized = if api_base.ends_with('/') {
        api_base.to_string()
    } else {
        format!("{}/", api_base)
    };
    Url::parse(&normalized)
        .map_err(|e| DevlogError::Config(format!("Invalid api_base '{}': {}", api_base, e)))
}

/// Turn a non-success status into [`DevlogError::Api`]
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response> {
    if !resp.status().is_success() {
        return Err(DevlogError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

#[async_trait]
impl ContentSource for GithubSource {
    async fn verify_authentication(&self) -> bool {
        let url = match self.repo_url() {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(%e, "cannot build repository url");
                return false;
            }
        };

        match self.http.get(url).send().await {
            Ok(resp) if resp.status().is_success() => {
                tracing::info!(
                    owner = %self.owner,
                    repo = %self.repository,
                    "authenticated to repository"
                );
                true
            }
            Ok(resp) => {
                tracing::warn!(status = resp.status().as_u16(), "failed to authenticate to repository");
                false
            }
            Err(e) => {
                tracing::error!(%e, "authentication request failed");
                false
            }
        }
    }

    async fn list_contents(&self, path: &str) -> Result<Vec<RemoteContent>> {
        let url = self.contents_url(path)?;
        let resp = check_response(self.http.get(url).send().await?).await?;
        Ok(resp.json().await?)
    }

    async fn fetch_text(&self, download_url: &str) -> Result<String> {
        let resp = check_response(self.http.get(download_url).send().await?).await?;
        Ok(resp.text().await?)
    }

    async fn fetch_bytes(&self, download_url: &str) -> Result<Vec<u8>> {
        let resp = check_response(self.http.get(download_url).send().await?).await?;
        Ok(resp.bytes().await?.to_vec())
    }
}
