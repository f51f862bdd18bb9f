//! GitHub REST API client.

use super::error::FetchError;
use super::http::check_response;
use super::{RawEntry, ReadmePayload, RepoMetadata, RepoSource};
use crate::config::GithubConfig;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use std::time::Duration;

const ACCEPT_V3: &str = "application/vnd.github.v3+json";

/// [`RepoSource`] backed by the GitHub REST API.
pub struct GitHubClient {
    http: reqwest::Client,
    api_base: String,
}

impl GitHubClient {
    /// Build a client from the `[github]` config section.
    ///
    /// A configured token is sent as `Authorization: token <t>` on every
    /// request, which raises the anonymous rate limit.
    pub fn new(config: &GithubConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_V3));
        if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("token {token}"))
                .map_err(|e| FetchError::Decode(format!("invalid token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn repo_url(&self, owner: &str, repo: &str, suffix: &str) -> String {
        format!("{}/repos/{owner}/{repo}{suffix}", self.api_base)
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        tracing::debug!(%url, "GET");
        let resp = self.http.get(url).send().await?;
        check_response(resp).await
    }
}

impl RepoSource for GitHubClient {
    async fn metadata(&self, owner: &str, repo: &str) -> Result<RepoMetadata, FetchError> {
        let resp = self.get(&self.repo_url(owner, repo, "")).await?;
        Ok(resp.json().await?)
    }

    async fn contents(&self, owner: &str, repo: &str) -> Result<Vec<RawEntry>, FetchError> {
        let resp = self.get(&self.repo_url(owner, repo, "/contents")).await?;
        Ok(resp.json().await?)
    }

    async fn readme(&self, owner: &str, repo: &str) -> Result<ReadmePayload, FetchError> {
        let resp = self.get(&self.repo_url(owner, repo, "/readme")).await?;
        Ok(resp.json().await?)
    }
}
