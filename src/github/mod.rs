//! Read-only GitHub REST client used by the auditor

pub mod contents;

use crate::config::Config;
use crate::error::AuditError;
use crate::manifest::PackageManifest;
use crate::RepoRef;
use contents::{ContentsResponse, SearchResponse};
use log::{debug, info};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = "GrowthOS-Audit";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the auditor gets repository data from
pub trait RepoSource {
    /// Fetch and parse `package.json` at the repository root
    fn fetch_manifest(&self, repo: &RepoRef) -> Result<PackageManifest, AuditError>;

    /// Number of code search results for `query` scoped to the repository
    fn count_code_matches(&self, repo: &RepoRef, query: &str) -> Result<u64, AuditError>;
}

/// Blocking GitHub API client
pub struct GitHubClient {
    http: Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Client for the public API with default settings
    pub fn new() -> Result<Self, AuditError> {
        Self::from_config(&Config::default())
    }

    /// Build a client from the effective configuration
    pub fn from_config(config: &Config) -> Result<Self, AuditError> {
        let http = Client::builder()
            .user_agent(config.user_agent())
            .timeout(Duration::from_secs(config.timeout_secs()))
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url().trim_end_matches('/').to_string(),
            token: config.github_token.clone(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn get(&self, url: &str) -> RequestBuilder {
        debug!("GET {}", url);
        let request = self
            .http
            .get(url)
            .header("Accept", "application/vnd.github+json");
        match self.token {
            Some(ref token) => request.bearer_auth(token),
            None => request,
        }
    }
}

impl RepoSource for GitHubClient {
    fn fetch_manifest(&self, repo: &RepoRef) -> Result<PackageManifest, AuditError> {
        let url = format!(
            "{}/repos/{}/{}/contents/package.json",
            self.api_url, repo.owner, repo.name
        );
        let response = self.get(&url).send()?;
        let status = response.status();

        if !status.is_success() {
            if status == StatusCode::NOT_FOUND {
                info!("{}: package.json not found (404)", repo);
            }
            let body = response.text().unwrap_or_default();
            return Err(AuditError::from_status(status.as_u16(), body));
        }

        let contents: ContentsResponse = response.json()?;
        let bytes = contents.decode()?;
        PackageManifest::from_slice(&bytes)
    }

    fn count_code_matches(&self, repo: &RepoRef, query: &str) -> Result<u64, AuditError> {
        let url = format!("{}/search/code", self.api_url);
        let q = format!("{} repo:{}", query, repo);
        let response = self.get(&url).query(&[("q", q)]).send()?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AuditError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: SearchResponse = response.json()?;
        Ok(body.total_count)
    }
}
