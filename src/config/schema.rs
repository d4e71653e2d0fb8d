//! Config schema and deserialization

use crate::github::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use serde::{Deserialize, Serialize};

/// Environment variable holding a GitHub token
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";
/// Environment variable overriding the API base URL
pub const ENV_API_URL: &str = "GROWTHOS_API_URL";

/// Contents of `.growthosrc.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// PostHog project key written by `growthos init`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posthog_key: Option<String>,

    /// Token sent as a bearer header to raise GitHub rate limits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,

    /// API base URL (GitHub Enterprise or a local stand-in)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    /// Apply environment overrides. Empty values are ignored.
    pub fn merge_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = non_empty(ENV_GITHUB_TOKEN) {
            self.github_token = Some(token);
        }
        if let Some(url) = non_empty(ENV_API_URL) {
            self.api_url = Some(url);
        }
        self
    }
}
