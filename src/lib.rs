//! GrowthOS: growth tracking auditor
//!
//! This library inspects a public GitHub repository and estimates how well it
//! instruments user-growth telemetry: analytics SDKs, event tracking calls and
//! payment/auth hooks. The result is a 0-100 score plus the list of missing
//! capabilities and recommendations.

pub mod audit;
pub mod config;
pub mod error;
pub mod github;
pub mod init;
pub mod manifest;
pub mod reporter;

pub use audit::{Auditor, ScoreCalculator};
pub use error::AuditError;
pub use github::{GitHubClient, RepoSource};
pub use manifest::{AnalyticsStack, PackageManifest};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of auditing a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditScore {
    /// Overall growth score (0-100)
    pub total: u8,
    /// Capabilities that failed their check, in check order
    pub missing: Vec<String>,
    /// One recommendation per failed check, in check order
    pub recommendations: Vec<String>,
}

impl AuditScore {
    /// First `n` missing entries joined for display
    pub fn top_missing(&self, n: usize) -> String {
        self.missing
            .iter()
            .take(n)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Points awarded by each check (penalty is negative)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// Analytics SDK present (0 or 30)
    pub analytics: i32,
    /// Matched search queries (0-40)
    pub events: i32,
    /// Payment SDK present (0 or 15)
    pub payments: i32,
    /// Auth SDK present (0 or 15)
    pub auth: i32,
    /// Vanity metric penalty (0 or -10)
    pub vanity_penalty: i32,
}

impl ScoreBreakdown {
    /// Sum of all checks clamped to 0-100
    pub fn total(&self) -> u8 {
        let sum = self.analytics + self.events + self.payments + self.auth + self.vanity_penalty;
        sum.clamp(0, 100) as u8
    }
}

/// Repository reference parsed from `owner/repo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Split on `/` and keep the first two segments. Nothing else is validated;
    /// a missing name is sent as-is and the host answers 404.
    pub fn parse(input: &str) -> Self {
        let mut parts = input.split('/');
        let owner = parts.next().unwrap_or_default().to_string();
        let name = parts.next().unwrap_or_default().to_string();
        Self { owner, name }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
