//! Growth audit: fetch, analyze, score

pub mod patterns;
pub mod scoring;

pub use scoring::{Findings, ScoreCalculator};

use crate::error::AuditError;
use crate::github::RepoSource;
use crate::{AuditScore, RepoRef, ScoreBreakdown};
use log::debug;
use patterns::SEARCH_QUERIES;

/// Outcome of a single audit
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub repo: RepoRef,
    pub score: AuditScore,
    pub breakdown: ScoreBreakdown,
    pub findings: Findings,
}

/// Runs the audit pipeline against a repository source
pub struct Auditor<S> {
    source: S,
}

impl<S: RepoSource> Auditor<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Audit `owner/repo`. A missing manifest aborts the audit; failed code
    /// searches are skipped.
    pub fn audit(&self, repo: &str) -> Result<AuditOutcome, AuditError> {
        let repo = RepoRef::parse(repo);
        let manifest = self.source.fetch_manifest(&repo)?;
        let event_patterns = self.scan_for_events(&repo);

        let findings = Findings::collect(&manifest, event_patterns);
        let (score, breakdown) = ScoreCalculator::calculate_with_breakdown(&findings);

        Ok(AuditOutcome {
            repo,
            score,
            breakdown,
            findings,
        })
    }

    /// Queries with at least one match, in query order
    pub fn scan_for_events(&self, repo: &RepoRef) -> Vec<String> {
        let mut found = Vec::new();
        for query in SEARCH_QUERIES {
            match self.source.count_code_matches(repo, query) {
                Ok(count) if count > 0 => found.push(query.to_string()),
                Ok(_) => {}
                Err(e) => debug!("search {:?} in {} failed: {}", query, repo, e),
            }
        }
        found
    }
}
