//! JSON audit report

use crate::audit::patterns::NEXT_STEPS;
use crate::AuditScore;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Shareable report object built from an audit score
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub score: u8,
    /// ISO-8601 UTC timestamp, millisecond precision
    pub audit_date: String,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
    pub next_steps: Vec<String>,
}

impl AuditReport {
    /// Build a report stamped with the current time
    pub fn new(score: &AuditScore) -> Self {
        Self::at(score, Utc::now())
    }

    /// Build a report stamped with `when`
    pub fn at(score: &AuditScore, when: DateTime<Utc>) -> Self {
        Self {
            score: score.total,
            audit_date: when.to_rfc3339_opts(SecondsFormat::Millis, true),
            issues: score.missing.clone(),
            recommendations: score.recommendations.clone(),
            next_steps: NEXT_STEPS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// File name the report is announced under
    pub fn file_name(base: &str) -> String {
        format!("{}.json", base)
    }
}

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Serialize a report
    pub fn report(&self, report: &AuditReport) -> String {
        if self.pretty {
            serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
        } else {
            serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
        }
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}
