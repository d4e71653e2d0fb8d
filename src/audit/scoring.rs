//! Score calculation for growth instrumentation

use super::patterns::VANITY_METRICS;
use crate::manifest::{AnalyticsStack, PackageManifest};
use crate::{AuditScore, ScoreBreakdown};

const ANALYTICS_POINTS: i32 = 30;
const POINTS_PER_EVENT_PATTERN: i32 = 10;
const MAX_EVENT_POINTS: i32 = 40;
const PAYMENT_POINTS: i32 = 15;
const AUTH_POINTS: i32 = 15;
const VANITY_PENALTY: i32 = 10;

pub const MISSING_ANALYTICS: &str = "Analytics library (PostHog, Mixpanel, etc.)";
pub const MISSING_EVENTS: &str = "Event tracking calls";
pub const MISSING_PAYMENTS: &str = "Payment tracking";
pub const MISSING_AUTH: &str = "User authentication events";

const RECOMMEND_ANALYTICS: &str = "Add PostHog for privacy-first analytics";
const RECOMMEND_EVENTS: &str = "Track user actions with .capture() calls";
const RECOMMEND_PAYMENTS: &str = "Track subscription/payment events for revenue analytics";
const RECOMMEND_AUTH: &str = "Track signup/login for user journey analysis";
const RECOMMEND_NO_VANITY: &str = "Remove vanity metrics - focus on business KPIs";

/// Everything the scorer looks at
#[derive(Debug, Clone, Default)]
pub struct Findings {
    pub analytics: AnalyticsStack,
    /// Search queries with at least one hit
    pub event_patterns: Vec<String>,
    pub has_payments: bool,
    pub has_auth: bool,
    pub has_vanity_metrics: bool,
}

impl Findings {
    /// Collect findings from a manifest and the matched search queries
    pub fn collect(manifest: &PackageManifest, event_patterns: Vec<String>) -> Self {
        Self {
            analytics: manifest.analytics_stack(),
            event_patterns,
            has_payments: manifest.has_payments(),
            has_auth: manifest.has_auth(),
            has_vanity_metrics: manifest.text_contains_any(VANITY_METRICS),
        }
    }

    fn distinct_event_patterns(&self) -> usize {
        let mut patterns: Vec<&str> = self.event_patterns.iter().map(String::as_str).collect();
        patterns.sort_unstable();
        patterns.dedup();
        patterns.len()
    }
}

/// Calculator for growth scores
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Score the findings. Entries in `missing`/`recommendations` follow check
    /// order: analytics, events, payments, auth, vanity.
    pub fn calculate(findings: &Findings) -> AuditScore {
        Self::calculate_with_breakdown(findings).0
    }

    /// Score plus the points each check contributed
    pub fn calculate_with_breakdown(findings: &Findings) -> (AuditScore, ScoreBreakdown) {
        let mut breakdown = ScoreBreakdown::default();
        let mut missing = Vec::new();
        let mut recommendations = Vec::new();

        if findings.analytics.has_analytics() {
            breakdown.analytics = ANALYTICS_POINTS;
        } else {
            missing.push(MISSING_ANALYTICS.to_string());
            recommendations.push(RECOMMEND_ANALYTICS.to_string());
        }

        breakdown.events = Self::event_points(findings.distinct_event_patterns());
        if breakdown.events == 0 {
            missing.push(MISSING_EVENTS.to_string());
            recommendations.push(RECOMMEND_EVENTS.to_string());
        }

        if findings.has_payments {
            breakdown.payments = PAYMENT_POINTS;
        } else {
            missing.push(MISSING_PAYMENTS.to_string());
            recommendations.push(RECOMMEND_PAYMENTS.to_string());
        }

        if findings.has_auth {
            breakdown.auth = AUTH_POINTS;
        } else {
            missing.push(MISSING_AUTH.to_string());
            recommendations.push(RECOMMEND_AUTH.to_string());
        }

        if findings.has_vanity_metrics {
            breakdown.vanity_penalty = -VANITY_PENALTY;
            recommendations.push(RECOMMEND_NO_VANITY.to_string());
        }

        let score = AuditScore {
            total: breakdown.total(),
            missing,
            recommendations,
        };
        (score, breakdown)
    }

    /// 10 points per matched pattern, capped at 40
    pub fn event_points(matched: usize) -> i32 {
        let matched = i32::try_from(matched).unwrap_or(i32::MAX);
        matched
            .saturating_mul(POINTS_PER_EVENT_PATTERN)
            .min(MAX_EVENT_POINTS)
    }

    /// Get a description for a score band
    pub fn score_description(total: u8) -> &'static str {
        match total {
            80..=100 => "Growth-ready: core funnel events are instrumented",
            50..=79 => "Partial tracking: key revenue or activation signals are missing",
            20..=49 => "Flying blind on most of the funnel",
            _ => "No meaningful growth instrumentation found",
        }
    }
}
