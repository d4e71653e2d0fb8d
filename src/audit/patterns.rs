//! Fixed reference data for the growth audit

/// Code search queries that indicate event tracking calls
pub const SEARCH_QUERIES: &[&str] = &["track(", "capture(", "analytics.", "gtag(", "_gaq.push"];

/// User actions every growth setup should track
pub const CRITICAL_EVENTS: &[&str] = &[
    "user_signup",
    "user_login",
    "payment_completed",
    "subscription_created",
    "trial_started",
    "onboarding_completed",
    "feature_used",
    "invite_sent",
    "upgrade_clicked",
];

/// Engagement statistics with little business value
pub const VANITY_METRICS: &[&str] = &[
    "page_view",
    "total_sessions",
    "bounce_rate",
    "time_on_site",
    "scroll_depth",
];

/// Follow-up steps attached to every saved report
pub const NEXT_STEPS: &[&str] = &[
    "Run: npx growthos init",
    "Add missing event tracking",
    "Set up PostHog dashboards",
    "Configure A/B testing",
];
