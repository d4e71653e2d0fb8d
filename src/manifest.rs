//! package.json analysis: known analytics, payment and auth SDKs

use crate::error::AuditError;
use serde::Serialize;
use serde_json::{Map, Value};

/// Analytics SDKs that count as an analytics setup
pub const ANALYTICS_LIBS: &[&str] = &[
    "posthog-js",
    "@posthog/posthog-js",
    "mixpanel-browser",
    "segment-analytics",
    "@amplitude/analytics-browser",
];

/// Payment SDKs (checked in `dependencies` only)
pub const PAYMENT_LIBS: &[&str] = &["stripe", "paddle", "@lemonsqueezy/lemonsqueezy.js"];

/// Auth SDKs (checked in `dependencies` only)
pub const AUTH_LIBS: &[&str] = &["@supabase/supabase-js", "next-auth", "auth0"];

/// Found/missing split of the analytics roster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalyticsStack {
    pub found: Vec<String>,
    pub missing: Vec<String>,
}

impl AnalyticsStack {
    pub fn has_analytics(&self) -> bool {
        !self.found.is_empty()
    }
}

/// A parsed package.json. The raw document is kept because the vanity
/// metric check looks at the whole serialized text, not just dependencies.
#[derive(Debug, Clone)]
pub struct PackageManifest {
    raw: Value,
}

impl PackageManifest {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// Parse manifest bytes. The document root must be an object.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AuditError> {
        let raw: Value = serde_json::from_slice(bytes)?;
        if !raw.is_object() {
            return Err(AuditError::ManifestNotObject);
        }
        Ok(Self::new(raw))
    }

    fn section(&self, key: &str) -> Option<&Map<String, Value>> {
        self.raw.get(key).and_then(Value::as_object)
    }

    /// `dependencies` overlaid with `devDependencies`
    pub fn all_dependencies(&self) -> Map<String, Value> {
        let mut merged = self.section("dependencies").cloned().unwrap_or_default();
        if let Some(dev) = self.section("devDependencies") {
            for (name, version) in dev {
                merged.insert(name.clone(), version.clone());
            }
        }
        merged
    }

    /// Whether `name` is declared in `dependencies` with a usable version
    pub fn has_dependency(&self, name: &str) -> bool {
        self.section("dependencies")
            .and_then(|deps| deps.get(name))
            .is_some_and(is_declared)
    }

    /// Check the analytics roster against runtime and dev dependencies
    pub fn analytics_stack(&self) -> AnalyticsStack {
        let deps = self.all_dependencies();
        let (found, missing): (Vec<&str>, Vec<&str>) = ANALYTICS_LIBS
            .iter()
            .partition(|lib| deps.get(**lib).is_some_and(is_declared));

        AnalyticsStack {
            found: found.into_iter().map(String::from).collect(),
            missing: missing.into_iter().map(String::from).collect(),
        }
    }

    pub fn has_payments(&self) -> bool {
        PAYMENT_LIBS.iter().any(|lib| self.has_dependency(lib))
    }

    pub fn has_auth(&self) -> bool {
        AUTH_LIBS.iter().any(|lib| self.has_dependency(lib))
    }

    /// Whether the compact JSON text contains any of `needles`
    pub fn text_contains_any(&self, needles: &[&str]) -> bool {
        let text = self.raw.to_string();
        needles.iter().any(|needle| text.contains(*needle))
    }
}

/// Version values that a package manager would treat as absent
fn is_declared(version: &Value) -> bool {
    match version {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64() != Some(0.0),
        _ => true,
    }
}
