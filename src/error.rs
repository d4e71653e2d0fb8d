//! Errors raised while fetching and auditing a repository

use thiserror::Error;

/// Error from the repository fetcher
#[derive(Debug, Error)]
pub enum AuditError {
    /// Manifest lookup returned 404 (repo missing, private, or no package.json)
    #[error("Repository not found. Make sure it's public or provide a token.")]
    RepositoryNotFound,

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API error: {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Contents response has no `content` field")]
    MissingContent,

    /// GitHub returns `encoding: "none"` and no payload for files over 1 MB
    #[error("Unsupported contents encoding `{0}` (package.json may be larger than 1 MB)")]
    UnsupportedEncoding(String),

    #[error("Invalid base64 in contents response: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Invalid package.json: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("Invalid package.json: expected a JSON object")]
    ManifestNotObject,
}

impl AuditError {
    /// Map a non-success manifest status to an error
    pub fn from_status(status: u16, body: String) -> Self {
        if status == 404 {
            AuditError::RepositoryNotFound
        } else {
            AuditError::Status { status, body }
        }
    }
}
