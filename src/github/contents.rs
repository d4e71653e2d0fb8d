//! GitHub REST response bodies

use crate::error::AuditError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;

/// Body of `GET /repos/{owner}/{repo}/contents/{path}`
#[derive(Debug, Deserialize)]
pub struct ContentsResponse {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
}

impl ContentsResponse {
    /// Decode the base64 envelope. GitHub wraps the payload every 60 chars,
    /// so whitespace is dropped before decoding.
    pub fn decode(&self) -> Result<Vec<u8>, AuditError> {
        if let Some(encoding) = self.encoding.as_deref().filter(|e| *e != "base64") {
            return Err(AuditError::UnsupportedEncoding(encoding.to_string()));
        }
        let content = self.content.as_deref().ok_or(AuditError::MissingContent)?;
        let compact: String = content.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        Ok(STANDARD.decode(compact)?)
    }
}

/// Body of `GET /search/code`
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub total_count: u64,
}
