use thiserror::Error;

/// Failures of one acquisition cycle.
///
/// Both kinds abort the cycle under the default fail-fast policy. They cross
/// the action boundary as plain strings via `to_string()`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Transport(String),
    #[error("malformed record {name}: {reason}")]
    MalformedRecord { name: String, reason: String },
}

impl CatalogError {
    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::MalformedRecord {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatalogError::Transport(format!("timed out: {err}"))
        } else {
            CatalogError::Transport(err.to_string())
        }
    }
}
