use std::fmt;

use async_trait::async_trait;

use crate::core::country::Country;

/// Errors that can occur while talking to the country source.
/// The store never surfaces these directly; it logs them and records a
/// fixed human-readable message on the snapshot instead.
#[derive(Debug)]
pub enum SourceError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The API returned a non-success status.
    Api { status: u16, message: String },
    /// The response body did not decode as country records.
    Parse(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Network(msg) => write!(f, "network error: {msg}"),
            SourceError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            SourceError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// The remote collaborator that supplies country records. The store is
/// written against this trait so tests can substitute a scripted fake.
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// The full country list.
    async fn fetch_all(&self) -> Result<Vec<Country>, SourceError>;

    /// Countries whose name matches the query.
    async fn fetch_by_name(&self, name: &str) -> Result<Vec<Country>, SourceError>;

    /// Countries in the given region.
    async fn fetch_by_region(&self, region: &str) -> Result<Vec<Country>, SourceError>;

    /// At most one country for a three-letter code; `None` when the
    /// response payload is empty.
    async fn fetch_by_code(&self, code: &str) -> Result<Option<Country>, SourceError>;
}
