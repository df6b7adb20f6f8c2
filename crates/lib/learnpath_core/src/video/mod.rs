//! Video lookup — forwards search queries to an external video index.
//!
//! Result metadata is collaborator-defined and passed through unmodified:
//! no filtering, ranking, caching, or deduplication happens here.

pub mod youtube;

use async_trait::async_trait;
use thiserror::Error;

/// Raw result metadata as returned by the external index.
pub type VideoMetadata = serde_json::Value;

/// Video lookup errors.
#[derive(Debug, Error)]
pub enum VideoError {
    /// The search request itself failed (transport fault).
    #[error("Video search request failed: {0}")]
    Request(String),

    /// The index answered with a non-success status or an unreadable body.
    #[error("Video index error: {0}")]
    Upstream(String),
}

/// External video index consumed through a trait so tests can stub it.
#[async_trait]
pub trait VideoIndex: Send + Sync {
    /// Search the index, returning at most `max_results` entries as-is.
    async fn search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<VideoMetadata>, VideoError>;
}
