//! Network seam used by the invoker.

use anyhow::Result;
use async_trait::async_trait;

/// Status and raw body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    /// Any status below 400 counts as success, including an unfollowed 3xx.
    pub fn is_success(&self) -> bool {
        self.status < 400
    }
}

/// Something that can perform a single GET.
///
/// Errors are transport-level faults only; a non-success status is still an
/// `Ok` response.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn get(&self, url: &str) -> Result<FetchResponse>;
}
