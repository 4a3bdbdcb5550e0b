use crate::bom_reconciliation::domain::TrackerLookup;
use crate::shared::Result;
use async_trait::async_trait;

/// ReleaseRepository port for the component-tracking system
///
/// Implementations must be `Send + Sync`: lookups run concurrently.
#[async_trait]
pub trait ReleaseRepository: Send + Sync {
    /// Looks up the component and release registered under a purl
    ///
    /// # Arguments
    /// * `purl` - Normalized package URL of the component
    ///
    /// # Errors
    /// Returns an error if the request fails after retries or the response
    /// cannot be decoded. "Not registered" is not an error.
    async fn lookup_release(&self, purl: &str) -> Result<TrackerLookup>;
}
