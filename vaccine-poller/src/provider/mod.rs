//! Vaccine availability provider.
//!
//! Fetches the provider's per-state status document and turns it into an
//! [`AvailabilitySnapshot`]. The HTTP client talks to the live feed; the
//! mock serves saved documents for offline runs.

mod client;
mod convert;
mod error;
mod mock;
mod types;

use std::future::Future;

use crate::domain::{AvailabilitySnapshot, StateCode};

pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, ProviderClient, ProviderConfig};
pub use convert::{convert_response, is_available, title_case};
pub use error::FetchError;
pub use mock::MockProvider;
pub use types::{ResponsePayloadData, SiteDto, VaccineStatusResponse};

/// Source of availability snapshots.
///
/// Abstracts over the live client, the offline mock and test doubles.
pub trait AvailabilitySource {
    /// Take one poll of `state`.
    fn fetch(
        &self,
        state: StateCode,
    ) -> impl Future<Output = Result<AvailabilitySnapshot, FetchError>> + Send;
}

/// The source chosen at startup.
#[derive(Debug, Clone)]
pub enum Provider {
    Http(ProviderClient),
    Mock(MockProvider),
}

impl AvailabilitySource for Provider {
    async fn fetch(&self, state: StateCode) -> Result<AvailabilitySnapshot, FetchError> {
        match self {
            Provider::Http(client) => client.fetch(state).await,
            Provider::Mock(mock) => mock.fetch(state).await,
        }
    }
}
