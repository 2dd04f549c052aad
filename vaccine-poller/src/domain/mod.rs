//! Domain types for the availability poller.
//!
//! State lookup, poll timestamps and snapshots. All types enforce their
//! invariants at construction time.

mod error;
mod snapshot;
mod state;
mod timestamp;

pub use error::DomainError;
pub use snapshot::{AvailabilitySnapshot, LocationAvailability};
pub use state::{InvalidStateCode, SUPPORTED_STATES, StateCode, SupportedState, resolve};
pub use timestamp::PollTimestamp;
