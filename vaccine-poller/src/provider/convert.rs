//! Conversion from provider DTOs to snapshots.

use crate::domain::{AvailabilitySnapshot, PollTimestamp, StateCode};

use super::error::FetchError;
use super::types::VaccineStatusResponse;

/// The only status string that counts as available.
const AVAILABLE_STATUS: &str = "Available";

/// Whether a site status means appointments can be booked.
///
/// Exact, case-sensitive match. "Fully Booked", "Limited", "available"
/// and the empty string are all unavailable.
pub fn is_available(status: &str) -> bool {
    status == AVAILABLE_STATUS
}

/// Title-case a location name.
///
/// A letter is upper-cased when it follows a non-letter (or starts the
/// string) and lower-cased otherwise, so `"SAN ANTONIO"` becomes
/// `"San Antonio"` and `"o'fallon"` becomes `"O'Fallon"`.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut after_letter = false;

    for ch in name.chars() {
        if ch.is_alphabetic() {
            if after_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            after_letter = true;
        } else {
            out.push(ch);
            after_letter = false;
        }
    }

    out
}

/// Convert a status response into a snapshot for `state`.
///
/// Fails with [`FetchError::MissingState`] if the payload has no entry
/// keyed by the uppercase state code.
pub fn convert_response(
    response: &VaccineStatusResponse,
    state: StateCode,
    timestamp: PollTimestamp,
) -> Result<AvailabilitySnapshot, FetchError> {
    let sites = response
        .response_payload_data
        .data
        .get(state.as_str())
        .ok_or(FetchError::MissingState(state))?;

    let observations = sites
        .iter()
        .map(|site| (title_case(&site.city), is_available(&site.status)));

    Ok(AvailabilitySnapshot::new(timestamp, observations))
}
