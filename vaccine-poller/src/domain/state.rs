//! Supported states and their postal codes.

use std::fmt;

use super::DomainError;

/// Error returned when parsing an invalid state code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid state code: {reason}")]
pub struct InvalidStateCode {
    reason: &'static str,
}

/// A two-letter postal code for a state or territory.
///
/// Codes are always 2 uppercase ASCII letters. The provider's API and the
/// history file names use the lowercase form.
///
/// # Examples
///
/// ```
/// use vaccine_poller::domain::StateCode;
///
/// let tx = StateCode::parse("TX").unwrap();
/// assert_eq!(tx.as_str(), "TX");
/// assert_eq!(tx.to_lowercase(), "tx");
///
/// assert!(StateCode::parse("tx").is_err());
/// assert!(StateCode::parse("TEX").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateCode([u8; 2]);

impl StateCode {
    /// Parse a state code from a string.
    ///
    /// The input must be exactly 2 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidStateCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 2 {
            return Err(InvalidStateCode {
                reason: "must be exactly 2 characters",
            });
        }

        if !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(InvalidStateCode {
                reason: "must be uppercase ASCII letters A-Z",
            });
        }

        Ok(StateCode([bytes[0], bytes[1]]))
    }

    /// Returns the code as an uppercase string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Returns the lowercase form used in URLs and file names.
    pub fn to_lowercase(&self) -> String {
        self.as_str().to_ascii_lowercase()
    }
}

impl fmt::Debug for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateCode({})", self.as_str())
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A state or territory the provider publishes availability for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedState {
    /// Human-readable name, e.g. "Puerto Rico".
    pub name: &'static str,
    code: StateCode,
}

impl SupportedState {
    /// The postal code for this state.
    pub fn code(&self) -> StateCode {
        self.code
    }
}

/// Table entry; an invalid code fails const evaluation.
const fn state(name: &'static str, code: &'static str) -> SupportedState {
    let b = code.as_bytes();
    assert!(b.len() == 2 && b[0].is_ascii_uppercase() && b[1].is_ascii_uppercase());
    SupportedState {
        name,
        code: StateCode([b[0], b[1]]),
    }
}

/// Every state polled, in polling order.
///
/// Taken from the provider's vaccine page as of March 26, 2021.
pub const SUPPORTED_STATES: &[SupportedState] = &[
    state("Alabama", "AL"),
    state("Arizona", "AZ"),
    state("Arkansas", "AR"),
    state("California", "CA"),
    state("Colorado", "CO"),
    state("Connecticut", "CT"),
    state("Delaware", "DE"),
    state("Florida", "FL"),
    state("Georgia", "GA"),
    state("Hawaii", "HI"),
    state("Illinois", "IL"),
    state("Indiana", "IN"),
    state("Iowa", "IA"),
    state("Kansas", "KS"),
    state("Kentucky", "KY"),
    state("Louisiana", "LA"),
    state("Maryland", "MD"),
    state("Massachusetts", "MA"),
    state("Michigan", "MI"),
    state("Minnesota", "MN"),
    state("Mississippi", "MS"),
    state("Missouri", "MO"),
    state("Montana", "MT"),
    state("Nevada", "NV"),
    state("New Jersey", "NJ"),
    state("New York", "NY"),
    state("North Carolina", "NC"),
    state("North Dakota", "ND"),
    state("Ohio", "OH"),
    state("Oklahoma", "OK"),
    state("Oregon", "OR"),
    state("Pennsylvania", "PA"),
    state("Puerto Rico", "PR"),
    state("Rhode Island", "RI"),
    state("South Carolina", "SC"),
    state("Texas", "TX"),
    state("Utah", "UT"),
    state("Vermont", "VT"),
    state("Virginia", "VA"),
];

/// Resolve a display name to its postal code.
///
/// Matching ignores ASCII case and surrounding whitespace. Names outside
/// [`SUPPORTED_STATES`] fail with [`DomainError::UnknownState`].
pub fn resolve(name: &str) -> Result<StateCode, DomainError> {
    let wanted = name.trim();
    SUPPORTED_STATES
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(wanted))
        .map(SupportedState::code)
        .ok_or_else(|| DomainError::UnknownState(name.to_string()))
}
