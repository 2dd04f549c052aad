//! Provider error types.

use crate::domain::StateCode;

/// Errors that can occur while fetching availability.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Payload has no entry for the requested state
    #[error("no data for {0} in provider response")]
    MissingState(StateCode),

    /// Offline mock data could not be loaded
    #[error("mock data error: {message}")]
    Mock { message: String },
}

impl FetchError {
    pub(crate) fn json(err: serde_json::Error, body: &str) -> Self {
        FetchError::Json {
            message: err.to_string(),
            body: Some(body.chars().take(500).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FetchError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");

        let err = FetchError::MissingState(StateCode::parse("TX").unwrap());
        assert_eq!(err.to_string(), "no data for TX in provider response");

        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = FetchError::json(parse, "{");
        assert!(err.to_string().contains("JSON parse error"));
        assert!(matches!(err, FetchError::Json { body: Some(b), .. } if b == "{"));
    }

    #[test]
    fn json_body_is_truncated() {
        let body = "x".repeat(2000);
        let parse = serde_json::from_str::<serde_json::Value>(&body).unwrap_err();
        match FetchError::json(parse, &body) {
            FetchError::Json { body: Some(b), .. } => assert_eq!(b.len(), 500),
            other => panic!("unexpected error: {other}"),
        }
    }
}
