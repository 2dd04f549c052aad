//! Table store error types.

use std::path::PathBuf;

/// Errors that can occur when reading or writing history files.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem operation failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// CSV reading or writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File content is not a history table
    #[error("malformed history file {path:?}: {message}")]
    Format { path: PathBuf, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StoreError::Format {
            path: PathBuf::from("data/cvs_availability_tx.csv"),
            message: "missing City header".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed history file \"data/cvs_availability_tx.csv\": missing City header"
        );

        let err = StoreError::Io {
            path: PathBuf::from("data"),
            source: std::io::Error::other("disk full"),
        };
        assert_eq!(err.to_string(), "I/O error on \"data\": disk full");
    }
}
