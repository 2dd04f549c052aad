//! Offline provider for running without network access.
//!
//! Loads status documents from JSON files and serves them as if they were
//! live API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::domain::{AvailabilitySnapshot, PollTimestamp, StateCode};

use super::AvailabilitySource;
use super::convert::convert_response;
use super::error::FetchError;
use super::types::VaccineStatusResponse;

/// Mock provider that serves status documents from a directory.
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Pre-loaded documents, keyed by state code.
    documents: Arc<HashMap<StateCode, VaccineStatusResponse>>,
}

impl MockProvider {
    /// Load every `{code}.json` file in `data_dir` (e.g. `tx.json`).
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, FetchError> {
        let data_dir = data_dir.as_ref();
        let mut documents = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| FetchError::Mock {
            message: format!("failed to read mock data directory {:?}: {}", data_dir, e),
        })?;

        for entry in entries {
            let path = entry
                .map_err(|e| FetchError::Mock {
                    message: format!("failed to read directory entry: {}", e),
                })?
                .path();

            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let Some(code) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| StateCode::parse(&s.to_ascii_uppercase()).ok())
            else {
                continue;
            };

            let json = std::fs::read_to_string(&path).map_err(|e| FetchError::Mock {
                message: format!("failed to read {:?}: {}", path, e),
            })?;
            let document: VaccineStatusResponse =
                serde_json::from_str(&json).map_err(|e| FetchError::json(e, &json))?;

            documents.insert(code, document);
        }

        if documents.is_empty() {
            return Err(FetchError::Mock {
                message: format!("no mock status files found in {:?}", data_dir),
            });
        }

        Ok(Self {
            documents: Arc::new(documents),
        })
    }

    /// States with mock data.
    pub fn available_states(&self) -> Vec<StateCode> {
        let mut states: Vec<_> = self.documents.keys().copied().collect();
        states.sort();
        states
    }
}

impl AvailabilitySource for MockProvider {
    async fn fetch(&self, state: StateCode) -> Result<AvailabilitySnapshot, FetchError> {
        let document = self.documents.get(&state).ok_or_else(|| FetchError::Api {
            status: 404,
            message: format!("no mock data for {}", state),
        })?;

        convert_response(document, state, PollTimestamp::now())
    }
}
