//! Per-state update: resolve, load, fetch, merge, save.

use tracing::debug;

use crate::domain::{self, StateCode};
use crate::provider::{AvailabilitySource, FetchError, title_case};
use crate::table::{MergeOutcome, StoreError, TableStore};

/// Error from a single state's update.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// Fetching the current snapshot failed
    #[error("failed to fetch {state}: {source}")]
    Fetch { state: StateCode, source: FetchError },

    /// Reading or writing the history table failed
    #[error("failed to update history for {state}: {source}")]
    Store { state: StateCode, source: StoreError },
}

/// Result of a state's update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The history table was extended and saved.
    Updated {
        state: StateCode,
        available: usize,
        merge: MergeOutcome,
    },
    /// The name did not resolve to a supported state; nothing was touched.
    Skipped,
}

/// Appends availability snapshots to per-state history tables.
#[derive(Debug, Clone)]
pub struct Updater<S> {
    store: TableStore,
    source: S,
}

impl<S: AvailabilitySource> Updater<S> {
    pub fn new(store: TableStore, source: S) -> Self {
        Self { store, source }
    }

    pub fn store(&self) -> &TableStore {
        &self.store
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Update the history table of the state called `display_name`.
    ///
    /// Prints the name as a heading, then the snapshot report. Unknown
    /// names are skipped without touching the filesystem. The load, fetch
    /// and save steps are not atomic: a failure after loading leaves the
    /// previous file in place.
    pub async fn update(
        &self,
        display_name: &str,
        verbose: bool,
    ) -> Result<UpdateOutcome, UpdateError> {
        println!("{}", title_case(display_name));

        let state = match domain::resolve(display_name) {
            Ok(state) => state,
            Err(e) => {
                debug!(error = %e, "skipping state");
                return Ok(UpdateOutcome::Skipped);
            }
        };

        let mut table = self
            .store
            .load(state)
            .map_err(|source| UpdateError::Store { state, source })?;

        let snapshot = self
            .source
            .fetch(state)
            .await
            .map_err(|source| UpdateError::Fetch { state, source })?;

        for line in snapshot.report_lines(verbose) {
            println!("{line}");
        }

        let merge = table.merge(&snapshot);

        self.store
            .save(state, &table)
            .map_err(|source| UpdateError::Store { state, source })?;

        debug!(
            %state,
            new_locations = merge.new_locations,
            rows = table.row_count(),
            columns = table.column_count(),
            "history updated"
        );

        Ok(UpdateOutcome::Updated {
            state,
            available: snapshot.available_count(),
            merge,
        })
    }
}
