//! Per-state history tables and their on-disk store.

mod error;
mod history;
mod store;

pub use error::StoreError;
pub use history::{HistoryTable, INDEX_LABEL, MergeOutcome};
pub use store::TableStore;
