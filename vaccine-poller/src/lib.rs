//! Vaccine appointment availability poller.
//!
//! Polls the provider's per-state availability feed and appends one
//! timestamped column per poll to a CSV history table for each state.

pub mod config;
pub mod domain;
pub mod provider;
pub mod scheduler;
pub mod table;
pub mod updater;
