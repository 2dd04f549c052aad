//! Per-state availability history.

use std::collections::BTreeMap;

use crate::domain::AvailabilitySnapshot;

/// Name of the index column in persisted tables.
pub const INDEX_LABEL: &str = "City";

/// What a merge changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    /// A new timestamp column was appended.
    pub column_added: bool,
    /// Locations that had no row before.
    pub new_locations: usize,
}

/// Row-per-location, column-per-poll availability table.
///
/// Rows are kept sorted by location name; columns keep the order polls
/// were merged in. A cell is `None` when the location was not observed in
/// that poll. Rows and columns are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryTable {
    columns: Vec<String>,
    /// Every row has exactly `columns.len()` cells.
    rows: BTreeMap<String, Vec<Option<bool>>>,
}

impl HistoryTable {
    /// Create an empty table (no rows, no columns).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with the given columns and no rows.
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: BTreeMap::new(),
        }
    }

    /// Insert or replace a row. Cells beyond the column count are
    /// dropped; missing cells are `None`.
    pub fn set_row(&mut self, location: impl Into<String>, mut cells: Vec<Option<bool>>) {
        cells.resize(self.columns.len(), None);
        self.rows.insert(location.into(), cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.columns.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column labels in poll order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in location order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[Option<bool>])> {
        self.rows
            .iter()
            .map(|(location, cells)| (location.as_str(), cells.as_slice()))
    }

    /// Location names in sorted order.
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// Look up a single cell.
    pub fn get(&self, location: &str, column: &str) -> Option<bool> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(location).and_then(|cells| cells[idx])
    }

    /// Outer-join a snapshot into the table.
    ///
    /// The snapshot's timestamp label becomes a new column (or replaces
    /// the column of an earlier poll in the same minute). Locations not
    /// seen before get a new row with no history.
    pub fn merge(&mut self, snapshot: &AvailabilitySnapshot) -> MergeOutcome {
        let label = snapshot.timestamp().label();

        let existing = self.columns.iter().position(|c| *c == label);
        let (idx, column_added) = match existing {
            Some(idx) => {
                for cells in self.rows.values_mut() {
                    cells[idx] = None;
                }
                (idx, false)
            }
            None => {
                self.columns.push(label);
                for cells in self.rows.values_mut() {
                    cells.push(None);
                }
                (self.columns.len() - 1, true)
            }
        };

        let width = self.columns.len();
        let mut new_locations = 0;
        for observed in snapshot.locations() {
            let cells = self
                .rows
                .entry(observed.location.clone())
                .or_insert_with(|| {
                    new_locations += 1;
                    vec![None; width]
                });
            cells[idx] = Some(observed.available);
        }

        MergeOutcome {
            column_added,
            new_locations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PollTimestamp;
    use chrono::{TimeZone, Utc};

    fn ts(h: u32, m: u32) -> PollTimestamp {
        PollTimestamp::from_datetime(Utc.with_ymd_and_hms(2021, 3, 26, h, m, 0).unwrap())
    }

    fn snap(at: PollTimestamp, obs: &[(&str, bool)]) -> AvailabilitySnapshot {
        AvailabilitySnapshot::new(at, obs.iter().map(|(l, a)| (*l, *a)))
    }

    #[test]
    fn merge_into_empty() {
        let mut table = HistoryTable::new();
        assert!(table.is_empty());

        let outcome = table.merge(&snap(ts(9, 0), &[("Austin", true)]));

        assert_eq!(
            outcome,
            MergeOutcome {
                column_added: true,
                new_locations: 1
            }
        );
        assert_eq!(table.columns(), ["2021-03-26 09:00 UTC"]);
        assert_eq!(table.get("Austin", "2021-03-26 09:00 UTC"), Some(true));
    }

    #[test]
    fn outer_join_leaves_gaps() {
        let mut table = HistoryTable::with_columns(["2021-01-01 00:00 UTC"]);
        table.set_row("Austin", vec![Some(true)]);

        let at = ts(9, 0);
        table.merge(&snap(at, &[("Dallas", false)]));

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.locations().collect::<Vec<_>>(), ["Austin", "Dallas"]);
        assert_eq!(table.get("Austin", "2021-01-01 00:00 UTC"), Some(true));
        assert_eq!(table.get("Austin", &at.label()), None);
        assert_eq!(table.get("Dallas", "2021-01-01 00:00 UTC"), None);
        assert_eq!(table.get("Dallas", &at.label()), Some(false));
    }

    #[test]
    fn rows_are_sorted() {
        let mut table = HistoryTable::new();
        table.merge(&snap(ts(9, 0), &[("Waco", true), ("Austin", false), ("Plano", true)]));
        assert_eq!(
            table.locations().collect::<Vec<_>>(),
            ["Austin", "Plano", "Waco"]
        );
    }

    #[test]
    fn same_minute_replaces_column() {
        let mut table = HistoryTable::new();
        table.merge(&snap(ts(9, 0), &[("Austin", true), ("Dallas", true)]));
        let outcome = table.merge(&snap(ts(9, 0), &[("Dallas", false)]));

        assert!(!outcome.column_added);
        assert_eq!(outcome.new_locations, 0);
        assert_eq!(table.column_count(), 1);
        assert_eq!(table.get("Austin", &ts(9, 0).label()), None);
        assert_eq!(table.get("Dallas", &ts(9, 0).label()), Some(false));
    }

    #[test]
    fn set_row_pads_to_width() {
        let mut table = HistoryTable::with_columns(["a", "b"]);
        table.set_row("Austin", vec![Some(true)]);
        table.set_row("Dallas", vec![Some(true), Some(false), Some(true)]);

        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[0], ("Austin", &[Some(true), None][..]));
        assert_eq!(rows[1], ("Dallas", &[Some(true), Some(false)][..]));
    }
}
