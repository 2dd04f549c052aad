//! CSV persistence for history tables.
//!
//! One file per state, `<data_dir>/cvs_availability_<code>.csv`. The first
//! column is the location (header `City`), every other column is a poll
//! timestamp, and cells are `True`, `False` or empty.

use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::StateCode;

use super::error::StoreError;
use super::history::{HistoryTable, INDEX_LABEL};

/// File name prefix shared by every state's table.
const FILE_PREFIX: &str = "cvs_availability";

/// Reads and writes per-state history tables.
#[derive(Debug, Clone)]
pub struct TableStore {
    data_dir: PathBuf,
}

impl TableStore {
    /// Create a store rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The directory tables are stored in.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the table for `state`.
    pub fn path(&self, state: StateCode) -> PathBuf {
        self.data_dir
            .join(format!("{}_{}.csv", FILE_PREFIX, state.to_lowercase()))
    }

    /// Load the table for `state`.
    ///
    /// A missing file is not an error: a notice is printed and an empty
    /// table returned.
    pub fn load(&self, state: StateCode) -> Result<HistoryTable, StoreError> {
        let path = self.path(state);

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                println!("    (no data to load for {})", state);
                return Ok(HistoryTable::new());
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

        let headers = reader.headers()?.clone();
        match headers.get(0) {
            Some(first) if first.trim_start_matches('\u{feff}') == INDEX_LABEL => {}
            _ => {
                return Err(StoreError::Format {
                    path,
                    message: format!("first column must be {:?}", INDEX_LABEL),
                });
            }
        }

        let mut table = HistoryTable::with_columns(headers.iter().skip(1));
        for record in reader.records() {
            let record = record?;
            let location = record.get(0).unwrap_or_default();
            let cells = record
                .iter()
                .skip(1)
                .map(|cell| parse_cell(cell).ok_or_else(|| invalid_cell(&path, location, cell)))
                .collect::<Result<Vec<_>, _>>()?;
            table.set_row(location, cells);
        }

        debug!(
            %state,
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded history table"
        );

        Ok(table)
    }

    /// Write the full table for `state`, replacing any previous file.
    ///
    /// Creates the data directory if it doesn't exist. The table is written
    /// to a temporary file first and renamed over the old one, so a failed
    /// save leaves the previous table intact.
    pub fn save(&self, state: StateCode, table: &HistoryTable) -> Result<(), StoreError> {
        let path = self.path(state);

        self.replace_file(&path, |file| {
            let mut writer = csv::Writer::from_writer(file);

            let mut header = vec![INDEX_LABEL];
            header.extend(table.columns().iter().map(String::as_str));
            writer.write_record(&header)?;

            for (location, cells) in table.rows() {
                let mut record = vec![location];
                record.extend(cells.iter().map(|c| format_cell(*c)));
                writer.write_record(&record)?;
            }

            writer.flush().map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })
        })?;

        debug!(
            %state,
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "saved history table"
        );

        Ok(())
    }

    /// Atomically replace `path` with whatever `write` produces.
    fn replace_file(
        &self,
        path: &Path,
        write: impl FnOnce(&mut File) -> Result<(), StoreError>,
    ) -> Result<(), StoreError> {
        let dir = if self.data_dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            self.data_dir.as_path()
        };

        let io_err = |source: std::io::Error| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        };

        std::fs::create_dir_all(dir).map_err(io_err)?;

        // Dropped (and deleted) on any early return
        let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
        write(tmp.as_file_mut())?;
        tmp.as_file().sync_all().map_err(io_err)?;

        tmp.persist(path).map_err(|e| StoreError::Io {
            path: path.to_path_buf(),
            source: e.error,
        })?;

        Ok(())
    }
}

fn parse_cell(cell: &str) -> Option<Option<bool>> {
    match cell.trim() {
        "" => Some(None),
        "True" | "true" => Some(Some(true)),
        "False" | "false" => Some(Some(false)),
        _ => None,
    }
}

fn format_cell(cell: Option<bool>) -> &'static str {
    match cell {
        Some(true) => "True",
        Some(false) => "False",
        None => "",
    }
}

fn invalid_cell(path: &Path, location: &str, cell: &str) -> StoreError {
    StoreError::Format {
        path: path.to_path_buf(),
        message: format!("invalid cell {:?} in row {:?}", cell, location),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AvailabilitySnapshot, PollTimestamp};
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn tx() -> StateCode {
        StateCode::parse("TX").unwrap()
    }

    #[test]
    fn path_is_lowercase_per_state() {
        let store = TableStore::new("/srv/poller/data");
        assert_eq!(
            store.path(tx()),
            PathBuf::from("/srv/poller/data/cvs_availability_tx.csv")
        );
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = TableStore::new(dir.path());
        let table = store.load(tx()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = TableStore::new(dir.path());

        let mut table = HistoryTable::with_columns(["2021-01-01 00:00 UTC"]);
        table.set_row("Austin", vec![Some(true)]);
        let at = PollTimestamp::from_datetime(Utc.with_ymd_and_hms(2021, 1, 1, 0, 10, 0).unwrap());
        table.merge(&AvailabilitySnapshot::new(at, [("Dallas", false), ("San Antonio", true)]));

        store.save(tx(), &table).unwrap();
        let loaded = store.load(tx()).unwrap();

        assert_eq!(loaded, table);
    }

    #[test]
    fn writes_city_header_and_python_booleans() {
        let dir = tempdir().unwrap();
        let store = TableStore::new(dir.path());

        let mut table =
            HistoryTable::with_columns(["2021-01-01 00:00 UTC", "2021-01-01 00:10 UTC"]);
        table.set_row("Austin", vec![Some(true), None]);
        table.set_row("Dallas", vec![None, Some(false)]);
        store.save(tx(), &table).unwrap();

        let text = std::fs::read_to_string(store.path(tx())).unwrap();
        assert_eq!(
            text,
            "City,2021-01-01 00:00 UTC,2021-01-01 00:10 UTC\nAustin,True,\nDallas,,False\n"
        );
    }

    #[test]
    fn creates_data_directory() {
        let dir = tempdir().unwrap();
        let store = TableStore::new(dir.path().join("nested").join("data"));
        store.save(tx(), &HistoryTable::new()).unwrap();
        assert!(store.path(tx()).exists());
    }

    #[test]
    fn failed_save_keeps_previous_table() {
        let dir = tempdir().unwrap();
        let store = TableStore::new(dir.path());

        let mut table = HistoryTable::with_columns(["2021-01-01 00:00 UTC"]);
        table.set_row("Austin", vec![Some(true)]);
        store.save(tx(), &table).unwrap();
        let before = std::fs::read_to_string(store.path(tx())).unwrap();

        let result = store.replace_file(&store.path(tx()), |file| {
            use std::io::Write;
            file.write_all(b"City,2021-01-01").unwrap();
            Err(StoreError::Format {
                path: PathBuf::from("interrupted"),
                message: "write interrupted".into(),
            })
        });

        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(store.path(tx())).unwrap(), before);
        assert_eq!(store.load(tx()).unwrap(), table);

        // The partial temporary file is cleaned up
        let files = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(files, 1);
    }

    #[test]
    fn save_replaces_previous_table() {
        let dir = tempdir().unwrap();
        let store = TableStore::new(dir.path());

        let mut table = HistoryTable::with_columns(["2021-01-01 00:00 UTC"]);
        table.set_row("Austin", vec![Some(true)]);
        store.save(tx(), &table).unwrap();

        table.set_row("Dallas", vec![Some(false)]);
        store.save(tx(), &table).unwrap();

        assert_eq!(store.load(tx()).unwrap(), table);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn reads_existing_file() {
        let dir = tempdir().unwrap();
        let store = TableStore::new(dir.path());
        std::fs::write(
            store.path(tx()),
            "City,2021-01-01 00:00 UTC\nAustin,True\nEl Paso,false\nWaco,\n",
        )
        .unwrap();

        let table = store.load(tx()).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.get("Austin", "2021-01-01 00:00 UTC"), Some(true));
        assert_eq!(table.get("El Paso", "2021-01-01 00:00 UTC"), Some(false));
        assert_eq!(table.get("Waco", "2021-01-01 00:00 UTC"), None);
    }

    #[test]
    fn rejects_wrong_index_header() {
        let dir = tempdir().unwrap();
        let store = TableStore::new(dir.path());
        std::fs::write(store.path(tx()), "Town,2021-01-01 00:00 UTC\nAustin,True\n").unwrap();

        assert!(matches!(store.load(tx()), Err(StoreError::Format { .. })));
    }

    #[test]
    fn rejects_bad_cells() {
        let dir = tempdir().unwrap();
        let store = TableStore::new(dir.path());
        std::fs::write(
            store.path(tx()),
            "City,2021-01-01 00:00 UTC\nAustin,maybe\n",
        )
        .unwrap();

        let err = store.load(tx()).unwrap_err();
        assert!(err.to_string().contains("maybe"));
    }
}
