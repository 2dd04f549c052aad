//! Availability snapshots.

use super::PollTimestamp;

/// Availability of one location in one poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationAvailability {
    /// Title-cased city name.
    pub location: String,
    /// Whether any site in the city reported "Available".
    pub available: bool,
}

/// The locations observed by one poll of one state.
///
/// Locations are unique: several sites in one city are collapsed into a
/// single entry which is available if any of the sites was. First-seen
/// order is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilitySnapshot {
    timestamp: PollTimestamp,
    locations: Vec<LocationAvailability>,
}

impl AvailabilitySnapshot {
    /// Build a snapshot from (location, available) observations.
    pub fn new<I, S>(timestamp: PollTimestamp, observations: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        let mut locations: Vec<LocationAvailability> = Vec::new();
        for (location, available) in observations {
            let location = location.into();
            match locations.iter_mut().find(|l| l.location == location) {
                Some(existing) => existing.available |= available,
                None => locations.push(LocationAvailability {
                    location,
                    available,
                }),
            }
        }

        Self {
            timestamp,
            locations,
        }
    }

    /// When the poll was taken.
    pub fn timestamp(&self) -> PollTimestamp {
        self.timestamp
    }

    /// Observed locations in first-seen order.
    pub fn locations(&self) -> &[LocationAvailability] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Locations with availability, in first-seen order.
    pub fn available(&self) -> impl Iterator<Item = &str> {
        self.locations
            .iter()
            .filter(|l| l.available)
            .map(|l| l.location.as_str())
    }

    pub fn available_count(&self) -> usize {
        self.available().count()
    }

    /// Console lines describing this snapshot.
    ///
    /// Verbose output lists every available location. Otherwise only a
    /// count is given. Either way, a snapshot with nothing available
    /// reports `(None)`.
    pub fn report_lines(&self, verbose: bool) -> Vec<String> {
        let count = self.available_count();
        if count == 0 {
            return vec!["    (None)".to_string()];
        }

        if verbose {
            self.available().map(|city| format!("  • {city}")).collect()
        } else {
            vec![format!("    {count} sites with availability!")]
        }
    }
}
