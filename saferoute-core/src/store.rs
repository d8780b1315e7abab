//! The active incident working set.
//!
//! `IncidentStore` holds the records that survive the current date window
//! and answers point-radius queries through an R\*-tree over their
//! positions. The store is rebuilt wholesale whenever the window changes;
//! individual records are never mutated in place.

use geo::Coord;
use log::warn;
use rstar::{RTree, primitives::GeomWithData};

use crate::{DateWindow, IncidentRecord};

/// Indexed position pointing back at a record in the working set.
type IndexedIncident = GeomWithData<[f64; 2], usize>;

/// The current working set of incident records, post date-filter.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use saferoute_core::{Category, IncidentRecord, IncidentStore};
///
/// let records = vec![IncidentRecord::new(Category::Theft, Coord { x: 0.0, y: 0.0 })];
/// let store = IncidentStore::rebuild(&records, None);
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct IncidentStore {
    records: Vec<IncidentRecord>,
    index: RTree<IndexedIncident>,
}

impl IncidentStore {
    /// Construct an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the working set from the full history.
    ///
    /// A record is retained when its timestamp falls inside `window`, or
    /// when it has no timestamp at all: undated records are only ever
    /// excluded by category, never by date. With no window the full history
    /// is retained. Records with non-finite coordinates are dropped with a
    /// warning rather than aborting the rebuild.
    #[must_use]
    pub fn rebuild(records: &[IncidentRecord], window: Option<&DateWindow>) -> Self {
        let retained: Vec<IncidentRecord> = records
            .iter()
            .filter(|record| {
                if !record.location.x.is_finite() || !record.location.y.is_finite() {
                    warn!(
                        "dropping {} incident with malformed coordinates ({}, {})",
                        record.category, record.location.x, record.location.y,
                    );
                    return false;
                }
                true
            })
            .filter(|record| match (window, record.timestamp) {
                (Some(window), Some(ts)) => window.contains(ts),
                _ => true,
            })
            .cloned()
            .collect();

        let positions = retained
            .iter()
            .enumerate()
            .map(|(ordinal, record)| {
                IndexedIncident::new([record.location.x, record.location.y], ordinal)
            })
            .collect();

        Self {
            records: retained,
            index: RTree::bulk_load(positions),
        }
    }

    /// Number of records in the working set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the working set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The retained records, in history order.
    #[must_use]
    pub fn records(&self) -> &[IncidentRecord] {
        &self.records
    }

    /// Records strictly within `radius` of `centre`, with their distances.
    ///
    /// Distance is Euclidean in coordinate-degree space, matching the
    /// scorer's falloff arithmetic. Incidents at exactly `radius` are
    /// excluded.
    pub fn within_radius(
        &self,
        centre: Coord<f64>,
        radius: f64,
    ) -> impl Iterator<Item = (&IncidentRecord, f64)> {
        let query = [centre.x, centre.y];
        self.index
            .locate_within_distance(query, radius * radius)
            .filter_map(move |indexed| {
                let record = self.records.get(indexed.data)?;
                let dx = centre.x - record.location.x;
                let dy = centre.y - record.location.y;
                let distance = (dx * dx + dy * dy).sqrt();
                (distance < radius).then_some((record, distance))
            })
    }
}
