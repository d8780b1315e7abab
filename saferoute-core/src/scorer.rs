//! Danger scoring for arbitrary coordinates.
//!
//! The `DangerModel` trait assigns a non-negative danger score to a point
//! given the active working set and category filter. The default
//! implementation sums linearly-decaying contributions from every enabled
//! incident inside a fixed radius.

use geo::Coord;

use crate::{CategoryFilter, IncidentStore};

/// Radius, in coordinate degrees, within which an incident influences a
/// point's score. Roughly a few city blocks at mid latitudes.
///
/// Distances are raw degree-space Euclidean values with no latitude
/// correction, preserving behavioural parity with the historical dataset's
/// established scores.
pub const DANGER_RADIUS_DEGREES: f64 = 0.003;

/// Calculate a danger score for a coordinate.
///
/// Higher scores indicate more nearby incident activity. Implementations
/// must be pure and cheap: the ranker invokes them once per sample point per
/// route. They must be thread-safe (`Send` + `Sync`) so ranking passes can
/// run across threads.
///
/// Scores are non-negative and deliberately unbounded above: a point near
/// many incidents scores higher than a point near one, and nothing is
/// normalised away.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use saferoute_core::{CategoryFilter, DangerModel, IncidentStore};
///
/// struct ZeroModel;
///
/// impl DangerModel for ZeroModel {
///     fn score_point(&self, _: Coord<f64>, _: &IncidentStore, _: &CategoryFilter) -> f64 {
///         0.0
///     }
/// }
///
/// let store = IncidentStore::new();
/// let filter = CategoryFilter::all();
/// assert_eq!(ZeroModel.score_point(Coord { x: 0.0, y: 0.0 }, &store, &filter), 0.0);
/// ```
pub trait DangerModel: Send + Sync {
    /// Return the danger score for `point` over the active incidents.
    fn score_point(&self, point: Coord<f64>, store: &IncidentStore, filter: &CategoryFilter)
    -> f64;
}

/// Proximity-weighted danger scorer with linear falloff.
///
/// Each enabled incident strictly inside the radius contributes
/// `weight * (1 - distance / radius)`: full category weight at distance
/// zero, nothing at the boundary. An empty filter scores zero everywhere,
/// mirroring the "show nothing" display policy.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use saferoute_core::{
///     Category, CategoryFilter, DangerModel, IncidentRecord, IncidentStore, ProximityScorer,
/// };
///
/// let records = vec![IncidentRecord::new(
///     Category::HateCrime,
///     Coord { x: 0.001, y: 0.0 },
/// )];
/// let store = IncidentStore::rebuild(&records, None);
/// let scorer = ProximityScorer::default();
///
/// let score = scorer.score_point(Coord { x: 0.0, y: 0.0 }, &store, &CategoryFilter::all());
/// assert!((score - 10.0 * (1.0 - 0.001 / 0.003)).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityScorer {
    radius: f64,
}

impl ProximityScorer {
    /// Construct a scorer with the default danger radius.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            radius: DANGER_RADIUS_DEGREES,
        }
    }

    /// Construct a scorer with a custom danger radius, in degrees.
    #[must_use]
    pub const fn with_radius(radius: f64) -> Self {
        Self { radius }
    }

    /// The active danger radius in degrees.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }
}

impl Default for ProximityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl DangerModel for ProximityScorer {
    fn score_point(
        &self,
        point: Coord<f64>,
        store: &IncidentStore,
        filter: &CategoryFilter,
    ) -> f64 {
        if filter.is_empty() {
            return 0.0;
        }
        store
            .within_radius(point, self.radius)
            .filter(|(record, _)| filter.contains(record.category))
            .map(|(record, distance)| record.category.weight() * (1.0 - distance / self.radius))
            .sum()
    }
}
