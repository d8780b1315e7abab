//! Candidate and scored route values.

use geo::Coord;

/// Severity threshold below which a route is labelled "Safe".
pub const MODERATE_THRESHOLD: f64 = 20.0;

/// Severity threshold at which a route is labelled "High Risk".
pub const HIGH_RISK_THRESHOLD: f64 = 50.0;

/// A route geometry as returned by an external routing source.
///
/// Coordinates are `x = longitude`, `y = latitude`, in itinerary order from
/// start to destination. Immutable once received; the engine does not
/// validate coordinate bounds.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use saferoute_core::RouteCandidate;
///
/// let route = RouteCandidate::new(
///     vec![Coord { x: -87.63, y: 41.88 }, Coord { x: -87.62, y: 41.89 }],
///     1609.34,
///     600.0,
/// );
/// assert!((route.distance_miles() - 1.0).abs() < 1e-9);
/// assert_eq!(route.duration_minutes(), 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteCandidate {
    /// Ordered polyline from start to destination.
    pub geometry: Vec<Coord<f64>>,
    /// Total distance in metres, as reported by the routing source.
    pub distance: f64,
    /// Total duration in seconds, as reported by the routing source.
    pub duration: f64,
}

impl RouteCandidate {
    /// Construct a candidate from a geometry and the source's totals.
    #[must_use]
    pub const fn new(geometry: Vec<Coord<f64>>, distance: f64, duration: f64) -> Self {
        Self {
            geometry,
            distance,
            duration,
        }
    }

    /// Total distance in kilometres.
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        self.distance / 1000.0
    }

    /// Total distance in statute miles.
    #[must_use]
    pub fn distance_miles(&self) -> f64 {
        self.distance / 1609.34
    }

    /// Total duration rounded to whole minutes.
    #[must_use]
    pub fn duration_minutes(&self) -> u64 {
        let minutes = (self.duration / 60.0).round();
        if minutes.is_sign_negative() {
            0
        } else {
            minutes as u64
        }
    }
}

/// Severity label derived from an aggregate danger score.
///
/// Thresholds are policy constants, not computed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// Aggregate score below [`MODERATE_THRESHOLD`].
    Safe,
    /// Aggregate score in `MODERATE_THRESHOLD..HIGH_RISK_THRESHOLD`.
    Moderate,
    /// Aggregate score at or above [`HIGH_RISK_THRESHOLD`].
    HighRisk,
}

impl Severity {
    /// Label a score.
    ///
    /// # Examples
    /// ```
    /// use saferoute_core::Severity;
    ///
    /// assert_eq!(Severity::from_score(15.0), Severity::Safe);
    /// assert_eq!(Severity::from_score(48.0), Severity::Moderate);
    /// assert_eq!(Severity::from_score(72.0), Severity::HighRisk);
    /// ```
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score < MODERATE_THRESHOLD {
            Self::Safe
        } else if score < HIGH_RISK_THRESHOLD {
            Self::Moderate
        } else {
            Self::HighRisk
        }
    }

    /// Human-readable label for renderers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::Moderate => "Moderate",
            Self::HighRisk => "High Risk",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate route tagged with its aggregate danger score.
///
/// Produced once per ranking pass and never mutated; a new pass produces
/// new values. `source_index` records the candidate's position in the input
/// so callers can refer back to "route as originally returned by the route
/// source" after sorting.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredRoute {
    /// The underlying candidate.
    pub route: RouteCandidate,
    /// Aggregate danger score over the sampled geometry. Non-negative,
    /// unbounded above.
    pub score: f64,
    /// Position of the candidate in the caller's input sequence.
    pub source_index: usize,
}

impl ScoredRoute {
    /// Severity label for this route's score.
    #[must_use]
    pub fn severity(&self) -> Severity {
        Severity::from_score(self.score)
    }
}
