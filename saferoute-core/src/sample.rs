//! Bounded, evenly-spaced subsampling of route polylines.
//!
//! Route geometries can carry thousands of coordinates; scoring every one
//! would make a ranking pass quadratic in practice. Sampling walks the
//! polyline at a fixed stride, so identical inputs always yield identical
//! sample sets.

use geo::Coord;

/// Upper bound on evaluation points taken from a single route geometry.
pub const MAX_SAMPLE_POINTS: usize = 50;

/// Reduce a polyline to at most [`MAX_SAMPLE_POINTS`] evenly-spaced points.
///
/// The walk starts at index 0 and advances by a fixed stride until the
/// sequence is exhausted, so the start of the route is always represented
/// and the stride covers the full geometry. Sequences of up to
/// [`MAX_SAMPLE_POINTS`] coordinates are returned whole; an empty sequence
/// yields an empty sample set.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use saferoute_core::sample_points;
///
/// let coords: Vec<Coord<f64>> = (0..200)
///     .map(|i| Coord { x: f64::from(i), y: 0.0 })
///     .collect();
/// let samples = sample_points(&coords);
/// assert_eq!(samples.len(), 50);
/// assert_eq!(samples[0], coords[0]);
/// ```
#[must_use]
pub fn sample_points(coords: &[Coord<f64>]) -> Vec<Coord<f64>> {
    if coords.is_empty() {
        return Vec::new();
    }
    let target = coords.len().min(MAX_SAMPLE_POINTS);
    // Ceiling division keeps the collected count within the target while
    // still reaching the end of the polyline; a floor stride of 1 would
    // overshoot the bound for routes between 50 and 100 points long.
    let stride = coords.len().div_ceil(target).max(1);
    coords.iter().step_by(stride).copied().collect()
}
