//! Scoring and ranking of candidate routes.
//!
//! Ranking is a pure function of the candidates, the active working set,
//! and the category filter: each geometry is sampled, every sample point is
//! scored, and the candidates are stably sorted by their aggregate danger
//! ascending. Rank 0 is always the safest route.

use crate::{
    CategoryFilter, DangerModel, IncidentStore, RouteCandidate, ScoredRoute, sample_points,
};

/// Sum the danger scores over a sampled route geometry.
///
/// An empty geometry aggregates to zero.
#[must_use]
pub fn aggregate_danger<M: DangerModel + ?Sized>(
    route: &RouteCandidate,
    store: &IncidentStore,
    filter: &CategoryFilter,
    model: &M,
) -> f64 {
    sample_points(&route.geometry)
        .into_iter()
        .map(|point| model.score_point(point, store, filter))
        .sum()
}

/// Score and rank candidate routes from safest to riskiest.
///
/// Each candidate is tagged with its position in the input before sorting.
/// The sort is stable, so candidates with equal scores keep their source
/// order. An empty input yields an empty ranking, not an error; ranking
/// imposes no upper bound on the number of candidates.
///
/// Re-ranking with the same inputs is idempotent: the result depends only
/// on the arguments, never on prior calls.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use saferoute_core::{
///     CategoryFilter, IncidentStore, ProximityScorer, RouteCandidate, rank_routes,
/// };
///
/// let routes = vec![RouteCandidate::new(vec![Coord { x: 0.0, y: 0.0 }], 100.0, 60.0)];
/// let ranked = rank_routes(
///     routes,
///     &IncidentStore::new(),
///     &CategoryFilter::all(),
///     &ProximityScorer::default(),
/// );
/// assert_eq!(ranked.len(), 1);
/// assert_eq!(ranked[0].score, 0.0);
/// ```
#[must_use]
pub fn rank_routes<M: DangerModel + ?Sized>(
    routes: Vec<RouteCandidate>,
    store: &IncidentStore,
    filter: &CategoryFilter,
    model: &M,
) -> Vec<ScoredRoute> {
    let mut scored: Vec<ScoredRoute> = routes
        .into_iter()
        .enumerate()
        .map(|(source_index, route)| {
            let score = aggregate_danger(&route, store, filter, model);
            ScoredRoute {
                route,
                score,
                source_index,
            }
        })
        .collect();
    scored.sort_by(|a, b| a.score.total_cmp(&b.score));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, IncidentRecord, ProximityScorer, Severity};
    use geo::Coord;
    use rstest::rstest;

    /// Scores a point by the count of enabled incidents at its exact
    /// location, making aggregates predictable in tests.
    struct CountingModel;

    impl DangerModel for CountingModel {
        fn score_point(
            &self,
            point: Coord<f64>,
            store: &IncidentStore,
            filter: &CategoryFilter,
        ) -> f64 {
            store
                .records()
                .iter()
                .filter(|record| filter.contains(record.category))
                .filter(|record| record.location == point)
                .count() as f64
        }
    }

    fn single_point_route(x: f64, y: f64) -> RouteCandidate {
        RouteCandidate::new(vec![Coord { x, y }], 1000.0, 300.0)
    }

    fn stacked_incidents(x: f64, y: f64, count: usize) -> Vec<IncidentRecord> {
        (0..count)
            .map(|_| IncidentRecord::new(Category::Theft, Coord { x, y }))
            .collect()
    }

    #[test]
    fn empty_input_yields_empty_ranking() {
        let ranked = rank_routes(
            Vec::new(),
            &IncidentStore::new(),
            &CategoryFilter::all(),
            &ProximityScorer::default(),
        );
        assert!(ranked.is_empty());
    }

    #[rstest]
    fn ranking_sorts_ascending_and_keeps_source_indices() {
        // Routes at three locations with 72, 15, and 48 stacked incidents:
        // aggregate danger mirrors the incident count under CountingModel.
        let mut records = stacked_incidents(0.0, 0.0, 72);
        records.extend(stacked_incidents(1.0, 0.0, 15));
        records.extend(stacked_incidents(2.0, 0.0, 48));
        let store = IncidentStore::rebuild(&records, None);

        let routes = vec![
            single_point_route(0.0, 0.0),
            single_point_route(1.0, 0.0),
            single_point_route(2.0, 0.0),
        ];
        let ranked = rank_routes(routes, &store, &CategoryFilter::all(), &CountingModel);

        let order: Vec<(usize, f64)> = ranked.iter().map(|r| (r.source_index, r.score)).collect();
        assert_eq!(order, vec![(1, 15.0), (2, 48.0), (0, 72.0)]);

        let labels: Vec<Severity> = ranked.iter().map(ScoredRoute::severity).collect();
        assert_eq!(
            labels,
            vec![Severity::Safe, Severity::Moderate, Severity::HighRisk]
        );
    }

    #[rstest]
    fn equal_scores_preserve_source_order() {
        let routes = vec![
            single_point_route(5.0, 5.0),
            single_point_route(6.0, 6.0),
            single_point_route(7.0, 7.0),
        ];
        let ranked = rank_routes(
            routes,
            &IncidentStore::new(),
            &CategoryFilter::all(),
            &CountingModel,
        );
        let order: Vec<usize> = ranked.iter().map(|r| r.source_index).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[rstest]
    fn empty_geometry_aggregates_to_zero() {
        let store = IncidentStore::rebuild(&stacked_incidents(0.0, 0.0, 10), None);
        let route = RouteCandidate::new(Vec::new(), 0.0, 0.0);
        let score = aggregate_danger(&route, &store, &CategoryFilter::all(), &CountingModel);
        assert_eq!(score, 0.0);
    }

    #[rstest]
    fn aggregate_sums_every_sample_point() {
        let store = IncidentStore::rebuild(&stacked_incidents(0.0, 0.0, 3), None);
        let route = RouteCandidate::new(
            vec![
                Coord { x: 0.0, y: 0.0 },
                Coord { x: 9.0, y: 9.0 },
                Coord { x: 0.0, y: 0.0 },
            ],
            0.0,
            0.0,
        );
        let score = aggregate_danger(&route, &store, &CategoryFilter::all(), &CountingModel);
        assert_eq!(score, 6.0);
    }
}
