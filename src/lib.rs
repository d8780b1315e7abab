//! Facade crate for the SafeRoute risk-scoring engine.
//!
//! This crate re-exports the core scoring, ranking, and selection types and
//! exposes the boundary feed decoders behind a feature flag.

#![forbid(unsafe_code)]

pub use saferoute_core::{
    Category, CategoryFilter, DANGER_RADIUS_DEGREES, DangerModel, DateWindow, DateWindowError,
    HIGH_RISK_THRESHOLD, IncidentRecord, IncidentStore, MAX_SAMPLE_POINTS, MODERATE_THRESHOLD,
    ProximityScorer, RankOutcome, RouteCandidate, RouteSelection, RouteSession, ScoredRoute,
    SelectionError, Severity, aggregate_danger, rank_routes, sample_points,
};

#[cfg(feature = "feed")]
pub use saferoute_feed::{
    FeedError, MAX_ROUTE_ALTERNATIVES, parse_incident_feed, parse_route_response,
};
