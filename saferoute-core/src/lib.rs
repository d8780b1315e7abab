//! Core domain types and algorithms for the SafeRoute engine.
//!
//! Given a historical set of geo-tagged incident records and a handful of
//! candidate route geometries, the engine computes a comparable danger score
//! per route, ranks the candidates from safest to riskiest, and tracks which
//! ranked route is currently emphasised for display.
//!
//! The crate is pure, synchronous computation: no I/O, no network. Incident
//! feeds and route geometries arrive fully materialised from the boundary
//! layer before a ranking pass begins.

#![forbid(unsafe_code)]

mod filter;
mod incident;
mod rank;
mod route;
mod sample;
mod scorer;
mod selection;
mod session;
mod store;

pub use filter::{CategoryFilter, DateWindow, DateWindowError};
pub use incident::{Category, IncidentRecord};
pub use rank::{aggregate_danger, rank_routes};
pub use route::{HIGH_RISK_THRESHOLD, MODERATE_THRESHOLD, RouteCandidate, ScoredRoute, Severity};
pub use sample::{MAX_SAMPLE_POINTS, sample_points};
pub use scorer::{DANGER_RADIUS_DEGREES, DangerModel, ProximityScorer};
pub use selection::{RouteSelection, SelectionError};
pub use session::{RankOutcome, RouteSession};
pub use store::IncidentStore;
