//! Boundary decoders for the SafeRoute engine.
//!
//! The engine's collaborators hand it two JSON payloads: the historical
//! incident feed and an OSRM-style route response. This crate decodes both
//! into `saferoute-core` types, tolerating the mess real feeds carry:
//! numeric strings for coordinates, half a dozen date formats, records with
//! no date at all. Fetching the payloads is out of scope; callers do their
//! own I/O and pass the bytes in.

#![forbid(unsafe_code)]

mod error;
mod incidents;
mod routes;

pub use error::FeedError;
pub use incidents::{IncidentFeed, IncidentPoint, parse_incident_feed, parse_timestamp};
pub use routes::{MAX_ROUTE_ALTERNATIVES, RouteResponse, WireGeometry, WireRoute, parse_route_response};
