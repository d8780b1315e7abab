//! OSRM route response decoding.
//!
//! The routing source is queried with `alternatives=2` and GeoJSON
//! geometries, so a successful response carries up to three candidate
//! routes, each with a coordinate polyline and the source's distance and
//! duration totals.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use geo::Coord;
use serde::Deserialize;

use saferoute_core::RouteCandidate;

use crate::FeedError;

/// Most candidate routes taken from a single response.
///
/// The routing source is expected to return at most three alternatives;
/// anything beyond that is ignored in response order.
pub const MAX_ROUTE_ALTERNATIVES: usize = 3;

/// OSRM Route API response.
///
/// The response contains either candidate routes on success or an error
/// message on failure. The `code` field indicates the response status.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"InvalidQuery"` - Invalid query parameters
    /// - `"NoRoute"` - No route between the supplied coordinates
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Candidate routes, fastest first.
    #[serde(default)]
    pub routes: Vec<WireRoute>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

/// One route in the response.
#[derive(Debug, Deserialize)]
pub struct WireRoute {
    /// GeoJSON geometry of the route.
    pub geometry: WireGeometry,
    /// Total distance in metres.
    pub distance: f64,
    /// Total duration in seconds.
    pub duration: f64,
}

/// GeoJSON LineString geometry.
#[derive(Debug, Deserialize)]
pub struct WireGeometry {
    /// `[longitude, latitude]` pairs in itinerary order.
    pub coordinates: Vec<[f64; 2]>,
}

impl From<WireRoute> for RouteCandidate {
    fn from(wire: WireRoute) -> Self {
        let geometry = wire
            .geometry
            .coordinates
            .into_iter()
            .map(|[x, y]| Coord { x, y })
            .collect();
        Self::new(geometry, wire.distance, wire.duration)
    }
}

/// Decode a route response into candidate routes.
///
/// At most [`MAX_ROUTE_ALTERNATIVES`] candidates are taken, in response
/// order. An `Ok` response with no routes decodes to an empty vec; the
/// "no result" outcome belongs to the caller, not here.
///
/// # Errors
/// Returns [`FeedError::Json`] for payloads that are not the expected
/// shape and [`FeedError::RoutingFailed`] when the source reported a
/// non-`Ok` status code.
pub fn parse_route_response(payload: &str) -> Result<Vec<RouteCandidate>, FeedError> {
    let response: RouteResponse = serde_json::from_str(payload)?;
    if !response.is_ok() {
        return Err(FeedError::RoutingFailed {
            code: response.code,
            message: response.message,
        });
    }
    Ok(response
        .routes
        .into_iter()
        .take(MAX_ROUTE_ALTERNATIVES)
        .map(RouteCandidate::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route_json(n: usize) -> String {
        let routes: Vec<String> = (0..n)
            .map(|i| {
                format!(
                    r#"{{
                        "geometry": {{"coordinates": [[-87.63, 41.88], [-87.62, 41.89]]}},
                        "distance": {}.0,
                        "duration": 60.0
                    }}"#,
                    1000 + i
                )
            })
            .collect();
        format!(r#"{{"code": "Ok", "routes": [{}]}}"#, routes.join(","))
    }

    #[test]
    fn decodes_a_successful_response() {
        let candidates = parse_route_response(&route_json(2)).expect("valid response");
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].geometry[0], Coord { x: -87.63, y: 41.88 });
        assert_eq!(candidates[0].distance, 1000.0);
        assert_eq!(candidates[1].distance, 1001.0);
    }

    #[test]
    fn caps_candidates_at_three() {
        let candidates = parse_route_response(&route_json(5)).expect("valid response");
        assert_eq!(candidates.len(), MAX_ROUTE_ALTERNATIVES);
        // Response order is preserved when truncating.
        assert_eq!(candidates[2].distance, 1002.0);
    }

    #[test]
    fn error_code_maps_to_routing_failed() {
        let payload = r#"{"code": "NoRoute", "message": "Impossible route"}"#;
        let err = parse_route_response(payload).expect_err("error response");
        assert!(matches!(
            err,
            FeedError::RoutingFailed { ref code, .. } if code == "NoRoute"
        ));
    }

    #[test]
    fn ok_with_no_routes_is_empty_not_an_error() {
        let payload = r#"{"code": "Ok", "routes": []}"#;
        let candidates = parse_route_response(payload).expect("valid response");
        assert!(candidates.is_empty());
    }

    #[test]
    fn malformed_payload_is_a_json_error() {
        assert!(matches!(
            parse_route_response("[]"),
            Err(FeedError::Json { .. })
        ));
    }
}
