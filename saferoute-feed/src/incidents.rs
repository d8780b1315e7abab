//! Incident feed decoding.
//!
//! The feed is a JSON object with a `points` array. Each point carries a
//! category string, coordinates, optional date strings, and an optional
//! description. Coordinates may arrive as numbers or numeric strings;
//! dates appear in several formats and are frequently absent or junk.
//! Nothing in a single record can fail the whole feed: bad coordinates
//! drop the record with a warning, bad dates leave it undated.

use chrono::{NaiveDate, NaiveDateTime};
use geo::Coord;
use log::warn;
use serde::{Deserialize, Deserializer};

use saferoute_core::{Category, IncidentRecord};

use crate::FeedError;

/// Top-level incident feed payload.
#[derive(Debug, Deserialize)]
pub struct IncidentFeed {
    /// Incident records; absent means an empty feed.
    #[serde(default)]
    pub points: Vec<IncidentPoint>,
}

/// One raw incident record as it appears on the wire.
#[derive(Debug, Deserialize)]
pub struct IncidentPoint {
    /// Category string; anything unrecognised maps to `OTHER`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Latitude, as a JSON number or numeric string.
    #[serde(deserialize_with = "lenient_f64")]
    pub lat: f64,
    /// Longitude, as a JSON number or numeric string.
    #[serde(deserialize_with = "lenient_f64")]
    pub lng: f64,
    /// Display-formatted date, used when `rawDate` is absent.
    #[serde(default)]
    pub date: Option<String>,
    /// Machine-oriented date; preferred over `date` when present.
    #[serde(rename = "rawDate", default)]
    pub raw_date: Option<String>,
    /// Free-text description.
    #[serde(default)]
    pub desc: Option<String>,
}

/// Accept a JSON number or a string containing one.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        // Unparseable strings become NaN and are dropped downstream with a
        // warning, matching the tolerance for malformed records elsewhere.
        NumberOrString::String(value) => Ok(value.trim().parse().unwrap_or(f64::NAN)),
    }
}

/// Formats tried, in order, when parsing feed timestamps.
const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
];

/// Parse a feed date string leniently.
///
/// Tries RFC 3339, ISO date-times with and without the `T` separator, the
/// `MM/DD/YYYY` twelve-hour form common in municipal exports, and bare
/// dates (taken as midnight). Returns `None` for anything else: an
/// unparseable date marks the record date-unknown rather than failing it.
///
/// # Examples
/// ```
/// use saferoute_feed::parse_timestamp;
///
/// assert!(parse_timestamp("2021-02-10T14:30:00").is_some());
/// assert!(parse_timestamp("01/05/2021 09:15:00 PM").is_some());
/// assert!(parse_timestamp("2021-02-10").is_some());
/// assert!(parse_timestamp("last tuesday").is_none());
/// ```
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Some(ts.naive_local());
    }
    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

impl IncidentPoint {
    /// Convert a wire record into a core record.
    ///
    /// Returns `None` when the coordinates are unusable; the caller logs
    /// and drops such records without aborting the feed.
    fn into_record(self) -> Option<IncidentRecord> {
        if !self.lat.is_finite() || !self.lng.is_finite() {
            warn!(
                "dropping '{}' incident with unusable coordinates",
                self.kind
            );
            return None;
        }
        let timestamp = self
            .raw_date
            .as_deref()
            .or(self.date.as_deref())
            .and_then(parse_timestamp);
        let mut record = IncidentRecord::new(
            Category::parse(&self.kind),
            Coord {
                x: self.lng,
                y: self.lat,
            },
        );
        record.timestamp = timestamp;
        record.description = self.desc;
        Some(record)
    }
}

/// Decode an incident feed payload into core records.
///
/// An empty or missing `points` array decodes to an empty vec; deciding
/// whether that warrants a user-facing "no data" message is the caller's
/// concern.
///
/// # Errors
/// Returns [`FeedError::Json`] when the payload is not the expected shape.
/// Individual malformed records never fail the feed.
pub fn parse_incident_feed(payload: &str) -> Result<Vec<IncidentRecord>, FeedError> {
    let feed: IncidentFeed = serde_json::from_str(payload)?;
    Ok(feed
        .points
        .into_iter()
        .filter_map(IncidentPoint::into_record)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn decodes_a_typical_feed() {
        let payload = r#"{
            "points": [
                {
                    "type": "THEFT",
                    "lat": 41.88,
                    "lng": -87.63,
                    "rawDate": "2021-02-10T14:30:00",
                    "desc": "POCKET-PICKING"
                },
                {
                    "type": "HATE_CRIME",
                    "lat": "41.89",
                    "lng": "-87.64"
                }
            ]
        }"#;

        let records = parse_incident_feed(payload).expect("valid feed");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].category, Category::Theft);
        assert!(records[0].timestamp.is_some());
        assert_eq!(records[0].description.as_deref(), Some("POCKET-PICKING"));
        assert_eq!(records[1].category, Category::HateCrime);
        assert_eq!(records[1].location.x, -87.64);
        assert!(records[1].timestamp.is_none());
    }

    #[test]
    fn raw_date_wins_over_display_date() {
        let payload = r#"{
            "points": [{
                "type": "BATTERY",
                "lat": 41.0,
                "lng": -87.0,
                "date": "2019-01-01",
                "rawDate": "2021-06-15T08:00:00"
            }]
        }"#;
        let records = parse_incident_feed(payload).expect("valid feed");
        let ts = records[0].timestamp.expect("parsed rawDate");
        assert_eq!(ts, parse_timestamp("2021-06-15T08:00:00").expect("parses"));
    }

    #[test]
    fn junk_dates_leave_the_record_undated() {
        let payload = r#"{
            "points": [{"type": "ASSAULT", "lat": 41.0, "lng": -87.0, "date": "unknown"}]
        }"#;
        let records = parse_incident_feed(payload).expect("valid feed");
        assert_eq!(records.len(), 1);
        assert!(records[0].timestamp.is_none());
    }

    #[test]
    fn unusable_coordinates_drop_the_record_only() {
        let payload = r#"{
            "points": [
                {"type": "THEFT", "lat": "not a number", "lng": -87.0},
                {"type": "THEFT", "lat": 41.0, "lng": -87.0}
            ]
        }"#;
        let records = parse_incident_feed(payload).expect("valid feed");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn empty_feed_decodes_to_no_records() {
        assert!(parse_incident_feed("{}").expect("valid feed").is_empty());
        assert!(
            parse_incident_feed(r#"{"points": []}"#)
                .expect("valid feed")
                .is_empty()
        );
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(matches!(
            parse_incident_feed("not json"),
            Err(FeedError::Json { .. })
        ));
    }

    #[rstest]
    #[case("2021-02-10T14:30:00")]
    #[case("2021-02-10 14:30:00")]
    #[case("02/10/2021 02:30:00 PM")]
    #[case("2021-02-10T14:30:00+00:00")]
    fn datetime_formats_agree(#[case] input: &str) {
        let expected = parse_timestamp("2021-02-10T14:30:00").expect("reference");
        assert_eq!(parse_timestamp(input), Some(expected));
    }

    #[test]
    fn bare_dates_parse_to_midnight() {
        let ts = parse_timestamp("2021-02-10").expect("bare date");
        assert_eq!(ts, parse_timestamp("2021-02-10T00:00:00").expect("midnight"));
    }
}
