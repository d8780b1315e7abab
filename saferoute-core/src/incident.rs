//! Incident categories and records.
//!
//! The category enum is the fixed taxonomy the scorer weights against.
//! Feed strings outside the taxonomy collapse to [`Category::Other`] rather
//! than failing: unknown categories still plot and still score, just with
//! the default weight and colour.
//!
//! # Examples
//! ```
//! use saferoute_core::Category;
//!
//! assert_eq!(Category::parse("HATE_CRIME"), Category::HateCrime);
//! assert_eq!(Category::parse("VANDALISM"), Category::Other);
//! assert_eq!(Category::HateCrime.weight(), 10.0);
//! ```

use chrono::NaiveDateTime;
use geo::Coord;

/// A category of safety-relevant event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    /// Theft without force.
    Theft,
    /// Physical attack causing bodily harm.
    Battery,
    /// Attack or threat of attack.
    Assault,
    /// Theft by force or threat of force.
    Robbery,
    /// Offence motivated by bias against the victim.
    HateCrime,
    /// Any category outside the fixed taxonomy.
    Other,
}

impl Category {
    /// The known categories, in descending weight order. Excludes
    /// [`Category::Other`], which only arises from unrecognised feed strings.
    pub const ALL: [Self; 5] = [
        Self::HateCrime,
        Self::Robbery,
        Self::Assault,
        Self::Battery,
        Self::Theft,
    ];

    /// Map a feed string onto the taxonomy.
    ///
    /// Matching is case-insensitive on the wire form; anything unrecognised
    /// becomes [`Category::Other`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.to_uppercase().as_str() {
            "THEFT" => Self::Theft,
            "BATTERY" => Self::Battery,
            "ASSAULT" => Self::Assault,
            "ROBBERY" => Self::Robbery,
            "HATE_CRIME" => Self::HateCrime,
            _ => Self::Other,
        }
    }

    /// Return the category's wire form.
    ///
    /// # Examples
    /// ```
    /// use saferoute_core::Category;
    ///
    /// assert_eq!(Category::HateCrime.as_str(), "HATE_CRIME");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Theft => "THEFT",
            Self::Battery => "BATTERY",
            Self::Assault => "ASSAULT",
            Self::Robbery => "ROBBERY",
            Self::HateCrime => "HATE_CRIME",
            Self::Other => "OTHER",
        }
    }

    /// Danger weight used by the proximity scorer.
    ///
    /// The table ranks categories from most to least severe; unknown
    /// categories score like theft.
    #[must_use]
    pub const fn weight(self) -> f64 {
        match self {
            Self::HateCrime => 10.0,
            Self::Robbery => 8.0,
            Self::Assault => 7.0,
            Self::Battery => 5.0,
            Self::Theft | Self::Other => 3.0,
        }
    }

    /// Display colour for renderers, as a CSS hex string.
    #[must_use]
    pub const fn colour(self) -> &'static str {
        match self {
            Self::Theft => "#ff4444",
            Self::Battery => "#ff8844",
            Self::Assault => "#ffcc00",
            Self::Robbery => "#cc0000",
            Self::HateCrime => "#9900ff",
            Self::Other => "#999",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One historical data point: a categorised event at a location and,
/// optionally, a time.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. Records
/// are created once from the feed and never mutated; records without a
/// parseable timestamp carry `None` and are never excluded by date filters.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use saferoute_core::{Category, IncidentRecord};
///
/// let record = IncidentRecord::new(Category::Theft, Coord { x: -87.63, y: 41.88 });
/// assert!(record.timestamp.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IncidentRecord {
    /// Taxonomy category.
    pub category: Category,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Occurrence time, when the feed supplied a parseable one.
    pub timestamp: Option<NaiveDateTime>,
    /// Free-text description from the feed.
    pub description: Option<String>,
}

impl IncidentRecord {
    /// Construct an undated record with no description.
    #[must_use]
    pub const fn new(category: Category, location: Coord<f64>) -> Self {
        Self {
            category,
            location,
            timestamp: None,
            description: None,
        }
    }

    /// Attach an occurrence timestamp while returning `self` for chaining.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Attach a description while returning `self` for chaining.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("THEFT", Category::Theft)]
    #[case("theft", Category::Theft)]
    #[case("HATE_CRIME", Category::HateCrime)]
    #[case("CRIMINAL DAMAGE", Category::Other)]
    #[case("", Category::Other)]
    fn parse_maps_feed_strings(#[case] input: &str, #[case] expected: Category) {
        assert_eq!(Category::parse(input), expected);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(Category::Robbery.to_string(), Category::Robbery.as_str());
    }

    #[test]
    fn weights_rank_hate_crime_highest() {
        let mut previous = f64::INFINITY;
        for category in Category::ALL {
            assert!(category.weight() <= previous);
            previous = category.weight();
        }
        assert_eq!(Category::Other.weight(), Category::Theft.weight());
    }

    #[test]
    fn unknown_category_uses_default_colour() {
        assert_eq!(Category::Other.colour(), "#999");
    }
}
