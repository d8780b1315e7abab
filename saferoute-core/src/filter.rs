//! Category and date filtering over the incident history.
//!
//! `CategoryFilter` holds the set of categories currently considered "on".
//! An empty set means "show nothing, score nothing"; it is never
//! reinterpreted as "show all". `DateWindow` is a closed timestamp interval
//! used to derive the active working set from the full history.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::Category;

/// The set of incident categories currently enabled.
///
/// Mutated only by explicit toggle events from the caller.
///
/// # Examples
/// ```
/// use saferoute_core::{Category, CategoryFilter};
///
/// let mut filter = CategoryFilter::all();
/// filter.toggle(Category::Theft);
/// assert!(!filter.contains(Category::Theft));
/// assert!(filter.contains(Category::Robbery));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryFilter {
    enabled: HashSet<Category>,
}

impl CategoryFilter {
    /// Construct a filter with nothing enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a filter with every known category enabled.
    ///
    /// Matches the boundary default of starting with all checkboxes ticked.
    /// [`Category::Other`] is included so unrecognised feed categories score
    /// until explicitly toggled off.
    #[must_use]
    pub fn all() -> Self {
        let mut filter = Self::new();
        for category in Category::ALL {
            filter.enable(category);
        }
        filter.enable(Category::Other);
        filter
    }

    /// Enable a category.
    pub fn enable(&mut self, category: Category) {
        self.enabled.insert(category);
    }

    /// Disable a category.
    pub fn disable(&mut self, category: Category) {
        self.enabled.remove(&category);
    }

    /// Flip a category's enabled state.
    pub fn toggle(&mut self, category: Category) {
        if !self.enabled.remove(&category) {
            self.enabled.insert(category);
        }
    }

    /// Whether a category is currently enabled.
    #[must_use]
    pub fn contains(&self, category: Category) -> bool {
        self.enabled.contains(&category)
    }

    /// Whether nothing is enabled.
    ///
    /// An empty filter is a valid state: every point scores zero and no
    /// incident is displayed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }

    /// Number of enabled categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.enabled.len()
    }
}

impl FromIterator<Category> for CategoryFilter {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        Self {
            enabled: iter.into_iter().collect(),
        }
    }
}

/// Errors returned by [`DateWindow::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateWindowError {
    /// The start of the interval was after its end.
    #[error("date window start {start} is after end {end}")]
    Inverted {
        /// Requested start of the window.
        start: NaiveDateTime,
        /// Requested end of the window.
        end: NaiveDateTime,
    },
}

/// A closed interval `[start, end]` of timestamps, both inclusive.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use saferoute_core::DateWindow;
///
/// let start = NaiveDate::from_ymd_opt(2021, 1, 5).unwrap().into();
/// let end = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap().into();
/// let window = DateWindow::new(start, end)?;
/// assert!(window.contains(start));
/// assert!(window.contains(end));
/// # Ok::<(), saferoute_core::DateWindowError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateWindow {
    /// Validate and construct a window.
    ///
    /// # Errors
    /// Returns [`DateWindowError::Inverted`] when `start > end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, DateWindowError> {
        if start > end {
            return Err(DateWindowError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// The smallest window covering every supplied timestamp.
    ///
    /// Returns `None` when the iterator yields nothing: with no valid
    /// timestamps no temporal filtering is possible and callers must fall
    /// back to the full incident set.
    pub fn spanning<I>(timestamps: I) -> Option<Self>
    where
        I: IntoIterator<Item = NaiveDateTime>,
    {
        let mut iter = timestamps.into_iter();
        let first = iter.next()?;
        let (start, end) = iter.fold((first, first), |(lo, hi), ts| (lo.min(ts), hi.max(ts)));
        Some(Self { start, end })
    }

    /// Inclusive start of the window.
    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Inclusive end of the window.
    #[must_use]
    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Whether `timestamp` falls inside the window, bounds included.
    #[must_use]
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}
