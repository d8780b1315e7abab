//! Selection state for the ranked route list.
//!
//! A small, purely event-driven machine: it never transitions on its own
//! and has no timers. Every ranking pass resets the selection to the safest
//! route; that reset is a deliberate design decision, not an accident of
//! implementation, and manual selections are not remembered across passes.

use thiserror::Error;

/// Errors returned by [`RouteSelection::on_user_select`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// A selection event arrived while no ranked routes exist.
    #[error("no ranked routes are available to select")]
    NoRoutes,
    /// The selection index fell outside the ranked list.
    #[error("route selection {index} is out of range for {count} ranked routes")]
    OutOfRange {
        /// Index the event referenced.
        index: usize,
        /// Number of ranked routes currently available.
        count: usize,
    },
}

/// Which ranked route is currently emphasised for display.
///
/// # Examples
/// ```
/// use saferoute_core::RouteSelection;
///
/// let mut selection = RouteSelection::new();
/// assert!(selection.selected().is_none());
///
/// selection.on_ranking_complete(3);
/// assert_eq!(selection.selected(), Some(0));
///
/// selection.on_user_select(2)?;
/// assert_eq!(selection.selected(), Some(2));
///
/// selection.on_clear();
/// assert!(selection.selected().is_none());
/// # Ok::<(), saferoute_core::SelectionError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteSelection {
    /// No ranked routes are available.
    #[default]
    Empty,
    /// A ranked route is emphasised.
    Selected {
        /// Index into the ranked (sorted) sequence. Always `< count`.
        index: usize,
        /// Length of the ranked sequence the index refers into.
        count: usize,
    },
}

impl RouteSelection {
    /// Construct the machine in its empty state.
    #[must_use]
    pub const fn new() -> Self {
        Self::Empty
    }

    /// React to a completed ranking pass over `count` routes.
    ///
    /// A non-empty ranking always selects rank 0, the safest route,
    /// discarding any prior manual selection. An empty ranking empties the
    /// machine.
    pub fn on_ranking_complete(&mut self, count: usize) {
        *self = if count == 0 {
            Self::Empty
        } else {
            Self::Selected { index: 0, count }
        };
    }

    /// React to an explicit selection event from the caller.
    ///
    /// # Errors
    /// Returns [`SelectionError::NoRoutes`] in the empty state and
    /// [`SelectionError::OutOfRange`] for indices outside the ranked list.
    /// Rejected events leave the state unchanged.
    pub fn on_user_select(&mut self, index: usize) -> Result<(), SelectionError> {
        match *self {
            Self::Empty => Err(SelectionError::NoRoutes),
            Self::Selected { count, .. } if index >= count => {
                Err(SelectionError::OutOfRange { index, count })
            }
            Self::Selected { count, .. } => {
                *self = Self::Selected { index, count };
                Ok(())
            }
        }
    }

    /// Discard the selection from any state.
    pub fn on_clear(&mut self) {
        *self = Self::Empty;
    }

    /// The currently selected ranked index, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        match *self {
            Self::Empty => None,
            Self::Selected { index, .. } => Some(index),
        }
    }
}
