//! Per-session engine state.
//!
//! `RouteSession` owns everything a single user session mutates: the full
//! incident history, the active date window and category filter, the
//! rebuilt working set, the current ranked list, and the selection machine.
//! All mutation flows through explicit methods; there is no ambient state.

use log::debug;

use crate::{
    Category, CategoryFilter, DateWindow, IncidentRecord, IncidentStore, ProximityScorer,
    RouteCandidate, RouteSelection, ScoredRoute, SelectionError, rank_routes,
};

/// Result of a ranking pass at the session level.
///
/// An empty candidate list is an explicit "no result" outcome the boundary
/// layer must surface to the user, never a crash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOutcome {
    /// Routes were scored and ranked; the safest is selected.
    Ranked(usize),
    /// The routing source supplied nothing usable.
    NoRoutes,
}

/// Owned state for one routing session.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use saferoute_core::{Category, IncidentRecord, RouteCandidate, RouteSession};
///
/// let mut session = RouteSession::new();
/// session.load_incidents(vec![IncidentRecord::new(
///     Category::Theft,
///     Coord { x: -87.63, y: 41.88 },
/// )]);
///
/// let route = RouteCandidate::new(vec![Coord { x: -87.63, y: 41.88 }], 500.0, 120.0);
/// session.rank_routes(vec![route]);
/// assert_eq!(session.selection().selected(), Some(0));
/// ```
#[derive(Debug)]
pub struct RouteSession {
    history: Vec<IncidentRecord>,
    available_window: Option<DateWindow>,
    window: Option<DateWindow>,
    filter: CategoryFilter,
    store: IncidentStore,
    scorer: ProximityScorer,
    ranked: Vec<ScoredRoute>,
    selection: RouteSelection,
}

impl Default for RouteSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteSession {
    /// Construct a session with no incidents, every category enabled, and
    /// the default danger radius.
    #[must_use]
    pub fn new() -> Self {
        Self::with_scorer(ProximityScorer::new())
    }

    /// Construct a session with a custom proximity scorer.
    #[must_use]
    pub fn with_scorer(scorer: ProximityScorer) -> Self {
        Self {
            history: Vec::new(),
            available_window: None,
            window: None,
            filter: CategoryFilter::all(),
            store: IncidentStore::new(),
            scorer,
            ranked: Vec::new(),
            selection: RouteSelection::new(),
        }
    }

    /// Replace the incident history and rebuild the working set.
    ///
    /// Any active date window is discarded: the new history defines its own
    /// available range, computed over the records that carry timestamps. An
    /// empty feed leaves the session with zero incidents; surfacing that to
    /// the user is the boundary layer's job.
    pub fn load_incidents(&mut self, records: Vec<IncidentRecord>) {
        self.available_window =
            DateWindow::spanning(records.iter().filter_map(|record| record.timestamp));
        self.history = records;
        self.window = None;
        self.store = IncidentStore::rebuild(&self.history, None);
    }

    /// The window spanning the dated portion of the history, if any dated
    /// records exist.
    #[must_use]
    pub const fn available_window(&self) -> Option<DateWindow> {
        self.available_window
    }

    /// Apply a date window and rebuild the working set.
    pub fn apply_window(&mut self, window: DateWindow) {
        self.store = IncidentStore::rebuild(&self.history, Some(&window));
        self.window = Some(window);
        debug!(
            "date window applied: {} records of {} retained",
            self.store.len(),
            self.history.len(),
        );
    }

    /// The window currently filtering the working set, if any.
    #[must_use]
    pub const fn active_window(&self) -> Option<DateWindow> {
        self.window
    }

    /// Drop temporal filtering and rebuild over the full history.
    pub fn clear_window(&mut self) {
        self.window = None;
        self.store = IncidentStore::rebuild(&self.history, None);
    }

    /// Flip one category in the active filter.
    pub fn toggle_category(&mut self, category: Category) {
        self.filter.toggle(category);
    }

    /// Replace the category filter wholesale.
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    /// The active category filter.
    #[must_use]
    pub const fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Size of the active working set.
    #[must_use]
    pub fn incident_count(&self) -> usize {
        self.store.len()
    }

    /// The active working set.
    #[must_use]
    pub const fn store(&self) -> &IncidentStore {
        &self.store
    }

    /// Score and rank candidate routes, replacing any previous ranking.
    ///
    /// Every pass fully replaces the ranked list and resets the selection
    /// to the safest route. Safe to invoke repeatedly with the same inputs.
    pub fn rank_routes(&mut self, candidates: Vec<RouteCandidate>) -> RankOutcome {
        self.ranked = rank_routes(candidates, &self.store, &self.filter, &self.scorer);
        self.selection.on_ranking_complete(self.ranked.len());
        if self.ranked.is_empty() {
            RankOutcome::NoRoutes
        } else {
            RankOutcome::Ranked(self.ranked.len())
        }
    }

    /// The current ranked routes, safest first.
    #[must_use]
    pub fn ranked(&self) -> &[ScoredRoute] {
        &self.ranked
    }

    /// The selection machine's current state.
    #[must_use]
    pub const fn selection(&self) -> &RouteSelection {
        &self.selection
    }

    /// Emphasise a ranked route in response to a user click.
    ///
    /// # Errors
    /// Propagates [`SelectionError`] for out-of-range or empty-state
    /// events; the rejected event changes nothing.
    pub fn select_route(&mut self, index: usize) -> Result<(), SelectionError> {
        self.selection.on_user_select(index).inspect_err(|err| {
            debug!("selection rejected: {err}");
        })
    }

    /// The currently emphasised route, if any.
    #[must_use]
    pub fn selected_route(&self) -> Option<&ScoredRoute> {
        self.ranked.get(self.selection.selected()?)
    }

    /// Discard the ranked list and all route-derived display state.
    pub fn clear_routes(&mut self) {
        self.ranked.clear();
        self.selection.on_clear();
    }
}
