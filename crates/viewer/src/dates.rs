//! Capture-date bookkeeping for the current viewport.
//!
//! Dates are held newest-first, as the coverage endpoint returns them, so
//! "older" means a larger index.

use foundation::CaptureDate;
use tracing::error;

/// Date navigation buttons.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Nav {
    /// Oldest date.
    First,
    /// One step older.
    Prev,
    /// One step newer.
    Next,
    /// Newest date.
    Last,
}

impl Nav {
    pub const ALL: [Nav; 4] = [Nav::First, Nav::Prev, Nav::Next, Nav::Last];

    /// DOM id of the button.
    pub fn as_str(self) -> &'static str {
        match self {
            Nav::First => "first",
            Nav::Prev => "prev",
            Nav::Next => "next",
            Nav::Last => "last",
        }
    }
}

/// Enabled flags for the four navigation buttons.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct NavState {
    pub first: bool,
    pub prev: bool,
    pub next: bool,
    pub last: bool,
}

impl NavState {
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Button state for the date at `index` in a list of `len` dates.
    ///
    /// An unknown index disables neither `prev` nor `next`.
    pub fn at_index(index: Option<usize>, len: usize) -> Self {
        let at_oldest = match index {
            Some(i) => i + 1 == len,
            None => len == 0,
        };
        Self {
            first: true,
            prev: !at_oldest,
            next: index != Some(0),
            last: true,
        }
    }

    pub fn is_enabled(&self, nav: Nav) -> bool {
        match nav {
            Nav::First => self.first,
            Nav::Prev => self.prev,
            Nav::Next => self.next,
            Nav::Last => self.last,
        }
    }
}

/// Index of the date closest in time to `to`; the first one wins a tie.
pub fn closest_index(dates: &[CaptureDate], to: CaptureDate) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;
    for (i, d) in dates.iter().enumerate() {
        let diff = d.days_between(to);
        if best.is_none_or(|(_, closest)| diff < closest) {
            best = Some((i, diff));
        }
    }
    best.map(|(i, _)| i)
}

/// What a new coverage list means for the selection.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoverageChange {
    NoCoverage,
    Pick(CaptureDate),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DateSelection {
    dates: Vec<CaptureDate>,
    selected: Option<CaptureDate>,
}

impl DateSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dates(&self) -> &[CaptureDate] {
        &self.dates
    }

    pub fn selected(&self) -> Option<CaptureDate> {
        self.selected
    }

    pub fn selected_index(&self) -> Option<usize> {
        let selected = self.selected?;
        self.dates.iter().position(|d| *d == selected)
    }

    /// Button state for the current selection.
    pub fn nav_state(&self) -> NavState {
        match self.selected {
            Some(_) => NavState::at_index(self.selected_index(), self.dates.len()),
            None => NavState::disabled(),
        }
    }

    /// Replaces the date list and decides which date to show next.
    ///
    /// With nothing selected the newest date wins; otherwise the date closest
    /// in time to the current one, so the imagery stays temporally stable
    /// while panning even if the exact date drops out of coverage.
    pub fn replace(&mut self, dates: Vec<CaptureDate>) -> CoverageChange {
        self.dates = dates;
        let Some(first) = self.dates.first().copied() else {
            return CoverageChange::NoCoverage;
        };
        let Some(current) = self.selected else {
            return CoverageChange::Pick(first);
        };
        match closest_index(&self.dates, current) {
            Some(i) => CoverageChange::Pick(self.dates[i]),
            None => CoverageChange::Pick(first),
        }
    }

    /// Selects `date`. Returns the new button state, or `None` if `date` was
    /// already selected.
    pub fn select(&mut self, date: CaptureDate) -> Option<NavState> {
        if self.selected == Some(date) {
            return None;
        }
        self.selected = Some(date);
        if self.selected_index().is_none() {
            error!(%date, dates = ?self.dates, "selected date not in coverage");
        }
        Some(self.nav_state())
    }

    /// Clears the selection. Returns `false` if nothing was selected.
    pub fn clear(&mut self) -> bool {
        self.selected.take().is_some()
    }

    /// Date a navigation button leads to, or `None` past either end of the list.
    pub fn target(&self, nav: Nav) -> Option<CaptureDate> {
        let index = self.selected_index().map_or(-1, |i| i as isize);
        let target = match nav {
            Nav::First => self.dates.len() as isize - 1,
            Nav::Prev => index + 1,
            Nav::Next => index - 1,
            Nav::Last => 0,
        };
        usize::try_from(target)
            .ok()
            .and_then(|i| self.dates.get(i))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{CoverageChange, DateSelection, Nav, NavState, closest_index};
    use foundation::CaptureDate;
    use pretty_assertions::assert_eq;

    fn d(s: &str) -> CaptureDate {
        CaptureDate::parse(s).unwrap()
    }

    fn list(items: &[&str]) -> Vec<CaptureDate> {
        items.iter().map(|s| d(s)).collect()
    }

    #[test]
    fn closest_picks_minimum_distance() {
        let dates = list(&["2024-03-15", "2024-01-01"]);
        assert_eq!(closest_index(&dates, d("2024-03-01")), Some(0));
        // 2024-02-01 is 43 days from 2024-03-15 and 31 from 2024-01-01.
        assert_eq!(closest_index(&dates, d("2024-02-01")), Some(1));
    }

    #[test]
    fn closest_tie_keeps_first_in_list_order() {
        let dates = list(&["2024-01-11", "2024-01-01"]);
        assert_eq!(closest_index(&dates, d("2024-01-06")), Some(0));
        let dates = list(&["2024-01-01", "2024-01-11"]);
        assert_eq!(closest_index(&dates, d("2024-01-06")), Some(0));
    }

    #[test]
    fn closest_of_empty_is_none() {
        assert_eq!(closest_index(&[], d("2024-01-01")), None);
    }

    #[test]
    fn first_coverage_picks_newest() {
        let mut sel = DateSelection::new();
        let change = sel.replace(list(&["2024-03-01", "2024-02-01"]));
        assert_eq!(change, CoverageChange::Pick(d("2024-03-01")));
    }

    #[test]
    fn empty_coverage_is_no_coverage() {
        let mut sel = DateSelection::new();
        sel.replace(list(&["2024-03-01"]));
        sel.select(d("2024-03-01"));
        assert_eq!(sel.replace(Vec::new()), CoverageChange::NoCoverage);
        assert!(sel.dates().is_empty());
    }

    #[test]
    fn coverage_change_tracks_nearest_date() {
        let mut sel = DateSelection::new();
        sel.replace(list(&["2024-03-01", "2024-02-01", "2024-01-01"]));
        sel.select(d("2024-03-01"));
        let change = sel.replace(list(&["2024-03-15", "2024-01-01"]));
        assert_eq!(change, CoverageChange::Pick(d("2024-03-15")));
    }

    #[test]
    fn select_same_date_is_noop() {
        let mut sel = DateSelection::new();
        sel.replace(list(&["2024-03-01", "2024-02-01"]));
        assert!(sel.select(d("2024-02-01")).is_some());
        assert_eq!(sel.select(d("2024-02-01")), None);
    }

    #[test]
    fn nav_state_at_ends_and_middle() {
        let mut sel = DateSelection::new();
        sel.replace(list(&["2024-03-01", "2024-02-01", "2024-01-01"]));

        let newest = sel.select(d("2024-03-01")).unwrap();
        assert_eq!(
            newest,
            NavState {
                first: true,
                prev: true,
                next: false,
                last: true
            }
        );

        let oldest = sel.select(d("2024-01-01")).unwrap();
        assert_eq!(
            oldest,
            NavState {
                first: true,
                prev: false,
                next: true,
                last: true
            }
        );

        let middle = sel.select(d("2024-02-01")).unwrap();
        assert!(Nav::ALL.iter().all(|n| middle.is_enabled(*n)));
    }

    #[test]
    fn single_date_disables_prev_and_next() {
        let mut sel = DateSelection::new();
        sel.replace(list(&["2024-03-01"]));
        let nav = sel.select(d("2024-03-01")).unwrap();
        assert!(nav.first && nav.last);
        assert!(!nav.prev && !nav.next);
    }

    #[test]
    fn date_outside_list_leaves_prev_and_next_enabled() {
        let mut sel = DateSelection::new();
        sel.replace(list(&["2024-03-01", "2024-02-01"]));
        let nav = sel.select(d("2020-01-01")).unwrap();
        assert!(nav.prev && nav.next);
        assert_eq!(sel.selected_index(), None);
    }

    #[test]
    fn navigation_targets() {
        let mut sel = DateSelection::new();
        sel.replace(list(&["2024-03-01", "2024-02-01", "2024-01-01"]));
        sel.select(d("2024-02-01"));
        assert_eq!(sel.target(Nav::First), Some(d("2024-01-01")));
        assert_eq!(sel.target(Nav::Last), Some(d("2024-03-01")));
        assert_eq!(sel.target(Nav::Prev), Some(d("2024-01-01")));
        assert_eq!(sel.target(Nav::Next), Some(d("2024-03-01")));
    }

    #[test]
    fn navigation_past_either_end_goes_nowhere() {
        let mut sel = DateSelection::new();
        sel.replace(list(&["2024-03-01", "2024-01-01"]));
        sel.select(d("2024-01-01"));
        assert_eq!(sel.target(Nav::Prev), None);
        sel.select(d("2024-03-01"));
        assert_eq!(sel.target(Nav::Next), None);
    }

    #[test]
    fn navigation_with_empty_list_goes_nowhere() {
        let sel = DateSelection::new();
        for nav in Nav::ALL {
            assert_eq!(sel.target(nav), None);
        }
    }

    #[test]
    fn nav_ids_match_buttons() {
        let ids: Vec<_> = Nav::ALL.into_iter().map(Nav::as_str).collect();
        assert_eq!(ids, vec!["first", "prev", "next", "last"]);
    }
}
