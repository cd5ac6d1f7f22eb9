use tracing::debug;

/// Identifies one coverage lookup.
///
/// Tickets are issued in increasing order, so comparing two tickets tells
/// which viewport was asked about last.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoverageTicket(pub u64);

/// Orders coverage completions so a slow response for an old viewport cannot
/// overwrite the answer for a newer one.
#[derive(Debug, Default)]
pub struct CoverageTracker {
    next: u64,
    latest_applied: Option<CoverageTicket>,
}

impl CoverageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> CoverageTicket {
        self.next += 1;
        CoverageTicket(self.next)
    }

    /// Returns `true` if `ticket` is newer than anything applied so far and
    /// records it as applied.
    pub fn accept(&mut self, ticket: CoverageTicket) -> bool {
        if self.latest_applied.is_some_and(|latest| latest >= ticket) {
            debug!(?ticket, latest = ?self.latest_applied, "dropping stale coverage result");
            return false;
        }
        self.latest_applied = Some(ticket);
        true
    }

    pub fn latest_applied(&self) -> Option<CoverageTicket> {
        self.latest_applied
    }
}

#[cfg(test)]
mod tests {
    use super::{CoverageTicket, CoverageTracker};

    #[test]
    fn tickets_increase() {
        let mut t = CoverageTracker::new();
        let a = t.issue();
        let b = t.issue();
        assert!(b > a);
    }

    #[test]
    fn in_order_completions_are_accepted() {
        let mut t = CoverageTracker::new();
        let a = t.issue();
        let b = t.issue();
        assert!(t.accept(a));
        assert!(t.accept(b));
        assert_eq!(t.latest_applied(), Some(b));
    }

    #[test]
    fn older_completion_after_newer_is_dropped() {
        let mut t = CoverageTracker::new();
        let a = t.issue();
        let b = t.issue();
        assert!(t.accept(b));
        assert!(!t.accept(a));
        assert_eq!(t.latest_applied(), Some(b));
    }

    #[test]
    fn same_ticket_twice_is_dropped() {
        let mut t = CoverageTracker::new();
        let a = t.issue();
        assert!(t.accept(a));
        assert!(!t.accept(CoverageTicket(a.0)));
    }
}
