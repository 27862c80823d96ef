//! Client-side cache of server collections.
//!
//! Every list view reads from a [`Collection`]: the rows of the page the user
//! is looking at plus the pagination metadata that came with them. Fetches are
//! guarded by a sequence number so an out-of-order response from a slow
//! request can never overwrite newer state.

use crate::api::types::{Page, PageMeta};

/// Monotonic ticket dispenser for in-flight requests.
///
/// Each fetch takes a ticket via [`RequestSeq::issue`]; when the response
/// lands, only the holder of the latest ticket is allowed to touch state.
/// Bumping the counter without issuing (`invalidate`) orphans whatever is
/// still in flight.
#[derive(Debug, Default)]
pub struct RequestSeq(u64);

impl RequestSeq {
    pub fn issue(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn is_current(&self, seq: u64) -> bool {
        self.0 == seq
    }

    pub fn invalidate(&mut self) {
        self.0 += 1;
    }
}

/// One cached page of a server-side collection.
#[derive(Debug)]
pub struct Collection<T> {
    pub rows: Vec<T>,
    pub meta: PageMeta,
    pub loading: bool,
    seq: RequestSeq,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            meta: PageMeta::default(),
            loading: false,
            seq: RequestSeq::default(),
        }
    }
}

impl<T> Collection<T> {
    /// Start a fetch and return the ticket the response must present.
    pub fn begin(&mut self) -> u64 {
        self.loading = true;
        self.seq.issue()
    }

    /// Accept a page if `seq` is still the latest ticket. Stale pages are
    /// dropped and the return value says whether anything changed.
    pub fn commit(&mut self, seq: u64, page: Page<T>) -> bool {
        if !self.seq.is_current(seq) {
            return false;
        }
        self.rows = page.items;
        self.meta = page.pagination;
        self.loading = false;
        true
    }

    /// Record a failed fetch. Only the latest ticket clears the loading
    /// flag; a stale failure says nothing about the current request.
    pub fn fail(&mut self, seq: u64) -> bool {
        if !self.seq.is_current(seq) {
            return false;
        }
        self.loading = false;
        true
    }

    /// Orphan any in-flight fetch without touching the cached rows. Used
    /// when leaving a panel so a late response cannot resurface on return.
    pub fn invalidate(&mut self) {
        self.seq.invalidate();
        self.loading = false;
    }

    /// Drop the cached rows entirely and orphan any in-flight fetch.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.meta = PageMeta::default();
        self.invalidate();
    }

    pub fn current_page(&self) -> u32 {
        self.meta.current_page
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(items: Vec<&'static str>, current: u32, last: u32) -> Page<&'static str> {
        Page {
            items,
            pagination: PageMeta {
                current_page: current,
                last_page: last,
                total: 42,
            },
        }
    }

    #[test]
    fn test_commit_applies_latest_fetch() {
        let mut coll = Collection::default();
        let seq = coll.begin();
        assert!(coll.loading);

        assert!(coll.commit(seq, page_of(vec!["a", "b"], 1, 3)));
        assert_eq!(coll.rows, vec!["a", "b"]);
        assert_eq!(coll.current_page(), 1);
        assert!(!coll.loading);
    }

    #[test]
    fn test_stale_commit_is_dropped() {
        let mut coll = Collection::default();
        let first = coll.begin();
        let second = coll.begin();

        // The newer fetch lands first.
        assert!(coll.commit(second, page_of(vec!["new"], 2, 3)));
        // The older one arrives late and must not win.
        assert!(!coll.commit(first, page_of(vec!["old"], 1, 3)));

        assert_eq!(coll.rows, vec!["new"]);
        assert_eq!(coll.current_page(), 2);
    }

    #[test]
    fn test_invalidate_orphans_in_flight_fetch() {
        let mut coll = Collection::default();
        let seq = coll.begin();
        assert!(coll.commit(seq, page_of(vec!["kept"], 1, 1)));

        let seq = coll.begin();
        coll.invalidate();

        assert!(!coll.commit(seq, page_of(vec!["late"], 1, 1)));
        assert_eq!(coll.rows, vec!["kept"]);
        assert!(!coll.loading);
    }

    #[test]
    fn test_stale_failure_does_not_clear_loading() {
        let mut coll: Collection<&str> = Collection::default();
        let first = coll.begin();
        let _second = coll.begin();

        assert!(!coll.fail(first));
        assert!(coll.loading, "newer fetch is still in flight");
    }

    #[test]
    fn test_current_failure_clears_loading() {
        let mut coll: Collection<&str> = Collection::default();
        let seq = coll.begin();
        assert!(coll.fail(seq));
        assert!(!coll.loading);
    }

    #[test]
    fn test_clear_resets_rows_and_meta() {
        let mut coll = Collection::default();
        let seq = coll.begin();
        assert!(coll.commit(seq, page_of(vec!["x"], 4, 9)));

        coll.clear();
        assert!(coll.is_empty());
        assert_eq!(coll.meta.current_page, 1);
        assert_eq!(coll.meta.last_page, 1);
        assert_eq!(coll.meta.total, 0);
    }

    #[test]
    fn test_request_seq_only_latest_ticket_is_current() {
        let mut seq = RequestSeq::default();
        let a = seq.issue();
        let b = seq.issue();
        assert!(!seq.is_current(a));
        assert!(seq.is_current(b));

        seq.invalidate();
        assert!(!seq.is_current(b));
    }
}
