//! Tracking of COM references awaiting release
//!
//! A [`ReleaseTracker`] is a caller-owned list of handles that were returned
//! by late-bound calls. Entries are unique by reference identity and kept in
//! insertion order. Nothing is ever drained automatically: the owner decides
//! when to [`release_all`](ReleaseTracker::release_all) or
//! [`clear`](ReleaseTracker::clear).

use std::fmt;

use log::debug;

/// A reference-counted object handle the tracker can hold
pub trait Handle {
    /// Reference identity. Two handles to the same object must agree.
    fn identity(&self) -> usize;

    /// Short description for diagnostics, such as the type name
    fn describe(&self) -> String;
}

/// Insertion-ordered set of handles pending release
pub struct ReleaseTracker<H: Handle> {
    tracked: Vec<H>,
}

impl<H: Handle> ReleaseTracker<H> {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self {
            tracked: Vec::new(),
        }
    }

    /// Track a handle. Returns `false` if the same object is already tracked,
    /// in which case `handle` is dropped and the existing entry is kept.
    pub fn track(&mut self, handle: H) -> bool {
        if self.is_tracked(&handle) {
            return false;
        }
        debug!("tracking {}", handle.describe());
        self.tracked.push(handle);
        true
    }

    /// Stop tracking the object `handle` refers to; the tracked entry is dropped
    pub fn remove(&mut self, handle: &H) -> bool {
        let identity = handle.identity();
        match self.tracked.iter().position(|h| h.identity() == identity) {
            Some(index) => {
                self.tracked.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether the object `handle` refers to is tracked
    pub fn is_tracked(&self, handle: &H) -> bool {
        let identity = handle.identity();
        self.tracked.iter().any(|h| h.identity() == identity)
    }

    /// Number of tracked handles
    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    /// Iterate tracked handles in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &H> {
        self.tracked.iter()
    }

    /// Release every tracked handle, newest first, and empty the list.
    /// Returns how many were released.
    pub fn release_all(&mut self) -> usize {
        let count = self.tracked.len();
        // Children were tracked after their parents
        while let Some(handle) = self.tracked.pop() {
            drop(handle);
        }
        debug!("released {} tracked handle(s)", count);
        count
    }

    /// Forget every entry without releasing it. The handles are returned so
    /// the caller decides their fate.
    pub fn clear(&mut self) -> Vec<H> {
        std::mem::take(&mut self.tracked)
    }

    /// Release everything, leaving the tracker empty
    pub fn reset(&mut self) {
        self.release_all();
        self.tracked.clear();
    }

    /// One `Tracked: <description>` line per entry, also written to the debug log
    pub fn debug_list(&self) -> Vec<String> {
        self.tracked
            .iter()
            .map(|h| {
                let line = format!("Tracked: {}", h.describe());
                debug!("{}", line);
                line
            })
            .collect()
    }
}

impl<H: Handle> Default for ReleaseTracker<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Handle> fmt::Debug for ReleaseTracker<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReleaseTracker")
            .field("len", &self.tracked.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Stand-in handle that records its release
    struct FakeHandle {
        id: usize,
        name: &'static str,
        released: Rc<RefCell<Vec<usize>>>,
    }

    impl Handle for FakeHandle {
        fn identity(&self) -> usize {
            self.id
        }

        fn describe(&self) -> String {
            self.name.to_string()
        }
    }

    impl Drop for FakeHandle {
        fn drop(&mut self) {
            self.released.borrow_mut().push(self.id);
        }
    }

    fn handle(id: usize, name: &'static str, log: &Rc<RefCell<Vec<usize>>>) -> FakeHandle {
        FakeHandle {
            id,
            name,
            released: Rc::clone(log),
        }
    }

    #[test]
    fn test_track_dedupes_by_identity() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut tracker = ReleaseTracker::new();

        assert!(tracker.track(handle(1, "Workbooks", &log)));
        assert!(tracker.track(handle(2, "Workbook", &log)));
        // A second reference to object 1 is refused and dropped on the spot
        assert!(!tracker.track(handle(1, "Workbooks", &log)));

        assert_eq!(tracker.len(), 2);
        assert_eq!(*log.borrow(), vec![1]);
    }

    #[test]
    fn test_release_all_drains() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut tracker = ReleaseTracker::new();
        tracker.track(handle(10, "Application", &log));
        tracker.track(handle(11, "Workbooks", &log));
        tracker.track(handle(12, "Workbook", &log));

        assert_eq!(tracker.release_all(), 3);
        assert!(tracker.is_empty());
        assert_eq!(*log.borrow(), vec![12, 11, 10]);
        assert_eq!(tracker.release_all(), 0);
    }

    #[test]
    fn test_clear_hands_back_without_releasing() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut tracker = ReleaseTracker::new();
        tracker.track(handle(1, "Range", &log));
        tracker.track(handle(2, "Font", &log));

        let detached = tracker.clear();
        assert!(tracker.is_empty());
        assert!(log.borrow().is_empty());

        let ids: Vec<usize> = detached.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_remove_and_is_tracked() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut tracker = ReleaseTracker::new();
        tracker.track(handle(5, "Sheets", &log));

        let probe = handle(5, "Sheets", &log);
        assert!(tracker.is_tracked(&probe));
        assert!(tracker.remove(&probe));
        assert!(!tracker.is_tracked(&probe));
        assert!(!tracker.remove(&probe));
        assert_eq!(tracker.len(), 0);
    }

    #[test]
    fn test_debug_list() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut tracker = ReleaseTracker::new();
        tracker.track(handle(1, "Document", &log));
        tracker.track(handle(2, "Table", &log));

        assert_eq!(
            tracker.debug_list(),
            vec!["Tracked: Document".to_string(), "Tracked: Table".to_string()]
        );
    }

    #[test]
    fn test_reset() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut tracker = ReleaseTracker::default();
        tracker.track(handle(1, "Cell", &log));
        tracker.reset();
        assert!(tracker.is_empty());
        assert_eq!(*log.borrow(), vec![1]);
    }
}
