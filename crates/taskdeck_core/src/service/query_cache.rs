//! Per-user cached query results with explicit invalidation.
//!
//! # Responsibility
//! - Hold the last fetched list per owning user.
//! - Hand out shared read-only snapshots to view-derivation consumers.
//!
//! # Invariants
//! - Only services write here; consumers receive `Rc` snapshots.
//! - Invalidation discards the whole list; there is no partial patching.

use crate::auth::UserId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Cache map keyed by user id, one entry per fetched list.
///
/// Single-threaded by design: the core runs on one logical thread, so
/// interior mutability via `RefCell` is sufficient and `Rc` snapshots stay
/// cheap to clone.
#[derive(Debug)]
pub struct QueryCache<T> {
    entries: RefCell<HashMap<UserId, Rc<Vec<T>>>>,
}

impl<T> QueryCache<T> {
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
        }
    }

    /// Returns the cached list for `owner`, if one is warm.
    pub fn get(&self, owner: UserId) -> Option<Rc<Vec<T>>> {
        self.entries.borrow().get(&owner).cloned()
    }

    /// Stores a freshly fetched list and returns its shared snapshot.
    pub fn store(&self, owner: UserId, rows: Vec<T>) -> Rc<Vec<T>> {
        let shared = Rc::new(rows);
        self.entries
            .borrow_mut()
            .insert(owner, Rc::clone(&shared));
        shared
    }

    /// Discards the cached list for `owner` so the next read refetches.
    pub fn invalidate(&self, owner: UserId) {
        self.entries.borrow_mut().remove(&owner);
    }

    /// Discards every cached list.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
