// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::tracked::Tracked;

const UNLIMITED: usize = usize::MAX;

#[derive(Debug)]
struct Counters {
    constructed: AtomicUsize,
    cloned: AtomicUsize,
    dropped: AtomicUsize,
    construct_budget: AtomicUsize,
    clone_budget: AtomicUsize,
}

/// Shared lifetime accounting for [`Tracked`] values.
///
/// Cloning the ledger yields another handle to the same counters, in the same
/// way `ZeroizeOnDropSentinel` clones share one flag. Every `Tracked` carries
/// a handle and reports its construction, clones and drop.
///
/// Failure injection is sticky: once a budget is exhausted every further
/// construction (or clone) panics until [`disarm()`](Self::disarm) is called.
///
/// # Example
///
/// ```rust
/// use holdfast_test_utils::LifeLedger;
///
/// let ledger = LifeLedger::new();
/// ledger.fail_clone_after(1);
///
/// let value = ledger.track(5);
/// let first = value.clone();
/// let second = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| value.clone()));
///
/// assert!(second.is_err());
/// assert_eq!(ledger.cloned(), 1);
///
/// drop(first);
/// ```
#[derive(Clone, Debug)]
pub struct LifeLedger(Arc<Counters>);

impl LifeLedger {
    /// Creates a ledger with all counters at zero and no failures armed.
    pub fn new() -> Self {
        Self(Arc::new(Counters {
            constructed: AtomicUsize::new(0),
            cloned: AtomicUsize::new(0),
            dropped: AtomicUsize::new(0),
            construct_budget: AtomicUsize::new(UNLIMITED),
            clone_budget: AtomicUsize::new(UNLIMITED),
        }))
    }

    /// Constructs a tracked value.
    ///
    /// # Panics
    ///
    /// Panics with `"injected construction failure"` once the construction
    /// budget set by [`fail_construct_after()`](Self::fail_construct_after) is spent.
    pub fn track(&self, value: i32) -> Tracked {
        spend(&self.0.construct_budget, "construction");
        self.0.constructed.fetch_add(1, Ordering::Relaxed);

        Tracked::new(value, self.clone())
    }

    /// Returns a constructor closure yielding `start`, `start + 1`, ...
    pub fn counter(&self, start: i32) -> impl FnMut() -> Tracked + '_ {
        let mut next = start;
        move || {
            let value = self.track(next);
            next += 1;
            value
        }
    }

    /// Lets the next `successes` constructions through, then panics on every one after.
    pub fn fail_construct_after(&self, successes: usize) {
        self.0.construct_budget.store(successes, Ordering::Relaxed);
    }

    /// Lets the next `successes` clones through, then panics on every one after.
    pub fn fail_clone_after(&self, successes: usize) {
        self.0.clone_budget.store(successes, Ordering::Relaxed);
    }

    /// Removes all armed failures.
    pub fn disarm(&self) {
        self.0.construct_budget.store(UNLIMITED, Ordering::Relaxed);
        self.0.clone_budget.store(UNLIMITED, Ordering::Relaxed);
    }

    /// Number of values built through [`track()`](Self::track).
    pub fn constructed(&self) -> usize {
        self.0.constructed.load(Ordering::Relaxed)
    }

    /// Number of successful clones.
    pub fn cloned(&self) -> usize {
        self.0.cloned.load(Ordering::Relaxed)
    }

    /// Number of drops.
    pub fn dropped(&self) -> usize {
        self.0.dropped.load(Ordering::Relaxed)
    }

    /// Values currently alive: constructions plus clones minus drops.
    ///
    /// # Panics
    ///
    /// Panics if more values were dropped than ever existed (a double drop).
    pub fn live(&self) -> usize {
        let born = self.constructed() + self.cloned();
        let dropped = self.dropped();

        assert!(
            dropped <= born,
            "double drop detected: {dropped} drops for {born} values"
        );

        born - dropped
    }

    /// Asserts that every value ever created has been dropped exactly once.
    pub fn assert_balanced(&self) {
        assert_eq!(
            self.live(),
            0,
            "leak detected: {} constructed, {} cloned, {} dropped",
            self.constructed(),
            self.cloned(),
            self.dropped()
        );
    }

    pub(crate) fn record_clone(&self) {
        spend(&self.0.clone_budget, "clone");
        self.0.cloned.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_drop(&self) {
        self.0.dropped.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for LifeLedger {
    fn default() -> Self {
        Self::new()
    }
}

fn spend(budget: &AtomicUsize, what: &str) {
    let remaining = budget.load(Ordering::Relaxed);

    if remaining == UNLIMITED {
        return;
    }

    if remaining == 0 {
        panic!("injected {what} failure");
    }

    budget.store(remaining - 1, Ordering::Relaxed);
}
