// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::LifeLedger;

#[test]
fn test_counts_construct_clone_drop() {
    let ledger = LifeLedger::new();

    let a = ledger.track(1);
    let b = a.clone();
    assert_eq!(ledger.constructed(), 1);
    assert_eq!(ledger.cloned(), 1);
    assert_eq!(ledger.live(), 2);

    drop(a);
    assert_eq!(ledger.dropped(), 1);
    assert_eq!(ledger.live(), 1);

    drop(b);
    ledger.assert_balanced();
}

#[test]
fn test_counter_yields_sequence() {
    let ledger = LifeLedger::new();
    let mut next = ledger.counter(10);

    let values: Vec<i32> = (0..3).map(|_| next().value()).collect();

    assert_eq!(values, [10, 11, 12]);
    ledger.assert_balanced();
}

#[test]
fn test_fail_clone_after_is_sticky() {
    let ledger = LifeLedger::new();
    let value = ledger.track(3);

    ledger.fail_clone_after(2);

    let first = value.clone();
    let second = value.clone();
    assert!(catch_unwind(AssertUnwindSafe(|| value.clone())).is_err());
    assert!(catch_unwind(AssertUnwindSafe(|| value.clone())).is_err());
    assert_eq!(ledger.cloned(), 2);

    ledger.disarm();
    let third = value.clone();
    assert_eq!(third, 3);

    drop((value, first, second, third));
    ledger.assert_balanced();
}

#[test]
fn test_fail_construct_after() {
    let ledger = LifeLedger::new();
    ledger.fail_construct_after(1);

    let value = ledger.track(1);
    assert!(catch_unwind(AssertUnwindSafe(|| ledger.track(2))).is_err());
    assert_eq!(ledger.constructed(), 1);

    drop(value);
    ledger.assert_balanced();
}

#[test]
#[should_panic(expected = "leak detected")]
fn test_assert_balanced_detects_leak() {
    let ledger = LifeLedger::new();
    core::mem::forget(ledger.track(1));

    ledger.assert_balanced();
}

#[test]
fn test_equality_and_debug_use_payload() {
    let ledger = LifeLedger::new();
    let a = ledger.track(4);
    let b = ledger.track(4);

    assert_eq!(a, b);
    assert_eq!(a, 4);
    assert_eq!(format!("{a:?}"), "Tracked(4)");
}
