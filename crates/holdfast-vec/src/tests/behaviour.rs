// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use holdfast_test_utils::LifeLedger;

use crate::{ArrayBehaviour, Cloning, DynamicArray, StorageError};

// =============================================================================
// ArrayBehaviour::FailAtReserve
// =============================================================================

#[test]
fn test_fail_at_reserve() {
    let mut array = DynamicArray::<u32>::new();
    array.push_back(1);
    array.change_behaviour(ArrayBehaviour::FailAtReserve);

    let result = array.try_reserve(16);

    assert!(matches!(result, Err(StorageError::AllocFailed { .. })));
    assert_eq!(array, [1]);
    assert_eq!(array.capacity(), 1);
}

#[test]
fn test_fail_at_reserve_does_not_affect_growth() {
    let mut array = DynamicArray::<u32>::new();
    array.change_behaviour(ArrayBehaviour::FailAtReserve);

    assert!(array.try_push_back(1).is_ok());
    assert!(array.try_push_back(2).is_ok());
    assert_eq!(array.capacity(), 2);
}

#[test]
fn test_fail_at_reserve_noop_when_capacity_suffices() {
    let mut array = DynamicArray::<u32>::with_capacity(8);
    array.change_behaviour(ArrayBehaviour::FailAtReserve);

    assert!(array.try_reserve(8).is_ok());
    assert_eq!(array.capacity(), 8);
}

// =============================================================================
// ArrayBehaviour::FailAtGrow
// =============================================================================

#[test]
fn test_fail_at_grow_try_push_back_returns_value() {
    let ledger = LifeLedger::new();

    {
        let mut array = DynamicArray::new();
        array.push_back(ledger.track(1));
        array.change_behaviour(ArrayBehaviour::FailAtGrow);

        let result = array.try_push_back(ledger.track(2));

        let (value, error) = match result {
            Ok(_) => panic!("growth should have failed"),
            Err(rejected) => rejected,
        };

        assert_eq!(value, 2);
        assert!(matches!(error, StorageError::AllocFailed { .. }));
        assert_eq!(array, [1]);
        assert_eq!(array.capacity(), 1);
    }

    ledger.assert_balanced();
}

#[test]
fn test_fail_at_grow_skips_constructor() {
    let mut array = DynamicArray::<u32>::new();
    array.change_behaviour(ArrayBehaviour::FailAtGrow);

    let mut called = false;
    let result = array.try_emplace_back_with(|| {
        called = true;
        7
    });

    assert!(result.is_err());
    assert!(!called);
    assert!(array.is_empty());
}

#[test]
fn test_fail_at_grow_insert() {
    let mut array = DynamicArray::<u32>::new();
    array.push_back(1);
    array.push_back(2);
    array.change_behaviour(ArrayBehaviour::FailAtGrow);

    let result = array.try_emplace_with(0, || 9);

    assert!(matches!(result, Err(StorageError::AllocFailed { .. })));
    assert_eq!(array, [1, 2]);
}

#[test]
fn test_fail_at_grow_in_place_paths_still_succeed() {
    let mut array = DynamicArray::<u32>::with_capacity(4);
    array.push_back(1);
    array.change_behaviour(ArrayBehaviour::FailAtGrow);

    assert!(array.try_push_back(2).is_ok());
    assert_eq!(array.try_emplace_with(0, || 0), Ok(0));
    assert_eq!(array, [0, 1, 2]);
}

#[test]
fn test_fail_at_grow_under_cloning() {
    let ledger = LifeLedger::new();

    {
        let mut array = DynamicArray::with_policy(Cloning);
        array.push_back(ledger.track(1));
        array.change_behaviour(ArrayBehaviour::FailAtGrow);

        assert!(array.try_emplace_back_with(|| ledger.track(2)).is_err());
        assert_eq!(ledger.cloned(), 0);
        assert_eq!(array, [1]);
    }

    ledger.assert_balanced();
}

// =============================================================================
// ArrayBehaviour::None
// =============================================================================

#[test]
fn test_reset_to_none() {
    let mut array = DynamicArray::<u32>::new();

    array.change_behaviour(ArrayBehaviour::FailAtGrow);
    assert!(array.try_push_back(1).is_err());

    array.change_behaviour(ArrayBehaviour::None);
    assert!(array.try_push_back(1).is_ok());
    assert_eq!(array, [1]);
}

#[test]
fn test_behaviour_is_sticky() {
    let mut array = DynamicArray::<u32>::new();
    array.change_behaviour(ArrayBehaviour::FailAtReserve);

    assert!(array.try_reserve(1).is_err());
    assert!(array.try_reserve(2).is_err());
    assert!(array.try_reserve(3).is_err());
}

#[test]
fn test_behaviour_default_is_none() {
    assert_eq!(ArrayBehaviour::default(), ArrayBehaviour::None);
}

#[test]
fn test_taken_array_starts_without_behaviour() {
    let mut array = DynamicArray::<u32>::new();
    array.change_behaviour(ArrayBehaviour::FailAtGrow);

    let mut taken = array.take();

    assert!(taken.try_push_back(1).is_ok());
}
