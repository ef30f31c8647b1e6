// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::{RawStorage, StorageError};

// =============================================================================
// new()
// =============================================================================

#[test]
fn test_new() {
    let storage = RawStorage::<u32>::new();

    assert_eq!(storage.capacity(), 0);
    assert!(!storage.is_allocated());
    assert!(storage.address().is_none());
}

#[test]
fn test_default() {
    let storage = RawStorage::<String>::default();

    assert_eq!(storage.capacity(), 0);
    assert!(storage.address().is_none());
}

// =============================================================================
// with_capacity() / try_with_capacity()
// =============================================================================

#[test]
fn test_with_capacity() {
    let storage = RawStorage::<u64>::with_capacity(16);

    assert_eq!(storage.capacity(), 16);
    assert!(storage.is_allocated());
    assert!(storage.address().is_some());
}

#[test]
fn test_with_capacity_zero_does_not_allocate() {
    let storage = RawStorage::<u64>::with_capacity(0);

    assert_eq!(storage.capacity(), 0);
    assert!(storage.address().is_none());
}

#[test]
fn test_with_capacity_zero_sized_type() {
    let storage = RawStorage::<()>::with_capacity(1_000);

    assert_eq!(storage.capacity(), 1_000);
    assert!(!storage.is_allocated());
    assert!(storage.address().is_none());
}

#[test]
fn test_try_with_capacity_overflow() {
    let result = RawStorage::<u64>::try_with_capacity(usize::MAX);

    assert!(matches!(result, Err(StorageError::CapacityOverflow)));
}

#[test]
#[should_panic(expected = "capacity overflow")]
fn test_with_capacity_overflow_panics() {
    let _ = RawStorage::<u64>::with_capacity(usize::MAX / 2);
}

#[test]
fn test_layout_for() {
    let layout = RawStorage::<u32>::layout_for(10).expect("Failed to build layout");

    assert_eq!(layout.size(), 40);
    assert_eq!(layout.align(), core::mem::align_of::<u32>());
}

// =============================================================================
// slot()
// =============================================================================

#[test]
fn test_slot_write_and_read() {
    let storage = RawStorage::<u16>::with_capacity(4);

    unsafe {
        // SAFETY (PRECONDITIONS ARE MET): all slots are within capacity, u16 needs no drop
        for i in 0..4 {
            storage.slot(i).write(i as u16 * 10);
        }

        for i in 0..4 {
            assert_eq!(*storage.slot(i), i as u16 * 10);
        }
    }
}

#[test]
fn test_slot_one_past_end_is_address_only() {
    let storage = RawStorage::<u8>::with_capacity(3);

    let base = storage.as_ptr();
    let end = storage.slot(3);

    assert_eq!(end as usize - base as usize, 3);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "beyond capacity")]
fn test_slot_beyond_capacity_debug_asserts() {
    let storage = RawStorage::<u8>::with_capacity(3);

    let _ = storage.slot(4);
}

#[test]
fn test_slots_are_contiguous() {
    let storage = RawStorage::<u64>::with_capacity(8);

    for i in 1..8 {
        let delta = storage.slot(i) as usize - storage.slot(i - 1) as usize;
        assert_eq!(delta, core::mem::size_of::<u64>());
    }
}

// =============================================================================
// swap()
// =============================================================================

#[test]
fn test_swap() {
    let mut a = RawStorage::<u32>::with_capacity(2);
    let mut b = RawStorage::<u32>::with_capacity(5);

    let a_address = a.address();
    let b_address = b.address();

    a.swap(&mut b);

    assert_eq!(a.capacity(), 5);
    assert_eq!(b.capacity(), 2);
    assert_eq!(a.address(), b_address);
    assert_eq!(b.address(), a_address);
}

#[test]
fn test_swap_with_empty() {
    let mut a = RawStorage::<u32>::with_capacity(4);
    let mut b = RawStorage::<u32>::new();

    a.swap(&mut b);

    assert!(a.address().is_none());
    assert_eq!(b.capacity(), 4);
}

// =============================================================================
// take() / moves
// =============================================================================

#[test]
fn test_take_transfers_block() {
    let mut source = RawStorage::<u32>::with_capacity(6);
    let address = source.address();

    let target = source.take();

    assert_eq!(target.capacity(), 6);
    assert_eq!(target.address(), address);
    assert_eq!(source.capacity(), 0);
    assert!(source.address().is_none());
}

#[test]
fn test_move_keeps_address() {
    let source = RawStorage::<u32>::with_capacity(6);
    let address = source.address();

    let moved = source;

    assert_eq!(moved.address(), address);
}

// =============================================================================
// Drop
// =============================================================================

#[test]
fn test_drop_does_not_drop_elements() {
    use std::rc::Rc;

    let shared = Rc::new(());

    {
        let storage = RawStorage::<Rc<()>>::with_capacity(2);
        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): slot 0 is within capacity
            storage.slot(0).write(Rc::clone(&shared));
        }
        assert_eq!(Rc::strong_count(&shared), 2);

        // Drop the element by hand, as the owner must.
        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): slot 0 holds a live value
            core::ptr::drop_in_place(storage.slot(0));
        }
    }

    assert_eq!(Rc::strong_count(&shared), 1);
}

#[test]
fn test_leaked_element_is_not_dropped() {
    use std::rc::Rc;

    let shared = Rc::new(());

    {
        let storage = RawStorage::<Rc<()>>::with_capacity(1);
        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): slot 0 is within capacity
            storage.slot(0).write(Rc::clone(&shared));
        }
    }

    // The storage freed memory only; the element was never dropped.
    assert_eq!(Rc::strong_count(&shared), 2);
}

// =============================================================================
// Debug
// =============================================================================

#[test]
fn test_debug() {
    let storage = RawStorage::<u8>::with_capacity(3);
    let debug = format!("{storage:?}");

    assert!(debug.contains("RawStorage"));
    assert!(debug.contains("capacity: 3"));
    assert!(debug.contains("allocated: true"));
}
