// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Drop guard over a run of freshly constructed slots.

use core::mem;
use core::ptr;

/// Drops `initialized` contiguous values starting at `start` unless disarmed.
///
/// Used while filling a block that is not yet owned by an array: if a
/// constructor panics, unwinding drops exactly what was built so far.
pub(crate) struct InitGuard<T> {
    start: *mut T,
    initialized: usize,
}

impl<T> InitGuard<T> {
    /// Guard over an empty run at `start`.
    #[inline(always)]
    pub(crate) fn new(start: *mut T) -> Self {
        Self::covering(start, 0)
    }

    /// Guard over `initialized` values already written at `start`.
    #[inline(always)]
    pub(crate) fn covering(start: *mut T, initialized: usize) -> Self {
        Self { start, initialized }
    }

    /// Records that one more slot has been written.
    #[inline(always)]
    pub(crate) fn advance(&mut self) {
        self.initialized += 1;
    }

    /// Hands the run over to its new owner.
    #[inline(always)]
    pub(crate) fn disarm(self) {
        mem::forget(self);
    }
}

impl<T> Drop for InitGuard<T> {
    fn drop(&mut self) {
        // SAFETY: exactly `initialized` contiguous slots from `start` were
        // written and have not been handed to any other owner.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.start,
                self.initialized,
            ));
        }
    }
}
