// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Policies for transferring live elements into a new block.

use core::ptr;

use crate::guard::InitGuard;

/// Strategy a `DynamicArray` uses to transfer its elements into a larger block.
///
/// The policy is a type parameter, so the choice is made once per array type
/// at compile time.
///
/// # Safety
///
/// Implementors must uphold:
///
/// - On return, exactly `count` live values are at `dst`.
/// - On unwind, no live values are left at `dst`: whatever was written is dropped.
/// - `CONSUMES_SOURCE` is `true` if and only if the source values are logically
///   dead after a successful transfer, so the caller must not drop them.
pub unsafe trait Relocation<T> {
    /// Whether a successful transfer leaves the source slots moved-out.
    const CONSUMES_SOURCE: bool;

    /// Transfers `count` values from `src` into `dst`.
    ///
    /// # Safety
    ///
    /// - `src` points to `count` live values.
    /// - `dst` points to `count` uninitialized, writable slots.
    /// - The two ranges do not overlap.
    unsafe fn transfer(src: *const T, dst: *mut T, count: usize);
}

/// Bitwise relocation. The default policy.
///
/// Rust moves cannot fail, so growth under this policy never panics and is
/// always all-or-nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Moving;

/// Clone-then-discard relocation.
///
/// Every element is cloned into the new block; the originals are dropped only
/// after the last clone succeeded. If a clone panics, the clones made so far
/// are dropped and the original array is left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cloning;

// Safety: `copy_nonoverlapping` writes all `count` values or nothing, and
// cannot unwind. The source is moved-out afterwards.
unsafe impl<T> Relocation<T> for Moving {
    const CONSUMES_SOURCE: bool = true;

    #[inline]
    unsafe fn transfer(src: *const T, dst: *mut T, count: usize) {
        // SAFETY: forwarded from the caller's contract.
        unsafe { ptr::copy_nonoverlapping(src, dst, count) };
    }
}

// Safety: the guard drops the clones written so far if `T::clone` unwinds.
// The source values are never touched.
unsafe impl<T: Clone> Relocation<T> for Cloning {
    const CONSUMES_SOURCE: bool = false;

    unsafe fn transfer(src: *const T, dst: *mut T, count: usize) {
        let mut guard = InitGuard::new(dst);

        for i in 0..count {
            // SAFETY: i < count, so `src.add(i)` is live and `dst.add(i)` is
            // an uninitialized slot covered by the caller's contract.
            unsafe {
                let value = (*src.add(i)).clone();
                dst.add(i).write(value);
            }
            guard.advance();
        }

        guard.disarm();
    }
}
