// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::alloc::{alloc, dealloc};
use core::alloc::Layout;
use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;

use crate::error::StorageError;

/// An uninitialized block sized for exactly `capacity` values of `T`.
///
/// The storage knows nothing about which slots hold live values. Whoever owns
/// it is responsible for dropping every live element before the storage is
/// dropped; otherwise those elements leak.
///
/// A zero capacity, or a zero-sized `T`, never touches the allocator. In that
/// case [`address()`](Self::address) is `None` and the internal pointer is
/// dangling, which is still valid for zero-length slices.
///
/// # Example
///
/// ```rust
/// use holdfast_raw::RawStorage;
///
/// let mut a = RawStorage::<u64>::with_capacity(8);
/// let mut b = RawStorage::<u64>::new();
///
/// a.swap(&mut b);
/// assert_eq!(a.capacity(), 0);
/// assert_eq!(b.capacity(), 8);
///
/// let c = b.take();
/// assert_eq!(b.capacity(), 0);
/// assert_eq!(c.capacity(), 8);
/// ```
pub struct RawStorage<T> {
    ptr: NonNull<T>,
    capacity: usize,
    _marker: PhantomData<T>,
}

// Safety: the block is uniquely owned, exactly like `Vec<T>`'s buffer.
unsafe impl<T: Send> Send for RawStorage<T> {}
unsafe impl<T: Sync> Sync for RawStorage<T> {}

impl<T> RawStorage<T> {
    /// Creates an empty storage with zero capacity. Does not allocate.
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates an uninitialized block for exactly `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics with `"capacity overflow"` if the block would exceed `isize::MAX`
    /// bytes. Allocation failure is routed to `handle_alloc_error`.
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(storage) => storage,
            Err(error) => error.raise(),
        }
    }

    /// Fallible version of [`with_capacity`](Self::with_capacity).
    ///
    /// # Errors
    ///
    /// - [`StorageError::CapacityOverflow`] if the byte size overflows.
    /// - [`StorageError::AllocFailed`] if the allocator returns null.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, StorageError> {
        let layout = Self::layout_for(capacity)?;

        if layout.size() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                capacity,
                _marker: PhantomData,
            });
        }

        // SAFETY: layout has a non-zero size.
        let raw = unsafe { alloc(layout) };

        let Some(ptr) = NonNull::new(raw.cast::<T>()) else {
            log::warn!("allocation of {capacity} slots failed ({layout:?})");
            return Err(StorageError::AllocFailed { layout });
        };

        Ok(Self {
            ptr,
            capacity,
            _marker: PhantomData,
        })
    }

    /// Layout of a block holding `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::CapacityOverflow`] if the size overflows `isize::MAX`.
    pub fn layout_for(capacity: usize) -> Result<Layout, StorageError> {
        Layout::array::<T>(capacity).map_err(|_| StorageError::CapacityOverflow)
    }

    /// Number of elements the block can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if a block is currently held from the allocator.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.capacity != 0 && mem::size_of::<T>() != 0
    }

    /// Start of the block, or `None` when nothing is allocated.
    #[inline]
    pub fn address(&self) -> Option<NonNull<T>> {
        self.is_allocated().then_some(self.ptr)
    }

    /// Base pointer. Dangling (but aligned) when nothing is allocated.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Mutable base pointer. Dangling (but aligned) when nothing is allocated.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Address of slot `index`.
    ///
    /// The pointer is only an address: it does not imply that a live value
    /// exists there. `index == capacity` (one past the end) is allowed.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `index > capacity`.
    #[inline]
    pub fn slot(&self, index: usize) -> *mut T {
        debug_assert!(
            index <= self.capacity,
            "slot {index} is beyond capacity {}",
            self.capacity
        );

        self.ptr.as_ptr().wrapping_add(index)
    }

    /// Exchanges blocks with `other` in constant time. Never allocates.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }

    /// Transfers the block out, leaving `self` with zero capacity.
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::new())
    }
}

impl<T> Default for RawStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawStorage<T> {
    fn drop(&mut self) {
        if !self.is_allocated() {
            return;
        }

        // SAFETY: the same layout was validated by `Layout::array` when the
        // block was allocated, so size and alignment are known to be valid.
        let layout = unsafe {
            Layout::from_size_align_unchecked(
                mem::size_of::<T>() * self.capacity,
                mem::align_of::<T>(),
            )
        };

        // SAFETY: `ptr` was returned by `alloc` with exactly this layout.
        unsafe { dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
    }
}

impl<T> core::fmt::Debug for RawStorage<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RawStorage")
            .field("capacity", &self.capacity)
            .field("allocated", &self.is_allocated())
            .finish_non_exhaustive()
    }
}
