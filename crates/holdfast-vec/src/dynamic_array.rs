// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::marker::PhantomData;
use core::mem;
use core::ptr;
use core::slice;

use holdfast_raw::{RawStorage, StorageError};

use crate::behaviour::ArrayBehaviour;
use crate::guard::InitGuard;
use crate::relocation::{Cloning, Moving, Relocation};

/// A growable contiguous array built directly on [`RawStorage`].
///
/// Slots `[0, len)` hold live values and slots `[len, capacity)` are
/// uninitialized. Every operation restores `len <= capacity` before returning,
/// including when a user-supplied constructor, clone or drop panics.
///
/// Implicit growth (push or insert at full capacity) doubles the capacity,
/// starting from 1. How existing elements reach the new block is decided by
/// the relocation policy `R`; see [`Moving`] and [`Cloning`].
///
/// # Example
///
/// ```rust
/// use holdfast_vec::DynamicArray;
///
/// let mut array = DynamicArray::new();
/// array.push_back(1);
/// array.push_back(2);
///
/// let copy = array.clone();
/// array[0] = 10;
///
/// assert_eq!(copy, [1, 2]);
/// assert_eq!(array, [10, 2]);
/// ```
pub struct DynamicArray<T, R = Moving> {
    storage: RawStorage<T>,
    len: usize,
    #[cfg(any(test, feature = "test_utils"))]
    behaviour: ArrayBehaviour,
    _relocation: PhantomData<fn() -> R>,
}

impl<T> DynamicArray<T> {
    /// Creates an empty array with zero capacity. Does not allocate.
    pub fn new() -> Self {
        Self::from_parts(RawStorage::new(), 0)
    }

    /// Creates an empty array with exactly `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_policy(capacity, Moving)
    }

    /// Creates an array of `size` default-constructed elements.
    ///
    /// Capacity is exactly `size`.
    pub fn with_len(size: usize) -> Self
    where
        T: Default,
    {
        Self::with_len_with(size, T::default)
    }

    /// Creates an array of `size` elements built by `f`.
    ///
    /// If `f` panics, the elements built so far are dropped and the block is freed.
    pub fn with_len_with<F>(size: usize, f: F) -> Self
    where
        F: FnMut() -> T,
    {
        Self::with_len_with_and_policy(size, f, Moving)
    }
}

impl<T, R> DynamicArray<T, R> {
    pub(crate) fn from_parts(storage: RawStorage<T>, len: usize) -> Self {
        debug_assert!(len <= storage.capacity());

        Self {
            storage,
            len,
            #[cfg(any(test, feature = "test_utils"))]
            behaviour: ArrayBehaviour::None,
            _relocation: PhantomData,
        }
    }

    /// Creates an empty array using the relocation policy `R`.
    ///
    /// ```rust
    /// use holdfast_vec::{Cloning, DynamicArray};
    ///
    /// let array: DynamicArray<String, Cloning> = DynamicArray::with_policy(Cloning);
    /// assert_eq!(array.capacity(), 0);
    /// ```
    pub fn with_policy(_policy: R) -> Self {
        Self::from_parts(RawStorage::new(), 0)
    }

    /// Creates an empty array with exactly `capacity` slots using the relocation policy `R`.
    pub fn with_capacity_and_policy(capacity: usize, _policy: R) -> Self {
        Self::from_parts(RawStorage::with_capacity(capacity), 0)
    }

    /// Changes the injected failure behaviour. Sticky until changed again.
    #[cfg(any(test, feature = "test_utils"))]
    pub fn change_behaviour(&mut self, behaviour: ArrayBehaviour) {
        self.behaviour = behaviour;
    }

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the array holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the current block can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Returns a slice over the live elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [0, len) are live, and the pointer is aligned and non-null
        // even when nothing is allocated.
        unsafe { slice::from_raw_parts(self.storage.as_ptr(), self.len) }
    }

    /// Returns a mutable slice over the live elements.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, and `&mut self` guarantees uniqueness.
        unsafe { slice::from_raw_parts_mut(self.storage.as_mut_ptr(), self.len) }
    }

    /// Pointer to the first element. Dangling when nothing is allocated.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.storage.as_ptr()
    }

    /// Mutable pointer to the first element. Dangling when nothing is allocated.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.storage.as_mut_ptr()
    }

    /// Moves the last element out, or returns `None` if the array is empty.
    ///
    /// Popping an empty array is not an error.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;

        // SAFETY: slot `len` was live and is now outside the live range, so
        // ownership moves to the caller exactly once.
        Some(unsafe { ptr::read(self.storage.slot(self.len)) })
    }

    /// Drops the elements beyond `new_len`. Does nothing if `new_len >= len`.
    ///
    /// Capacity is unchanged.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }

        let tail = self.len - new_len;
        // Shrink first: a panicking drop must not leave dropped slots counted as live.
        self.len = new_len;

        // SAFETY: [new_len, new_len + tail) were live and are no longer counted.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.storage.slot(new_len),
                tail,
            ));
        }
    }

    /// Drops every element. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Removes the element at `index`, shifting the tail one slot left.
    ///
    /// Returns `index`, which now holds the following element, or equals
    /// `len()` if the last element was erased.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove(index));
        index
    }

    /// Removes and returns the element at `index`, shifting the tail one slot left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.len,
            "erase index {index} out of range for length {}",
            self.len
        );

        let tail = self.len - index - 1;
        let slot = self.storage.slot(index);

        // SAFETY: `slot` is live; after reading it out the tail is shifted
        // over it and the last slot leaves the live range.
        unsafe {
            let value = ptr::read(slot);
            ptr::copy(slot.add(1), slot, tail);
            self.len -= 1;
            value
        }
    }

    /// Exchanges contents with `other` in constant time. Never panics.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        self.storage.swap(&mut other.storage);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Takes the contents out, leaving `self` empty with zero capacity.
    ///
    /// No element is touched. `self` stays fully usable.
    pub fn take(&mut self) -> Self {
        let storage = self.storage.take();
        let len = mem::replace(&mut self.len, 0);

        Self::from_parts(storage, len)
    }

    /// Move-assignment by exchange: `self` gets `rhs`'s contents and `rhs` gets
    /// the previous ones, which are dropped whenever `rhs` is.
    pub fn assign_take(&mut self, rhs: &mut Self) {
        self.swap(rhs);
    }

    /// Shifts `[index, len)` one slot right and writes `value` at `index`.
    ///
    /// Callers guarantee `index <= len < capacity`.
    fn shift_insert(&mut self, index: usize, value: T) {
        debug_assert!(index <= self.len && self.len < self.capacity());

        let slot = self.storage.slot(index);

        // SAFETY: slot `len` is uninitialized and within capacity, so the
        // overlapping copy stays in bounds; the vacated slot is then written.
        unsafe {
            ptr::copy(slot, slot.add(1), self.len - index);
            slot.write(value);
        }

        self.len += 1;
    }
}

impl<T, R> DynamicArray<T, R>
where
    R: Relocation<T>,
{
    /// Capacity for the next implicit growth: `max(1, 2 * capacity)`.
    fn grown_capacity(&self) -> Result<usize, StorageError> {
        match self.capacity() {
            0 => Ok(1),
            capacity => capacity
                .checked_mul(2)
                .ok_or(StorageError::CapacityOverflow),
        }
    }

    fn allocate(
        &self,
        capacity: usize,
        #[allow(unused_variables)] site: ArrayBehaviour,
    ) -> Result<RawStorage<T>, StorageError> {
        #[cfg(any(test, feature = "test_utils"))]
        if self.behaviour == site {
            let layout = RawStorage::<T>::layout_for(capacity)?;
            log::debug!("injected allocation failure at {site:?} for {capacity} slots");

            return Err(StorageError::AllocFailed { layout });
        }

        RawStorage::try_with_capacity(capacity)
    }

    /// Places `new_storage` in the array with `new_len` live elements and
    /// retires the old block.
    ///
    /// When the policy left the originals alive they are dropped here, after
    /// `self` already describes the new block, so a panicking drop cannot
    /// corrupt the array.
    fn adopt(&mut self, mut new_storage: RawStorage<T>, new_len: usize) {
        let old_len = self.len;

        self.storage.swap(&mut new_storage);
        self.len = new_len;

        if !R::CONSUMES_SOURCE {
            // SAFETY: the old block still holds `old_len` live originals that
            // no one else owns.
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                    new_storage.as_mut_ptr(),
                    old_len,
                ));
            }
        }
    }

    /// Allocates the next block if the array is full.
    fn prepare_insert(&self) -> Result<Option<RawStorage<T>>, StorageError> {
        if self.len < self.capacity() {
            return Ok(None);
        }

        let capacity = self.grown_capacity()?;
        self.allocate(capacity, ArrayBehaviour::FailAtGrow).map(Some)
    }

    /// Fills `new_storage` with the current elements plus one built by `f` at
    /// `index`, then adopts it.
    ///
    /// The new element is constructed first, into its final slot. If `f` or a
    /// relocation panics, everything built in the new block is dropped, the
    /// block is freed, and `self` is untouched.
    fn grow_with<F>(&mut self, mut new_storage: RawStorage<T>, index: usize, f: F)
    where
        F: FnOnce() -> T,
    {
        debug_assert!(index <= self.len && self.len < new_storage.capacity());

        log::trace!(
            "growing {} elements: capacity {} -> {}",
            self.len,
            self.capacity(),
            new_storage.capacity()
        );

        let src = self.storage.as_ptr();
        let dst = new_storage.as_mut_ptr();
        let len = self.len;

        // SAFETY: `dst` has room for `len + 1` values and is disjoint from
        // `src`, which holds `len` live values. The guards cover exactly the
        // slots written so far: first the new element, then the prefix plus
        // the new element as one contiguous run.
        unsafe {
            dst.add(index).write(f());

            let element = InitGuard::covering(dst.add(index), 1);
            R::transfer(src, dst, index);
            element.disarm();

            let head = InitGuard::covering(dst, index + 1);
            R::transfer(src.add(index), dst.add(index + 1), len - index);
            head.disarm();
        }

        self.adopt(new_storage, len + 1);
    }

    /// Creates an array of `size` default-constructed elements using the
    /// relocation policy `R`. Capacity is exactly `size`.
    ///
    /// ```rust
    /// use holdfast_vec::{Cloning, DynamicArray};
    ///
    /// let array: DynamicArray<u8, Cloning> = DynamicArray::with_len_and_policy(3, Cloning);
    /// assert_eq!(array, [0, 0, 0]);
    /// ```
    pub fn with_len_and_policy(size: usize, policy: R) -> Self
    where
        T: Default,
    {
        Self::with_len_with_and_policy(size, T::default, policy)
    }

    /// Creates an array of `size` elements built by `f` using the relocation policy `R`.
    ///
    /// If `f` panics, the elements built so far are dropped and the block is freed.
    pub fn with_len_with_and_policy<F>(size: usize, f: F, policy: R) -> Self
    where
        F: FnMut() -> T,
    {
        let mut array = Self::with_capacity_and_policy(size, policy);
        array.resize_with(size, f);
        array
    }

    /// Reserves room for `wanted` elements, at least doubling when it grows.
    pub(crate) fn reserve_amortized(&mut self, wanted: usize) {
        if wanted <= self.capacity() {
            return;
        }

        let new_capacity = match self.grown_capacity() {
            Ok(grown) => grown.max(wanted),
            Err(_) => wanted,
        };

        self.reserve(new_capacity);
    }

    /// Reserves exactly `new_capacity` slots if the array holds fewer.
    ///
    /// Elements are transferred with the policy `R`. Under [`Cloning`], a
    /// panicking clone leaves `len()`, `capacity()` and contents unchanged.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; allocation failure goes to `handle_alloc_error`.
    pub fn reserve(&mut self, new_capacity: usize) {
        if let Err(error) = self.try_reserve(new_capacity) {
            error.raise();
        }
    }

    /// Fallible version of [`reserve`](Self::reserve).
    ///
    /// # Errors
    ///
    /// Returns the [`StorageError`] from the allocation. The array is unchanged.
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<(), StorageError> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }

        let mut new_storage = self.allocate(new_capacity, ArrayBehaviour::FailAtReserve)?;

        log::trace!(
            "reserving for {} elements: capacity {} -> {new_capacity}",
            self.len,
            self.capacity()
        );

        // SAFETY: `new_storage` is a distinct block with room for `len` values.
        unsafe { R::transfer(self.storage.as_ptr(), new_storage.as_mut_ptr(), self.len) };

        let len = self.len;
        self.adopt(new_storage, len);

        Ok(())
    }

    /// Resizes to `new_size`, default-constructing new elements.
    ///
    /// Growing reserves exactly `new_size` first. If a constructor panics, the
    /// elements built so far stay in the array.
    pub fn resize(&mut self, new_size: usize)
    where
        T: Default,
    {
        self.resize_with(new_size, T::default);
    }

    /// Resizes to `new_size`, building new elements with `f`.
    pub fn resize_with<F>(&mut self, new_size: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        if new_size <= self.len {
            self.truncate(new_size);
            return;
        }

        self.reserve(new_size);

        while self.len < new_size {
            // SAFETY: len < new_size <= capacity, so the slot is uninitialized.
            unsafe { self.storage.slot(self.len).write(f()) };
            self.len += 1;
        }
    }

    /// Appends `value` and returns a reference to it.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; allocation failure goes to `handle_alloc_error`.
    pub fn push_back(&mut self, value: T) -> &mut T {
        self.emplace_back_with(move || value)
    }

    /// Fallible version of [`push_back`](Self::push_back).
    ///
    /// # Errors
    ///
    /// Returns the value together with the [`StorageError`] if growth failed.
    /// The array is unchanged.
    pub fn try_push_back(&mut self, value: T) -> Result<&mut T, (T, StorageError)> {
        match self.prepare_insert() {
            Ok(new_storage) => Ok(self.emplace_back_into(new_storage, move || value)),
            Err(error) => Err((value, error)),
        }
    }

    /// Appends the value built by `f` and returns a reference to it.
    ///
    /// At full capacity the value is built directly in the new block before
    /// any existing element is relocated: if `f` panics, nothing has changed.
    pub fn emplace_back_with<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        match self.try_emplace_back_with(f) {
            Ok(value) => value,
            Err(error) => error.raise(),
        }
    }

    /// Fallible version of [`emplace_back_with`](Self::emplace_back_with).
    ///
    /// # Errors
    ///
    /// Returns the [`StorageError`] if growth failed; `f` is not called.
    pub fn try_emplace_back_with<F>(&mut self, f: F) -> Result<&mut T, StorageError>
    where
        F: FnOnce() -> T,
    {
        let new_storage = self.prepare_insert()?;
        Ok(self.emplace_back_into(new_storage, f))
    }

    fn emplace_back_into<F>(&mut self, new_storage: Option<RawStorage<T>>, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        let index = self.len;

        match new_storage {
            Some(new_storage) => self.grow_with(new_storage, index, f),
            None => {
                // SAFETY: len < capacity, so slot `len` is uninitialized.
                unsafe { self.storage.slot(index).write(f()) };
                self.len += 1;
            }
        }

        &mut self.as_mut_slice()[index]
    }

    /// Inserts `value` at `index`, shifting later elements right.
    ///
    /// Returns `index`. See [`emplace_with`](Self::emplace_with) for the
    /// position contract.
    pub fn insert(&mut self, index: usize, value: T) -> usize {
        self.emplace_with(index, move || value)
    }

    /// Inserts the value built by `f` at `index`, shifting later elements right.
    ///
    /// `index` must name a live element; appending is the job of
    /// [`emplace_back_with`](Self::emplace_back_with). An empty array accepts
    /// index 0.
    ///
    /// The value is built before anything moves, so if `f` panics the array
    /// is unchanged. The shifts themselves cannot fail.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`. Debug builds also reject `index == len()`
    /// on a non-empty array.
    pub fn emplace_with<F>(&mut self, index: usize, f: F) -> usize
    where
        F: FnOnce() -> T,
    {
        match self.try_emplace_with(index, f) {
            Ok(index) => index,
            Err(error) => error.raise(),
        }
    }

    /// Fallible version of [`emplace_with`](Self::emplace_with).
    ///
    /// # Errors
    ///
    /// Returns the [`StorageError`] if growth failed; `f` is not called.
    pub fn try_emplace_with<F>(&mut self, index: usize, f: F) -> Result<usize, StorageError>
    where
        F: FnOnce() -> T,
    {
        assert!(
            index <= self.len,
            "insertion index {index} out of range for length {}",
            self.len
        );
        debug_assert!(
            index < self.len || self.len == 0,
            "insertion at the end must use emplace_back_with / push_back"
        );

        match self.prepare_insert()? {
            Some(new_storage) => self.grow_with(new_storage, index, f),
            None => {
                let value = f();
                self.shift_insert(index, value);
            }
        }

        Ok(index)
    }
}

impl<T: Clone, R> DynamicArray<T, R> {
    /// Clones into a block of exactly `len()` slots.
    ///
    /// # Errors
    ///
    /// Returns the [`StorageError`] if the allocation failed.
    pub fn try_clone(&self) -> Result<Self, StorageError> {
        let mut storage = RawStorage::try_with_capacity(self.len)?;

        // SAFETY: the fresh block has room for `len` values and is disjoint
        // from ours. `Cloning` never consumes the source.
        unsafe {
            <Cloning as Relocation<T>>::transfer(self.as_ptr(), storage.as_mut_ptr(), self.len);
        }

        Ok(Self::from_parts(storage, self.len))
    }

    /// Copy-assignment into the existing block.
    ///
    /// Callers guarantee `source.len() <= capacity()`.
    pub(crate) fn clone_from_in_place(&mut self, source: &Self) {
        debug_assert!(source.len <= self.capacity());

        let common = self.len.min(source.len);
        self.as_mut_slice()[..common].clone_from_slice(&source.as_slice()[..common]);

        if self.len > source.len {
            self.truncate(source.len);
            return;
        }

        for value in &source.as_slice()[common..] {
            // SAFETY: len < source.len <= capacity, so the slot is uninitialized.
            unsafe { self.storage.slot(self.len).write(value.clone()) };
            self.len += 1;
        }
    }
}

impl<T, R> Drop for DynamicArray<T, R> {
    fn drop(&mut self) {
        // SAFETY: [0, len) are live and dropped exactly once; the storage
        // field frees the block afterwards, also if a drop panics.
        unsafe { ptr::drop_in_place(self.as_mut_slice()) };
    }
}
