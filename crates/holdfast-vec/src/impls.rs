// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Standard trait implementations for `DynamicArray`.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Deref, DerefMut};

use holdfast_raw::RawStorage;

use crate::dynamic_array::DynamicArray;
use crate::relocation::Relocation;

impl<T: Clone, R> Clone for DynamicArray<T, R> {
    /// Copy-construction: a block of exactly `len()` slots, cloned in order.
    ///
    /// If a clone panics, the clones made so far are dropped and `self` is untouched.
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(array) => array,
            Err(error) => error.raise(),
        }
    }

    /// Copy-assignment.
    ///
    /// When `source` does not fit the current block, a full copy is built
    /// first and swapped in, so a panic leaves `self` untouched. Otherwise
    /// the block is reused: the common prefix is assigned element by element,
    /// then the surplus tail is dropped or the missing suffix cloned in. A
    /// panic on that path leaves a valid, partially assigned array.
    fn clone_from(&mut self, source: &Self) {
        if source.len() > self.capacity() {
            let mut fresh = source.clone();
            self.swap(&mut fresh);
            return;
        }

        self.clone_from_in_place(source);
    }
}

impl<T, R> Default for DynamicArray<T, R> {
    fn default() -> Self {
        Self::from_parts(RawStorage::new(), 0)
    }
}

impl<T: fmt::Debug, R> fmt::Debug for DynamicArray<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, R> Deref for DynamicArray<T, R> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, R> DerefMut for DynamicArray<T, R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, R> AsRef<[T]> for DynamicArray<T, R> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, R> AsMut<[T]> for DynamicArray<T, R> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, U, R, S> PartialEq<DynamicArray<U, S>> for DynamicArray<T, R>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &DynamicArray<U, S>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, R> Eq for DynamicArray<T, R> {}

impl<T, U, R> PartialEq<[U]> for DynamicArray<T, R>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T, U, R> PartialEq<&[U]> for DynamicArray<T, R>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T, U, R, const N: usize> PartialEq<[U; N]> for DynamicArray<T, R>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Hash, R> Hash for DynamicArray<T, R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T, R: Relocation<T>> FromIterator<T> for DynamicArray<T, R> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::default();
        array.extend(iter);
        array
    }
}

impl<T, R: Relocation<T>> Extend<T> for DynamicArray<T, R> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();

        let (lower, _) = iter.size_hint();
        if let Some(wanted) = self.len().checked_add(lower) {
            self.reserve_amortized(wanted);
        }

        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T, R> IntoIterator for &'a DynamicArray<T, R> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, R> IntoIterator for &'a mut DynamicArray<T, R> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}
