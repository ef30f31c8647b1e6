// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Growable contiguous array with explicit control over storage and element lifetime.
//!
//! `DynamicArray<T, R>` owns one [`RawStorage<T>`](holdfast_raw::RawStorage) and a
//! count of live elements. Slots `[0, len)` are always initialized, slots
//! `[len, capacity)` never are, and nothing in the public API can observe the latter.
//!
//! # Core Guarantees
//!
//! - **Amortized growth**: implicit growth doubles capacity (1 → 2 → 4 → 8 ...)
//! - **Construct before relocate**: a value built during growth goes straight into
//!   its final slot of the new block; if building it panics, nothing was touched
//! - **Unwind safety**: no leaks, no double drops, no `len` beyond the initialized
//!   prefix, whatever panics inside `Default`, `Clone`, a constructor closure or `Drop`
//! - **Policy-selected relocation**: [`Moving`] relocates bitwise and can never fail;
//!   [`Cloning`] duplicates into the new block and discards the originals only after
//!   every clone succeeded
//!
//! # Example: Basic Usage
//!
//! ```rust
//! use holdfast_vec::DynamicArray;
//!
//! let mut array = DynamicArray::new();
//! for i in 1..=5 {
//!     array.push_back(i);
//! }
//! assert_eq!(array.capacity(), 8);
//!
//! array.erase(2);
//! assert_eq!(array, [1, 2, 4, 5]);
//!
//! array.insert(0, 9);
//! assert_eq!(array, [9, 1, 2, 4, 5]);
//! ```
//!
//! # Example: Clone-Then-Discard Relocation
//!
//! ```rust
//! use holdfast_vec::{Cloning, DynamicArray};
//!
//! let mut array = DynamicArray::with_policy(Cloning);
//! array.push_back(String::from("a"));
//! array.push_back(String::from("b"));
//!
//! // If any clone panicked here, `array` would be left exactly as it was.
//! array.reserve(64);
//! assert_eq!(array.capacity(), 64);
//! assert_eq!(array[1], "b");
//! ```
//!
//! # Test Utilities
//!
//! Enable the `test_utils` feature to inject allocation failures:
//!
//! ```toml
//! [dev-dependencies]
//! holdfast-vec = { version = "*", features = ["test_utils"] }
//! ```
//!
//! Then use [`ArrayBehaviour`] to test error scenarios:
//!
//! ```rust
//! // test_utils feature required in dev-dependencies
//! #[cfg(test)]
//! mod tests {
//!     use holdfast_vec::{ArrayBehaviour, DynamicArray};
//!
//!     #[test]
//!     fn test_handles_grow_failure() {
//!         let mut array = DynamicArray::new();
//!         array.change_behaviour(ArrayBehaviour::FailAtGrow);
//!
//!         assert!(array.try_push_back(1u8).is_err());
//!     }
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

mod behaviour;
mod dynamic_array;
mod guard;
mod impls;
mod relocation;

#[cfg(test)]
mod tests;

pub use dynamic_array::DynamicArray;
pub use holdfast_raw::StorageError;
pub use relocation::{Cloning, Moving, Relocation};

#[cfg(any(test, feature = "test_utils"))]
pub use behaviour::ArrayBehaviour;
