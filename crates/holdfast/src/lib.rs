// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! <p align="center"><em>Growable arrays with explicit storage control and strict unwind safety.</em></p>
//!
//! ---
//!
//! Holdfast splits a dynamic array into two layers:
//!
//! - [`raw::RawStorage`]: an uninitialized block of `capacity` slots. It
//!   allocates and frees, and never constructs or drops an element.
//! - [`DynamicArray`]: the live prefix `[0, len)` of such a block, with
//!   amortized doubling growth and a relocation policy chosen at compile time.
//!
//! # Features
//!
//! - **No half-done operations**: push, insert, reserve and clone either
//!   complete or leave the array exactly as it was
//! - **Construct before relocate**: the new element is built in its final
//!   slot before any existing element moves
//! - **Selectable relocation**: [`Moving`] relocates bitwise, [`Cloning`]
//!   clones into the new block and keeps the originals until the last clone succeeded
//! - **Fallible variants**: every allocating operation has a `try_*` form
//!   returning [`StorageError`]
//! - **`no_std` compatible**: only `alloc` is required
//!
//! # Installation
//!
//! ```toml
//! [dependencies]
//! holdfast = "0.1.0-rc.1"
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use holdfast::DynamicArray;
//!
//! let mut array = DynamicArray::new();
//! for i in 1..=5 {
//!     array.push_back(i);
//! }
//! assert_eq!(array.capacity(), 8);
//!
//! let next = array.erase(2);
//! assert_eq!(array[next], 4);
//!
//! array.insert(0, 9);
//! assert_eq!(array, [9, 1, 2, 4, 5]);
//!
//! assert_eq!(array.pop_back(), Some(5));
//! ```
//!
//! # Fallible Growth
//!
//! ```rust
//! use holdfast::{DynamicArray, StorageError};
//!
//! let mut array: DynamicArray<u64> = DynamicArray::new();
//!
//! assert_eq!(array.try_reserve(usize::MAX), Err(StorageError::CapacityOverflow));
//! assert!(array.try_push_back(1).is_ok());
//! ```
//!
//! # Test Utilities
//!
//! The `test-utils` feature exposes [`support::test_utils`] for injecting
//! allocation failures into arrays under test.
//!
//! ## License
//!
//! GPL-3.0-only

#![cfg_attr(not(test), no_std)]

pub mod support;

pub use holdfast_raw as raw;
pub use holdfast_vec as vec;

pub use holdfast_raw::StorageError;
pub use holdfast_vec::{Cloning, DynamicArray, Moving, Relocation};
