// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Exactly-sized, uninitialized storage blocks.
//!
//! `RawStorage<T>` owns a block of memory large enough for exactly `capacity`
//! values of `T`. It never constructs or drops elements: the owner decides which
//! slots are live and must drop them before the storage goes away.
//!
//! # Core Guarantees
//!
//! - **Exact sizing**: the block holds exactly the requested capacity, never more
//! - **Single ownership**: no `Clone`; ownership moves with the value, `take()` or `swap()`
//! - **No element lifetime**: dropping the storage frees memory and nothing else
//! - **Fallible allocation**: `try_with_capacity()` reports [`StorageError`] instead of aborting
//!
//! # Example
//!
//! ```rust
//! use holdfast_raw::{RawStorage, StorageError};
//!
//! fn example() -> Result<(), StorageError> {
//!     let storage = RawStorage::<u32>::try_with_capacity(4)?;
//!     assert_eq!(storage.capacity(), 4);
//!
//!     unsafe {
//!         // SAFETY: slot 0 is within capacity and uninitialized.
//!         storage.slot(0).write(7);
//!         assert_eq!(*storage.slot(0), 7);
//!     }
//!
//!     // u32 has no drop glue, so the storage can simply be released.
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod error;
mod raw_storage;

#[cfg(test)]
mod tests;

pub use error::StorageError;
pub use raw_storage::RawStorage;
