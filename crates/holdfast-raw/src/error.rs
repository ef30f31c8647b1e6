// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for holdfast-raw.

use core::alloc::Layout;

use thiserror::Error;

/// Errors that can occur while acquiring storage.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum StorageError {
    /// The requested element count does not fit in `isize::MAX` bytes.
    #[error("Capacity overflow: requested block exceeds isize::MAX bytes")]
    CapacityOverflow,

    /// The global allocator returned null for the given layout.
    #[error("Allocation failed for layout {layout:?}")]
    AllocFailed {
        /// Layout that could not be satisfied.
        layout: Layout,
    },
}

impl StorageError {
    /// Escalates the error the way infallible collection methods do.
    ///
    /// `CapacityOverflow` panics with `"capacity overflow"`, and `AllocFailed`
    /// is handed to [`alloc::alloc::handle_alloc_error`].
    #[cold]
    #[inline(never)]
    pub fn raise(self) -> ! {
        match self {
            Self::CapacityOverflow => panic!("capacity overflow"),
            Self::AllocFailed { layout } => alloc::alloc::handle_alloc_error(layout),
        }
    }
}
