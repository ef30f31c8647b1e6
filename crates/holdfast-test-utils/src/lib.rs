// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities for Holdfast crates.
//!
//! [`LifeLedger`] counts constructions, clones and drops of [`Tracked`] values
//! through a shared handle, so a test can assert that a container neither
//! leaked nor double-dropped anything, even after a panic unwound through it.
//!
//! ```rust
//! use holdfast_test_utils::LifeLedger;
//!
//! let ledger = LifeLedger::new();
//! let a = ledger.track(1);
//! let b = a.clone();
//!
//! assert_eq!(ledger.live(), 2);
//! drop(a);
//! drop(b);
//! ledger.assert_balanced();
//! ```
//!
//! ## License
//!
//! GPL-3.0-only

mod ledger;
mod tracked;

#[cfg(test)]
mod tests;

pub use ledger::LifeLedger;
pub use tracked::Tracked;
