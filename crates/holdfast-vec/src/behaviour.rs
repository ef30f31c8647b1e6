// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

/// Test behaviour for injecting allocation failures into `DynamicArray`.
///
/// This is only exported with the `test_utils` feature and lets users exercise
/// the error paths of the `try_*` methods without exhausting real memory.
///
/// The behaviour is sticky - once set, it remains active until changed.
///
/// # Example
///
/// ```rust
/// // test_utils feature required in dev-dependencies
/// use holdfast_vec::{ArrayBehaviour, DynamicArray, StorageError};
///
/// #[cfg(test)]
/// mod tests {
///     use super::*;
///
///     #[test]
///     fn test_handles_reserve_failure() {
///         let mut array = DynamicArray::<u8>::new();
///
///         // Inject failure
///         array.change_behaviour(ArrayBehaviour::FailAtReserve);
///         assert!(matches!(
///             array.try_reserve(10),
///             Err(StorageError::AllocFailed { .. })
///         ));
///
///         // Reset to normal behaviour
///         array.change_behaviour(ArrayBehaviour::None);
///         assert!(array.try_reserve(10).is_ok());
///     }
/// }
/// ```
#[cfg_attr(not(any(test, feature = "test_utils")), allow(dead_code))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArrayBehaviour {
    /// Normal behaviour - no injected failures.
    #[default]
    None,
    /// Explicit `reserve()` / `try_reserve()` fail with `AllocFailed`.
    FailAtReserve,
    /// Implicit growth from push or insert at full capacity fails with `AllocFailed`.
    FailAtGrow,
}
