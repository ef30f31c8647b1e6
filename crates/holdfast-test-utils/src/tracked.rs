// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt;

use crate::ledger::LifeLedger;

/// An `i32` payload that reports its lifetime to a [`LifeLedger`].
///
/// Equality and `Debug` look at the payload only.
pub struct Tracked {
    value: i32,
    ledger: LifeLedger,
}

impl Tracked {
    pub(crate) fn new(value: i32, ledger: LifeLedger) -> Self {
        Self { value, ledger }
    }

    /// The payload.
    #[inline]
    pub fn value(&self) -> i32 {
        self.value
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.ledger.record_clone();

        Self {
            value: self.value,
            ledger: self.ledger.clone(),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.ledger.record_drop();
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Tracked {}

impl PartialEq<i32> for Tracked {
    fn eq(&self, other: &i32) -> bool {
        self.value == *other
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tracked").field(&self.value).finish()
    }
}
