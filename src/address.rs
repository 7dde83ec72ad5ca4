// SPDX-License-Identifier: EUPL-1.2 OR GPL-3.0-or-later
// Copyright Contributors to the simhooks project.

//! Guest memory addresses as seen by the hooks.

use serde_derive::{Deserialize, Serialize};

/// A guest memory address, either physical or virtual depending on the caller.
#[derive(Copy, Clone, Default, Hash, Ord, Eq, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Address(pub u64);

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Address> for u64 {
    fn from(value: Address) -> Self {
        value.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "0x{:x}", self.0)
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "0x{:x}", self.0)
    }
}

#[test]
fn test_address_display() {
    assert_eq!(Address(0x8000_0000).to_string(), "0x80000000");
    assert_eq!(format!("{:?}", Address(0)), "0x0");
    assert_eq!(u64::from(Address::from(42)), 42);
}
