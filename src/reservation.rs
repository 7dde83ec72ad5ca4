// SPDX-License-Identifier: EUPL-1.2 OR GPL-3.0-or-later
// Copyright Contributors to the simhooks project.

//! Load-reserved/store-conditional emulation.
//!
//! A [`ReservationTracker`] holds at most one reservation. `LR` records it,
//! `SC` tests and consumes it. Only a matching `SC` consumes the reservation:
//! a conditional store to another address fails and leaves it in place.

use crate::{address::Address, tracing};

/// Reservation state of a single hart.
#[repr(C)]
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct ReservationTracker {
    reserved_address: Option<Address>,
}

impl ReservationTracker {
    pub const fn new() -> Self {
        Self {
            reserved_address: None,
        }
    }

    /// The reservation granule is a single word, so the address is used as is.
    fn reservation_granule(address: Address) -> Address {
        address
    }

    /// Currently held reservation, if any.
    pub fn reservation(&self) -> Option<Address> {
        self.reserved_address
    }

    pub fn is_active(&self) -> bool {
        self.reserved_address.is_some()
    }

    /// Record a reservation on `address`, replacing any previous one.
    pub fn reserve(&mut self, address: Address) {
        let granule = Self::reservation_granule(address);
        let previous = self.reserved_address.replace(granule);
        tracing::event!(
            target: tracing::TraceItem::Reservation.as_str(),
            tracing::Level::TRACE,
            ?previous,
            reserved = ?granule,
            "reserve"
        );
    }

    /// Drop any held reservation.
    pub fn not_reserve(&mut self) {
        let previous = self.reserved_address.take();
        tracing::event!(
            target: tracing::TraceItem::Reservation.as_str(),
            tracing::Level::TRACE,
            ?previous,
            "not_reserve"
        );
    }

    /// Test whether `address` is reserved.
    ///
    /// On a match the reservation is consumed and `true` is returned. A
    /// mismatch, or no reservation at all, returns `false` and keeps the
    /// current state.
    pub fn reserved(&mut self, address: Address) -> bool {
        let granule = Self::reservation_granule(address);
        let matched = self.reserved_address == Some(granule);
        if matched {
            self.reserved_address = None;
        }
        tracing::event!(
            target: tracing::TraceItem::Reservation.as_str(),
            tracing::Level::TRACE,
            queried = ?granule,
            held = ?self.reserved_address,
            matched,
            "reserved"
        );
        matched
    }
}

pub extern "C" fn reserve(tracker: &mut ReservationTracker, address: Address) {
    tracker.reserve(address);
}

pub extern "C" fn not_reserve(tracker: &mut ReservationTracker) {
    tracker.not_reserve();
}

/// Returns `1` on success and `0` on failure, like the store-conditional
/// result register.
pub extern "C" fn reserved(tracker: &mut ReservationTracker, address: Address) -> u32 {
    u32::from(tracker.reserved(address))
}
