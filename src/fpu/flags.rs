// SPDX-License-Identifier: EUPL-1.2 OR GPL-3.0-or-later
// Copyright Contributors to the simhooks project.

//! Accrued floating-point exception flags.

use crate::tracing;

bitflags::bitflags! {
    /// Floating-point exception flags, in `fflags` bit order.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct FpExceptions: u32 {
        /// `NX`
        const INEXACT = 0b00001;
        /// `UF`
        const UNDERFLOW = 0b00010;
        /// `OF`
        const OVERFLOW = 0b00100;
        /// `DZ`
        const DIVBYZERO = 0b01000;
        /// `NV`
        const INVALID = 0b10000;
        const ALL = Self::INEXACT.bits()
            | Self::UNDERFLOW.bits()
            | Self::OVERFLOW.bits()
            | Self::DIVBYZERO.bits()
            | Self::INVALID.bits();
    }
}

/// Accrued exception flags of one hart.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FpStatus {
    accrued: FpExceptions,
}

impl FpStatus {
    pub const fn new() -> Self {
        Self {
            accrued: FpExceptions::empty(),
        }
    }

    pub fn accrued(&self) -> FpExceptions {
        self.accrued
    }

    /// Clear a set of exceptions.
    pub fn clear(&mut self, flags: FpExceptions) {
        self.accrued.remove(flags);
        tracing::event!(
            target: tracing::TraceItem::FpFlags.as_str(),
            tracing::Level::TRACE,
            ?flags,
            accrued = ?self.accrued,
            "clear"
        );
    }

    /// Set a set of exceptions.
    pub fn raise(&mut self, flags: FpExceptions) {
        self.accrued.insert(flags);
        tracing::event!(
            target: tracing::TraceItem::FpFlags.as_str(),
            tracing::Level::TRACE,
            ?flags,
            accrued = ?self.accrued,
            "raise"
        );
    }

    /// Returns which of `flags` are currently set.
    pub fn test(&self, flags: FpExceptions) -> FpExceptions {
        self.accrued & flags
    }
}
