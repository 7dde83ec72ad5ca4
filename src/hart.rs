// SPDX-License-Identifier: EUPL-1.2 OR GPL-3.0-or-later
// Copyright Contributors to the simhooks project.

//! Per-hart hook state.
//!
//! A [`Hart`] owns everything the hooks mutate: its reservation, its accrued
//! floating-point flags and its [`SpecialFunctions`] implementation. When
//! several harts are simulated, each gets its own [`Hart`], so reservations
//! never leak between them.

use crate::{
    address::Address,
    fpu::{sqrt_double, sqrt_single, FpExceptions, FpStatus, RoundingMode},
    hooks::{DefaultHooks, ExceptionCode, SpecialFunctions},
    reservation::ReservationTracker,
    tracing,
};

/// Quiet bit of a single precision NaN.
const F32_QUIET_BIT: u32 = 1 << 22;

fn is_signalling_nan(value: f32) -> bool {
    value.is_nan() && value.to_bits() & F32_QUIET_BIT == 0
}

/// The hook state of one simulated hardware thread.
#[derive(Debug, Default)]
pub struct Hart<H: SpecialFunctions = DefaultHooks> {
    pub id: usize,
    pub reservation: ReservationTracker,
    pub fp_status: FpStatus,
    pub hooks: H,
}

impl<H: SpecialFunctions> Hart<H> {
    pub fn new(id: usize, hooks: H) -> Self {
        Self {
            id,
            reservation: ReservationTracker::new(),
            fp_status: FpStatus::new(),
            hooks,
        }
    }

    /// Retire a load-reserved on `address`.
    pub fn load_reserved(&mut self, address: Address) {
        self.hooks.acquire();
        self.reservation.reserve(address);
    }

    /// Retire a store-conditional on `address`. Returns whether the store may
    /// be performed.
    pub fn store_conditional(&mut self, address: Address) -> bool {
        let success = self.reservation.reserved(address);
        self.hooks.release();
        success
    }

    pub fn invalidate_reservation(&mut self) {
        self.reservation.not_reserve();
    }

    /// Exception entry loses the reservation before the hooks see the
    /// exception.
    pub fn take_exception(&mut self, code: ExceptionCode) {
        tracing::event!(
            target: tracing::TraceItem::Hooks.as_str(),
            tracing::Level::TRACE,
            hart = self.id,
            ?code,
            "take_exception"
        );
        self.reservation.not_reserve();
        self.hooks.signal_exception(code);
    }

    /// `FSQRT.S`
    ///
    /// `NV` is raised for negative operands and signalling NaNs. Quiet NaNs
    /// propagate silently.
    pub fn fsqrt_s(&mut self, value: f32, mode: RoundingMode) -> f32 {
        if value < 0.0 || is_signalling_nan(value) {
            self.fp_status.raise(FpExceptions::INVALID);
        }
        let result = sqrt_single(value);
        self.hooks.round_single(result, mode)
    }

    /// `FSQRT.D`
    pub fn fsqrt_d(&mut self, value: f64, mode: RoundingMode) -> f64 {
        let result = sqrt_double(value);
        self.hooks.round_double(result, mode)
    }
}
