// SPDX-License-Identifier: EUPL-1.2 OR GPL-3.0-or-later
// Copyright Contributors to the simhooks project.

//! Rounding mode selector and rounding post-processing.

use bilge::prelude::*;

use crate::tracing;

#[bitsize(3)]
#[derive(Copy, Clone, Default, FromBits, Debug, Eq, PartialEq)]
/// Rounding mode, encoded like the `frm` field of `fcsr`.
pub enum RoundingMode {
    #[default]
    /// `RNE`: round to nearest, ties to even.
    NearestEven = 0b000,
    /// `RTZ`: round towards zero.
    TowardZero = 0b001,
    /// `RDN`: round down, towards negative infinity.
    Down = 0b010,
    /// `RUP`: round up, towards positive infinity.
    Up = 0b011,
    /// `RMM`: round to nearest, ties to max magnitude.
    NearestMaxMagnitude = 0b100,
    /// `DYN`: use the dynamic rounding mode of the hart.
    Dynamic = 0b111,
    /// Encodings `0b101` and `0b110`.
    #[fallback]
    Reserved = 0b101,
}

impl RoundingMode {
    /// Decode an opaque rounding mode code. Only the low three bits are
    /// significant.
    pub fn from_code(code: u32) -> Self {
        Self::from(u3::new((code & 0b111) as u8))
    }
}

/// Rounding post-processing of a single precision result.
///
/// Returns `result` unchanged for every mode. Replace this to get
/// mode-specific rounding.
pub fn round_single(result: f32, mode: RoundingMode) -> f32 {
    tracing::event!(
        target: tracing::TraceItem::Sqrt.as_str(),
        tracing::Level::TRACE,
        result,
        ?mode,
        "round_single"
    );
    result
}

/// Rounding post-processing of a double precision result.
///
/// Returns `result` unchanged for every mode.
pub fn round_double(result: f64, mode: RoundingMode) -> f64 {
    tracing::event!(
        target: tracing::TraceItem::Sqrt.as_str(),
        tracing::Level::TRACE,
        result,
        ?mode,
        "round_double"
    );
    result
}
