// SPDX-License-Identifier: EUPL-1.2 OR GPL-3.0-or-later
// Copyright Contributors to the simhooks project.

//! Floating-point emulation helpers.

mod flags;
mod rounding;
mod sqrt;

pub use flags::{FpExceptions, FpStatus};
pub use rounding::{round_double, round_single, RoundingMode};
pub use sqrt::{bisect_sqrt, sqrt_double, sqrt_single, SQRT_SINGLE_ITERATIONS};
