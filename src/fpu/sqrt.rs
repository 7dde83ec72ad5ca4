// SPDX-License-Identifier: EUPL-1.2 OR GPL-3.0-or-later
// Copyright Contributors to the simhooks project.

//! Square root emulation.
//!
//! The host square root is not used for single precision. Instead the root is
//! searched for with a bisection over `[0, value]` that runs for a fixed
//! number of iterations, so that both the worst-case cost and the precision
//! reached are the same on every host.
//!
//! The search interval is `[0, value]`, so for operands in `(0, 1)`, whose
//! root is larger than the operand, the result converges towards `value`
//! instead of its root.

use num_traits::Float;

use crate::tracing;

/// Iteration budget of [`sqrt_single`].
pub const SQRT_SINGLE_ITERATIONS: usize = 200;

/// Bisection search for the square root of `value`.
///
/// Returns the last midpoint together with the number of iterations that were
/// run, which is never more than `max_iterations`. The search stops early if
/// a midpoint squares exactly to `value`.
pub fn bisect_sqrt<F: Float>(value: F, max_iterations: usize) -> (F, usize) {
    let two = F::one() + F::one();
    let mut lo = F::zero();
    let mut hi = value;
    let mut mid = lo;
    for iteration in 1..=max_iterations {
        mid = (lo + hi) / two;
        let square = mid * mid;
        if square == value {
            return (mid, iteration);
        }
        if square > value {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    (mid, max_iterations)
}

/// Single precision square root by bisection.
///
/// Negative and NaN operands return a quiet NaN without searching; zero
/// returns the operand, keeping its sign.
pub fn sqrt_single(value: f32) -> f32 {
    if value.is_nan() || value < 0.0 {
        tracing::event!(
            target: tracing::TraceItem::Sqrt.as_str(),
            tracing::Level::TRACE,
            value,
            "sqrt_single: invalid operand"
        );
        return f32::NAN;
    }
    if value == 0.0 {
        return value;
    }
    let (result, iterations) = bisect_sqrt(value, SQRT_SINGLE_ITERATIONS);
    tracing::event!(
        target: tracing::TraceItem::Sqrt.as_str(),
        tracing::Level::TRACE,
        value,
        result,
        iterations,
        "sqrt_single"
    );
    result
}

/// Double precision square root.
///
/// This is a pass-through: `value` is returned unchanged.
pub fn sqrt_double(value: f64) -> f64 {
    tracing::event!(
        target: tracing::TraceItem::Sqrt.as_str(),
        tracing::Level::TRACE,
        value,
        "sqrt_double"
    );
    value
}
