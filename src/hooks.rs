// SPDX-License-Identifier: EUPL-1.2 OR GPL-3.0-or-later
// Copyright Contributors to the simhooks project.

//! # Special function hooks
//!
//! Events the generated execute loop does not model itself are forwarded to a
//! [`SpecialFunctions`] implementation. Every method has a default body that
//! does nothing (or returns zero, or the unmodified result), so a simulator
//! only overrides the events it cares about. [`DefaultHooks`] keeps all
//! defaults.

use bilge::prelude::*;

use crate::{
    address::Address,
    fpu::{self, RoundingMode},
    tracing,
};

#[bitsize(3)]
#[derive(Copy, Clone, FromBits, Debug, Eq, PartialEq)]
/// Exception codes passed to [`SpecialFunctions::signal_exception`].
pub enum ExceptionCode {
    BreakPoint = 0,
    IntegerOverflow = 1,
    AddressError = 2,
    SystemCall = 3,
    Trap = 4,
    InvalidOperation = 5,
    IllegalInstruction = 6,
    Unknown = 7,
}

impl ExceptionCode {
    /// Decode an exception code. Values that do not fit in three bits are
    /// [`ExceptionCode::Unknown`].
    pub fn from_code(code: u32) -> Self {
        match u8::try_from(code) {
            Ok(code) if code <= 0b111 => Self::from(u3::new(code)),
            _ => Self::Unknown,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Whether a prefetch targets instructions or data.
pub enum PrefetchTarget {
    Instruction,
    Data,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Operands of a `pref` instruction.
pub struct Prefetch {
    /// The access bypasses the caches.
    pub uncached: bool,
    pub physical_address: Address,
    pub virtual_address: Address,
    pub target: PrefetchTarget,
    /// Implementation defined hint field.
    pub hint: u32,
}

/// Hooks called by the execute loop.
pub trait SpecialFunctions {
    /// Called for the `pref` instruction.
    fn prefetch(&mut self, request: Prefetch) {
        tracing::event!(
            target: tracing::TraceItem::Hooks.as_str(),
            tracing::Level::TRACE,
            ?request,
            "prefetch"
        );
    }

    /// Called when an exception is raised.
    ///
    /// The default does not redirect control flow; simulators that deliver
    /// exceptions must override it.
    fn signal_exception(&mut self, code: ExceptionCode) {
        tracing::event!(
            target: tracing::TraceItem::Hooks.as_str(),
            tracing::Level::TRACE,
            ?code,
            "signal_exception"
        );
    }

    /// Called when a 64-bit coprocessor register is stored. Returns the stored
    /// value.
    fn cop_sd(&mut self, z: u32, rt: u32) -> u64 {
        tracing::event!(
            target: tracing::TraceItem::Hooks.as_str(),
            tracing::Level::TRACE,
            z,
            rt,
            "cop_sd"
        );
        0
    }

    /// Called when a 32-bit coprocessor register is stored. Returns the stored
    /// value.
    fn cop_sw(&mut self, z: u32, rt: u32) -> u32 {
        tracing::event!(
            target: tracing::TraceItem::Hooks.as_str(),
            tracing::Level::TRACE,
            z,
            rt,
            "cop_sw"
        );
        0
    }

    /// Called for the `sync` instruction.
    fn sync_operation(&mut self, stype: u32) {
        tracing::event!(
            target: tracing::TraceItem::Hooks.as_str(),
            tracing::Level::TRACE,
            stype,
            "sync_operation"
        );
    }

    /// Acquire ordering before an atomic memory operation.
    fn acquire(&mut self) {
        tracing::event!(
            target: tracing::TraceItem::Hooks.as_str(),
            tracing::Level::TRACE,
            "acquire"
        );
    }

    /// Release ordering after an atomic memory operation.
    fn release(&mut self) {
        tracing::event!(
            target: tracing::TraceItem::Hooks.as_str(),
            tracing::Level::TRACE,
            "release"
        );
    }

    /// Called when the hart waits for an interrupt.
    fn idle_while_no_interrupts_pending(&mut self) {
        tracing::event!(
            target: tracing::TraceItem::Hooks.as_str(),
            tracing::Level::TRACE,
            "idle_while_no_interrupts_pending"
        );
    }

    fn round_single(&mut self, result: f32, mode: RoundingMode) -> f32 {
        fpu::round_single(result, mode)
    }

    fn round_double(&mut self, result: f64, mode: RoundingMode) -> f64 {
        fpu::round_double(result, mode)
    }
}

/// Hooks with every default left in place.
#[derive(Copy, Clone, Default, Debug)]
pub struct DefaultHooks;

impl SpecialFunctions for DefaultHooks {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exception_code_decoding() {
        assert_eq!(ExceptionCode::from_code(0), ExceptionCode::BreakPoint);
        assert_eq!(ExceptionCode::from_code(3), ExceptionCode::SystemCall);
        assert_eq!(ExceptionCode::from_code(6), ExceptionCode::IllegalInstruction);
        assert_eq!(ExceptionCode::from_code(7), ExceptionCode::Unknown);
        assert_eq!(ExceptionCode::from_code(0x100), ExceptionCode::Unknown);
    }

    #[test]
    fn test_default_hooks() {
        let mut hooks = DefaultHooks;
        hooks.prefetch(Prefetch {
            uncached: true,
            physical_address: Address(0x8000_0000),
            virtual_address: Address(0x1000),
            target: PrefetchTarget::Data,
            hint: 0,
        });
        hooks.signal_exception(ExceptionCode::Trap);
        hooks.sync_operation(0);
        hooks.acquire();
        hooks.release();
        hooks.idle_while_no_interrupts_pending();
        assert_eq!(hooks.cop_sd(1, 2), 0);
        assert_eq!(hooks.cop_sw(1, 2), 0);
        assert_eq!(hooks.round_single(1.5, RoundingMode::Up), 1.5);
        assert_eq!(hooks.round_double(-2.25, RoundingMode::Down), -2.25);
    }
}
