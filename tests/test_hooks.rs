// SPDX-License-Identifier: EUPL-1.2 OR GPL-3.0-or-later
// Copyright Contributors to the simhooks project.

use simhooks::{
    fpu::RoundingMode,
    hooks::{DefaultHooks, ExceptionCode, Prefetch, PrefetchTarget, SpecialFunctions},
    Address, Hart,
};

#[macro_use]
mod utils;

use utils::HookCall;

fn prefetch_request() -> Prefetch {
    Prefetch {
        uncached: false,
        physical_address: Address(0x8020_0000),
        virtual_address: Address(0x20_0000),
        target: PrefetchTarget::Instruction,
        hint: 4,
    }
}

#[test_log::test]
fn test_default_hooks_are_inert() {
    let mut hart: Hart<DefaultHooks> = Hart::new(0, DefaultHooks);
    hart.hooks.prefetch(prefetch_request());
    hart.hooks.sync_operation(0x10);
    hart.hooks.idle_while_no_interrupts_pending();
    assert_eq!(hart.hooks.cop_sd(2, 31), 0);
    assert_eq!(hart.hooks.cop_sw(2, 31), 0);
    for code in 0..8 {
        hart.take_exception(ExceptionCode::from_code(code));
    }
    assert!(!hart.reservation.is_active());
    assert!(hart.fp_status.accrued().is_empty());
}

#[test_log::test]
fn test_overridden_hooks_are_called() {
    let mut hart = utils::make_recording_hart(1);
    hart.hooks.prefetch(prefetch_request());
    assert_eq!(hart.hooks.cop_sd(1, 5), 0xdead_beef_0000_0005);
    assert_eq!(hart.hooks.cop_sw(1, 6), 0xbeef_0006);
    hart.hooks.sync_operation(0);
    hart.hooks.idle_while_no_interrupts_pending();
    hart.take_exception(ExceptionCode::BreakPoint);
    hart.take_exception(ExceptionCode::from_code(6));

    assert_eq!(
        hart.hooks.calls,
        vec![
            HookCall::Prefetch(prefetch_request()),
            HookCall::CopSd(1, 5),
            HookCall::CopSw(1, 6),
            HookCall::SyncOperation(0),
            HookCall::Idle,
            HookCall::SignalException(ExceptionCode::BreakPoint),
            HookCall::SignalException(ExceptionCode::IllegalInstruction),
        ]
    );
}

/// Rounding hooks that truncate towards zero when asked to.
#[derive(Debug, Default)]
struct TruncatingHooks;

impl SpecialFunctions for TruncatingHooks {
    fn round_single(&mut self, result: f32, mode: RoundingMode) -> f32 {
        match mode {
            RoundingMode::TowardZero => result.trunc(),
            _ => result,
        }
    }
}

#[test_log::test]
fn test_rounding_hooks_can_be_replaced() {
    let mut hart = Hart::new(0, TruncatingHooks);
    assert_close!(
        hart.fsqrt_s(2.0, RoundingMode::NearestEven),
        std::f32::consts::SQRT_2,
        1e-6
    );
    assert_eq!(hart.fsqrt_s(2.0, RoundingMode::TowardZero), 1.0);
    // Not overridden, so still the identity.
    assert_eq!(hart.fsqrt_d(2.5, RoundingMode::TowardZero), 2.5);
}
