// SPDX-License-Identifier: EUPL-1.2 OR GPL-3.0-or-later
// Copyright Contributors to the simhooks project.

use simhooks::{
    hooks::{ExceptionCode, Prefetch, SpecialFunctions},
    Hart,
};

#[macro_export]
macro_rules! assert_close {
    ($left: expr, $right: expr, $tolerance: expr$(,)?) => {{
        let left: f64 = f64::from($left);
        let right: f64 = f64::from($right);
        let tolerance: f64 = $tolerance;
        assert!(
            (left - right).abs() <= tolerance,
            "{left_s} = {left:e} is not within {tolerance:e} of {right_s} = {right:e}",
            left_s = stringify!($left),
            right_s = stringify!($right),
        );
    }};
}

/// A hook call observed by [`RecordingHooks`].
#[allow(dead_code)]
#[derive(Clone, Debug, PartialEq)]
pub enum HookCall {
    Prefetch(Prefetch),
    SignalException(ExceptionCode),
    CopSd(u32, u32),
    CopSw(u32, u32),
    SyncOperation(u32),
    Acquire,
    Release,
    Idle,
}

/// Hooks that log every call and hand out fixed coprocessor values.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct RecordingHooks {
    pub calls: Vec<HookCall>,
}

impl SpecialFunctions for RecordingHooks {
    fn prefetch(&mut self, request: Prefetch) {
        self.calls.push(HookCall::Prefetch(request));
    }

    fn signal_exception(&mut self, code: ExceptionCode) {
        self.calls.push(HookCall::SignalException(code));
    }

    fn cop_sd(&mut self, z: u32, rt: u32) -> u64 {
        self.calls.push(HookCall::CopSd(z, rt));
        0xdead_beef_0000_0000 | u64::from(rt)
    }

    fn cop_sw(&mut self, z: u32, rt: u32) -> u32 {
        self.calls.push(HookCall::CopSw(z, rt));
        0xbeef_0000 | rt
    }

    fn sync_operation(&mut self, stype: u32) {
        self.calls.push(HookCall::SyncOperation(stype));
    }

    fn acquire(&mut self) {
        self.calls.push(HookCall::Acquire);
    }

    fn release(&mut self) {
        self.calls.push(HookCall::Release);
    }

    fn idle_while_no_interrupts_pending(&mut self) {
        self.calls.push(HookCall::Idle);
    }
}

#[allow(dead_code)]
pub fn make_recording_hart(id: usize) -> Hart<RecordingHooks> {
    Hart::new(id, RecordingHooks::default())
}
