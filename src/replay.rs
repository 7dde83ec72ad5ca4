// SPDX-License-Identifier: EUPL-1.2 OR GPL-3.0-or-later
// Copyright Contributors to the simhooks project.

//! Replay of hook events from JSON scripts.
//!
//! A script is an object with an `events` array. Each event names the hook in
//! its `op` field:
//!
//! ```json
//! { "events": [
//!     { "op": "reserve", "address": 4096 },
//!     { "op": "reserved", "address": 4096 },
//!     { "op": "sqrt_single", "value": 2.0, "rounding_mode": 0 }
//! ] }
//! ```

use std::path::Path;

use serde::Serializer;
use serde_derive::{Deserialize, Serialize};

use crate::{
    address::Address,
    fpu::{FpExceptions, RoundingMode},
    hart::Hart,
    hooks::{ExceptionCode, SpecialFunctions},
    tracing,
};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Event {
    Reserve {
        address: Address,
    },
    NotReserve,
    Reserved {
        address: Address,
    },
    SqrtSingle {
        value: f32,
        #[serde(default)]
        rounding_mode: u32,
    },
    SqrtDouble {
        value: f64,
        #[serde(default)]
        rounding_mode: u32,
    },
    Exception {
        code: u32,
    },
    ClearFlags {
        flags: u32,
    },
    RaiseFlags {
        flags: u32,
    },
    TestFlags {
        flags: u32,
    },
}

impl Event {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Reserve { .. } => "reserve",
            Self::NotReserve => "not_reserve",
            Self::Reserved { .. } => "reserved",
            Self::SqrtSingle { .. } => "sqrt_single",
            Self::SqrtDouble { .. } => "sqrt_double",
            Self::Exception { .. } => "exception",
            Self::ClearFlags { .. } => "clear_flags",
            Self::RaiseFlags { .. } => "raise_flags",
            Self::TestFlags { .. } => "test_flags",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Script {
    pub events: Vec<Event>,
}

impl Script {
    pub fn from_json(input: &str) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let input = std::fs::read_to_string(path)
            .map_err(|err| format!("Could not read script {}: {err}", path.display()))?;
        let script = Self::from_json(&input)
            .map_err(|err| format!("Could not parse script {}: {err}", path.display()))?;
        log::info!(
            "Loaded {} events from {}.",
            script.events.len(),
            path.display()
        );
        Ok(script)
    }
}

/// JSON has no representation for non-finite numbers, so these are written as
/// the strings `"NaN"`, `"inf"` and `"-inf"`.
fn non_finite_name(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value == f64::INFINITY {
        Some("inf")
    } else if value == f64::NEG_INFINITY {
        Some("-inf")
    } else {
        None
    }
}

fn serialize_single<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
    match non_finite_name(f64::from(*value)) {
        Some(name) => serializer.serialize_str(name),
        None => serializer.serialize_f32(*value),
    }
}

fn serialize_double<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    match non_finite_name(*value) {
        Some(name) => serializer.serialize_str(name),
        None => serializer.serialize_f64(*value),
    }
}

/// Value produced by an event, if any.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
#[serde(untagged)]
pub enum OutcomeValue {
    Success(bool),
    Single(#[serde(serialize_with = "serialize_single")] f32),
    Double(#[serde(serialize_with = "serialize_double")] f64),
    Flags(u32),
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Outcome {
    pub op: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<OutcomeValue>,
}

/// Apply a single event to `hart`.
pub fn apply<H: SpecialFunctions>(hart: &mut Hart<H>, event: &Event) -> Outcome {
    let result = match *event {
        Event::Reserve { address } => {
            hart.load_reserved(address);
            None
        }
        Event::NotReserve => {
            hart.invalidate_reservation();
            None
        }
        Event::Reserved { address } => {
            Some(OutcomeValue::Success(hart.store_conditional(address)))
        }
        Event::SqrtSingle {
            value,
            rounding_mode,
        } => Some(OutcomeValue::Single(
            hart.fsqrt_s(value, RoundingMode::from_code(rounding_mode)),
        )),
        Event::SqrtDouble {
            value,
            rounding_mode,
        } => Some(OutcomeValue::Double(
            hart.fsqrt_d(value, RoundingMode::from_code(rounding_mode)),
        )),
        Event::Exception { code } => {
            hart.take_exception(ExceptionCode::from_code(code));
            None
        }
        Event::ClearFlags { flags } => {
            hart.fp_status.clear(FpExceptions::from_bits_truncate(flags));
            None
        }
        Event::RaiseFlags { flags } => {
            hart.fp_status.raise(FpExceptions::from_bits_truncate(flags));
            None
        }
        Event::TestFlags { flags } => Some(OutcomeValue::Flags(
            hart.fp_status
                .test(FpExceptions::from_bits_truncate(flags))
                .bits(),
        )),
    };
    tracing::event!(
        target: tracing::TraceItem::Replay.as_str(),
        tracing::Level::TRACE,
        hart = hart.id,
        ?event,
        ?result,
        "replayed"
    );
    Outcome {
        op: event.name(),
        result,
    }
}

/// Replay every event of `script` in order.
pub fn replay<H: SpecialFunctions>(hart: &mut Hart<H>, script: &Script) -> Vec<Outcome> {
    script
        .events
        .iter()
        .map(|event| apply(hart, event))
        .collect()
}

pub fn outcomes_to_json(outcomes: &[Outcome]) -> Result<String, Box<dyn std::error::Error>> {
    Ok(serde_json::to_string_pretty(outcomes)?)
}

#[test]
fn test_script_parsing() {
    let script = Script::from_json(
        r#"{ "events": [
            { "op": "reserve", "address": 16 },
            { "op": "not_reserve" },
            { "op": "sqrt_double", "value": 3.5 },
            { "op": "exception", "code": 4 }
        ] }"#,
    )
    .unwrap();
    assert_eq!(
        script.events,
        vec![
            Event::Reserve {
                address: Address(16),
            },
            Event::NotReserve,
            Event::SqrtDouble {
                value: 3.5,
                rounding_mode: 0,
            },
            Event::Exception { code: 4 },
        ]
    );
    assert!(Script::from_json(r#"{ "events": [ { "op": "halt" } ] }"#).is_err());
    assert!(Script::from_json("not json").is_err());
}
