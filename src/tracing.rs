// SPDX-License-Identifier: EUPL-1.2 OR GPL-3.0-or-later
// Copyright Contributors to the simhooks project.

//! Logging setup.
//!
//! Hook events are emitted on one target per [`TraceItem`]; targets that are
//! not selected are turned off regardless of the log level.

use std::{collections::BTreeSet, io::Write};

pub use ::tracing::{error, event, event_enabled, info, trace, warn, Level};
pub use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{prelude::*, Layer};

#[derive(Copy, Clone, Ord, PartialOrd, PartialEq, Eq, Debug, clap::ValueEnum)]
pub enum TraceItem {
    #[value(name = "fp_flags")]
    FpFlags,
    Hooks,
    Replay,
    Reservation,
    Sqrt,
}

impl TraceItem {
    pub const POSSIBLE_VALUES: &[Self] = &[
        Self::FpFlags,
        Self::Hooks,
        Self::Replay,
        Self::Reservation,
        Self::Sqrt,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FpFlags => "fp_flags",
            Self::Hooks => "hooks",
            Self::Replay => "replay",
            Self::Reservation => "reservation",
            Self::Sqrt => "sqrt",
        }
    }
}

impl std::fmt::Display for TraceItem {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{}", self.as_str())
    }
}

/// Maps a `-v` count to a level: warnings by default, then info, debug and
/// trace.
pub const fn verbosity_to_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

#[derive(Debug)]
pub enum Output {
    Stderr,
    File(std::fs::File),
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Self::Stderr => std::io::stderr().lock().write(buf),
            Self::File(ref mut f) => f.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stderr => std::io::stderr().lock().flush(),
            Self::File(ref mut f) => f.flush(),
        }
    }
}

/// Keeps the non-blocking writer alive; logs are flushed when it is dropped.
pub struct TracingGuard {
    _worker_guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Builds the filter: `level` for everything, `trace` for the selected
/// [`TraceItem`] targets and `off` for the rest.
pub fn env_filter(
    level: LevelFilter,
    events: &BTreeSet<TraceItem>,
) -> tracing_subscriber::EnvFilter {
    let mut env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env()
        .unwrap_or_default();
    for item in TraceItem::POSSIBLE_VALUES {
        let directive = if events.contains(item) {
            format!("{item}=trace")
        } else {
            format!("{item}=off")
        };
        if let Ok(directive) = directive.parse() {
            env_filter = env_filter.add_directive(directive);
        }
    }
    env_filter
}

#[must_use]
pub fn init(
    log_level: LevelFilter,
    output: Output,
    events: BTreeSet<TraceItem>,
) -> TracingGuard {
    let filter = env_filter(log_level, &events);
    let ansi = matches!(output, Output::Stderr);
    let (non_blocking, worker_guard) = tracing_appender::non_blocking(output);
    let log_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(ansi)
        .with_target(true)
        .and_then(filter)
        .boxed();

    tracing_subscriber::registry().with(log_layer).init();
    TracingGuard {
        _worker_guard: worker_guard,
    }
}
