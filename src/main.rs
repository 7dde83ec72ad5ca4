// SPDX-License-Identifier: EUPL-1.2 OR GPL-3.0-or-later
// Copyright Contributors to the simhooks project.

use std::collections::BTreeSet;

use simhooks::{
    fpu::RoundingMode,
    hart::Hart,
    replay::{self, Script},
    tracing,
};

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::Args::parse()?;
    let output = match args.log_file {
        Some(ref path) => tracing::Output::File(std::fs::File::create(path).map_err(|err| {
            format!("Could not create log file {}: {err}", path.display())
        })?),
        None => tracing::Output::Stderr,
    };
    let events: BTreeSet<tracing::TraceItem> = args.trace.iter().copied().collect();
    let _tracing_guard = tracing::init(tracing::verbosity_to_level(args.verbose), output, events);

    let mut hart: Hart = Hart::default();
    match args.command {
        cli::Command::Sqrt {
            double,
            rounding_mode,
            value,
        } => {
            let mode = RoundingMode::from_code(rounding_mode);
            if double {
                println!("{}", hart.fsqrt_d(value, mode));
            } else {
                println!("{}", hart.fsqrt_s(value as f32, mode));
            }
            println!("fflags: {:#04x}", hart.fp_status.accrued().bits());
        }
        cli::Command::Replay { script } => {
            let script = Script::from_path(&script)?;
            let outcomes = replay::replay(&mut hart, &script);
            println!("{}", replay::outcomes_to_json(&outcomes)?);
        }
    }
    Ok(())
}
