// SPDX-License-Identifier: EUPL-1.2 OR GPL-3.0-or-later
// Copyright Contributors to the simhooks project.

use std::{borrow::Cow, path::PathBuf};

use clap::{Parser, Subcommand};
use simhooks::tracing::TraceItem;

fn maybe_hex(s: &str) -> Result<u32, Cow<'static, str>> {
    const HEX_PREFIX: &str = "0x";
    const HEX_PREFIX_UPPER: &str = "0X";

    let result = match s
        .strip_prefix(HEX_PREFIX)
        .or_else(|| s.strip_prefix(HEX_PREFIX_UPPER))
    {
        Some(digits) => u32::from_str_radix(digits, 16),
        None => s.parse::<u32>(),
    };

    result.map_err(|err| Cow::Owned(err.to_string()))
}

/// Processor special function hooks
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(short, long, default_value_t = 0, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Hook events to trace, regardless of the log level.
    #[arg(long, value_delimiter = ',')]
    pub trace: Vec<TraceItem>,
    /// Write logs to this file instead of standard error.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the emulated square root of VALUE and the raised exception flags.
    Sqrt {
        /// Use double precision instead of single precision.
        #[arg(long)]
        double: bool,
        /// Hexadecimal or decimal rounding mode code (`frm` encoding).
        #[arg(long, default_value_t = 0, value_parser = maybe_hex)]
        rounding_mode: u32,
        #[arg(value_name = "VALUE", allow_negative_numbers = true)]
        value: f64,
    },
    /// Replay a JSON event script on a fresh hart and print the outcomes.
    Replay {
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,
    },
}

impl Args {
    /// Parse command-line arguments from the process environment.
    pub fn parse() -> Result<Self, String> {
        let retval = <Self as clap::Parser>::parse();
        if let Command::Sqrt {
            double: false,
            value,
            ..
        } = retval.command
        {
            if value.is_finite() && value.abs() > f64::from(f32::MAX) {
                return Err(format!(
                    "Invalid arguments: {value} is out of range for single precision, use \
                     --double."
                ));
            }
        }
        Ok(retval)
    }
}

#[test]
fn test_maybe_hex() {
    assert_eq!(maybe_hex("0x10"), Ok(16));
    assert_eq!(maybe_hex("0X1f"), Ok(31));
    assert_eq!(maybe_hex("7"), Ok(7));
    assert!(maybe_hex("0xzz").is_err());
    assert!(maybe_hex("-1").is_err());
}
