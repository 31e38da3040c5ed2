//! Price Calculator Service
//!
//! Holds a base price and a tax rate in memory and computes totals over HTTP,
//! reporting one trace span per operation to an OTLP collector.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────┐
//!                     │                 PRICE CALCULATOR                 │
//!                     │                                                  │
//!   POST /calculate   │  ┌────────┐    ┌──────────┐    ┌─────────────┐   │
//!   POST /setBase…    ├─▶│  http  │───▶│ handlers │───▶│ ConfigStore │   │
//!   POST /setTax…     │  │ server │    └────┬─────┘    └─────────────┘   │
//!                     │  └────────┘         │                            │
//!                     │                     ▼                            │
//!                     │              ┌─────────────┐                     │
//!                     │              │ PriceEngine │                     │
//!                     │              └─────────────┘                     │
//!                     │                                                  │
//!                     │  cross-cutting: config, lifecycle,               │
//!                     │                 observability (spans → OTLP)     │
//!                     └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use price_calculator::config::resolve_config;
use price_calculator::lifecycle;

#[derive(Parser)]
#[command(name = "price-calculator")]
#[command(about = "Price calculator service with OpenTelemetry tracing", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // The subscriber is not installed yet, so configuration errors go to stderr.
    let config = match resolve_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match lifecycle::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Fatal error: {}", e);
            ExitCode::FAILURE
        }
    }
}
