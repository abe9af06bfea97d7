/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Main executable for radint-rs

use clap::Parser;
use radint_rs::cli::{execute, Cli, Command};
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Verbose selection prints the arbiter's reasoning through the logger
    let default_filter = match cli.command {
        Command::Select { verbose: true, .. } => "info",
        _ => "warn",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let start = Instant::now();
    let report = execute(&cli)?;
    print!("{}", report);
    println!("\nProcessing time:\t{:.3} s", start.elapsed().as_secs_f64());

    Ok(())
}
