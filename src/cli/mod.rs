/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Command Line Interface (CLI) module
//!
//! `radint compare` evaluates one radial integral with several methods and
//! times them; `radint select` runs the arbiter and names the fastest
//! validated method; `radint multipoles` lists the contributing L values.

use crate::atoms::{BoundStateModel, Element};
use crate::integrals::{
    compare_methods, evaluation_report, multipole_range, IntegralKind, IntegralRequest,
    IntegrationConfig, IntegrationMethod,
};
use crate::utils::constants::PhysicalConstants;
use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fmt::Write;
use std::path::PathBuf;

/// Methods compared when none are given on the command line
pub const DEFAULT_COMPARISON: [IntegrationMethod; 5] = [
    IntegrationMethod::Quadosc,
    IntegrationMethod::Hankel,
    IntegrationMethod::Analytic,
    IntegrationMethod::TanhSinhStepwise,
    IntegrationMethod::NumpyStepwise,
];

#[derive(Parser, Debug)]
#[command(
    name = "radint",
    version,
    about = "Radial transition integrals for atomic ionization form factors"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Integration settings in JSON; missing fields keep their defaults
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Unit system for lengths and momenta
    #[arg(short, long, global = true, value_enum, default_value_t = Units::Natural)]
    pub units: Units,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate one integral with several methods and time each
    Compare {
        #[command(flatten)]
        integral: IntegralArgs,

        /// Comma-separated method names
        #[arg(short, long, value_delimiter = ',')]
        methods: Vec<String>,
    },
    /// Pick the fastest method whose result is corroborated
    Select {
        #[command(flatten)]
        integral: IntegralArgs,

        /// Print every candidate result and the agreement set
        #[arg(short, long)]
        verbose: bool,
    },
    /// List the multipole orders L for a shell and final state
    Multipoles {
        /// Integral kind (1, 2 or 3)
        #[arg(long, default_value_t = 1)]
        kind: u8,

        /// Shell angular momentum l
        #[arg(long)]
        l: u32,

        /// Final-state angular momentum l'
        #[arg(long)]
        l_prime: u32,
    },
}

/// Unit systems selectable on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Units {
    /// ħ = c = 1, momenta in eV
    Natural,
    /// Lengths in Bohr radii
    Atomic,
}

impl From<Units> for PhysicalConstants {
    fn from(units: Units) -> Self {
        match units {
            Units::Natural => PhysicalConstants::natural(),
            Units::Atomic => PhysicalConstants::atomic(),
        }
    }
}

/// The integral to evaluate
#[derive(Args, Debug)]
pub struct IntegralArgs {
    /// Element description in JSON (STO tables and binding energies)
    #[arg(short, long, value_name = "FILE", required_unless_present = "hydrogen_like")]
    pub element: Option<PathBuf>,

    /// Use a one-electron ion of this nuclear charge instead of a file
    #[arg(long, value_name = "Z", conflicts_with = "element")]
    pub hydrogen_like: Option<u32>,

    /// Integral kind (1, 2 or 3)
    #[arg(long, default_value_t = 2)]
    pub kind: u8,

    /// Principal quantum number of the shell
    #[arg(short, long)]
    pub n: u32,

    /// Angular momentum of the shell
    #[arg(short, long)]
    pub l: u32,

    /// Final-state momentum in keV
    #[arg(short, long)]
    pub k: f64,

    /// Final-state angular momentum l'
    #[arg(long)]
    pub l_prime: u32,

    /// Multipole order L
    #[arg(long = "multipole", short = 'L')]
    pub multipole: u32,

    /// Momentum transfer in keV
    #[arg(short, long)]
    pub q: f64,
}

impl IntegralArgs {
    fn load_element(&self, constants: PhysicalConstants) -> anyhow::Result<Element> {
        let element = match (&self.element, self.hydrogen_like) {
            (Some(path), _) => Element::from_json_file(path)
                .with_context(|| format!("Failed to load element from {}", path.display()))?,
            (None, Some(z)) => Element::hydrogen_like(z)?,
            (None, None) => bail!("Either --element or --hydrogen-like is required"),
        };
        Ok(element.with_constants(constants))
    }

    fn request<'a>(
        &self,
        shell: &'a dyn BoundStateModel,
        config: &IntegrationConfig,
    ) -> anyhow::Result<IntegralRequest<'a>> {
        let kind = IntegralKind::try_from(self.kind)?;
        let kev = config.constants.kev;
        Ok(IntegralRequest::new(
            kind,
            shell,
            self.n,
            self.l,
            self.k * kev,
            self.l_prime,
            self.multipole,
            self.q * kev,
        ))
    }
}

/// Build the configuration selected by the global options
pub fn load_config(cli: &Cli) -> anyhow::Result<IntegrationConfig> {
    let mut config = match &cli.config {
        Some(path) => IntegrationConfig::from_json_file(path)?,
        None => IntegrationConfig::default(),
    };
    config.constants = cli.units.into();
    Ok(config)
}

/// Run a parsed command line and return the text to print
pub fn execute(cli: &Cli) -> anyhow::Result<String> {
    let config = load_config(cli)?;
    let mut out = String::new();

    match &cli.command {
        Command::Compare { integral, methods } => {
            let methods = if methods.is_empty() {
                DEFAULT_COMPARISON.to_vec()
            } else {
                methods
                    .iter()
                    .map(|name| name.parse::<IntegrationMethod>())
                    .collect::<Result<Vec<_>, _>>()?
            };
            let element = integral.load_element(config.constants)?;
            let request = integral.request(&element, &config)?;
            request.validate(&config)?;

            writeln!(
                out,
                "{} {} integral {}, l'={}, L={}",
                element.name,
                element.shell_name(integral.n, integral.l),
                request.kind,
                integral.l_prime,
                integral.multipole
            )?;
            for comparison in compare_methods(&request, &methods, &config) {
                match comparison.outcome {
                    Ok(value) => writeln!(
                        out,
                        "{}\t{:e}\t({:.6} s)",
                        comparison.method,
                        value,
                        comparison.duration.as_secs_f64()
                    )?,
                    Err(err) => writeln!(
                        out,
                        "{}\tno result: {}\t({:.6} s)",
                        comparison.method,
                        err,
                        comparison.duration.as_secs_f64()
                    )?,
                }
            }
        }
        Command::Select { integral, verbose } => {
            let element = integral.load_element(config.constants)?;
            let request = integral.request(&element, &config)?;
            let report = evaluation_report(&request, *verbose, &config)?;

            if *verbose {
                writeln!(out, "Results:")?;
                for result in &report.results {
                    writeln!(
                        out,
                        "{}\t{:e}\t({:.6} s)",
                        result.method,
                        result.value,
                        result.duration.as_secs_f64()
                    )?;
                }
                writeln!(out, "Working methods:")?;
                for result in &report.working {
                    writeln!(out, "{}", result.method)?;
                }
            }
            writeln!(out, "Best method:\t{}", report.best.method)?;
        }
        Command::Multipoles { kind, l, l_prime } => {
            let kind = IntegralKind::try_from(*kind)?;
            let orders: Vec<String> = multipole_range(kind, *l, *l_prime)
                .map(|order| order.to_string())
                .collect();
            writeln!(out, "{}", orders.join(" "))?;
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compare_with_methods() {
        let cli = Cli::try_parse_from([
            "radint", "compare", "--hydrogen-like", "2", "-n", "1", "-l", "0", "-k", "1.5",
            "--l-prime", "1", "-L", "1", "-q", "3", "--methods", "analytic,Hankel",
        ])
        .unwrap();
        match cli.command {
            Command::Compare { integral, methods } => {
                assert_eq!(integral.hydrogen_like, Some(2));
                assert_eq!(integral.kind, 2);
                assert_eq!(methods, vec!["analytic", "Hankel"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(cli.units, Units::Natural);
    }

    #[test]
    fn test_element_source_is_required() {
        let result = Cli::try_parse_from([
            "radint", "select", "-n", "1", "-l", "0", "-k", "1", "--l-prime", "0", "-L", "0",
            "-q", "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_multipoles_command() {
        let cli = Cli::try_parse_from([
            "radint", "multipoles", "--kind", "3", "--l", "1", "--l-prime", "2",
        ])
        .unwrap();
        assert_eq!(execute(&cli).unwrap().trim(), "0 1 2 3 4");
    }

    #[test]
    fn test_unknown_method_aborts() {
        let cli = Cli::try_parse_from([
            "radint", "--units", "atomic", "compare", "--hydrogen-like", "1", "-n", "1", "-l",
            "0", "-k", "1", "--l-prime", "0", "-L", "0", "-q", "1", "--methods", "simpson",
        ])
        .unwrap();
        let err = execute(&cli).unwrap_err();
        assert!(err.to_string().contains("simpson"));
    }
}
