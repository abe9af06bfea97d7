/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Radial transition integrals
//!
//! For a bound shell (n, l) and a continuum state (k, l′) this module
//! evaluates one of three radial integrals against the spherical Bessel
//! function j_L(qr):
//!
//! 1. ∫ r² R_nl(r) R_kl′(r) j_L(qr) dr
//! 2. ∫ r² dR_nl/dr R_kl′(r) j_L(qr) dr
//! 3. ∫ r R_nl(r) R_kl′(r) j_L(qr) dr
//!
//! Seven independent methods compute the same number. [`radial_integral`]
//! dispatches to one of them; [`evaluate_integration_methods`] runs a
//! prioritised subset, cross-checks them and picks the fastest method whose
//! result is corroborated.

pub mod analytic;
pub mod config;
pub mod errors;
pub mod evaluator;

mod adaptive;
mod hankel;
mod integrand;
mod quadosc;
mod stepwise;
mod tanh_sinh;

pub use analytic::SeriesOutcome;
pub use config::IntegrationConfig;
pub use errors::{IntegralError, Result};
pub use evaluator::{
    compare_methods, evaluate_integration_methods, evaluate_integration_methods_with_config,
    evaluation_report, MethodComparison, MethodEvaluation, MethodResult,
};

use crate::atoms::BoundStateModel;
use crate::continuum::{ContinuumModel, CoulombContinuum};
use integrand::Integrand;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Which radial integrand is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegralKind {
    /// r² R R_f j_L
    Radial,
    /// r² dR/dr R_f j_L
    Derivative,
    /// r R R_f j_L
    Reduced,
}

impl IntegralKind {
    /// All kinds in index order
    pub const ALL: [IntegralKind; 3] = [
        IntegralKind::Radial,
        IntegralKind::Derivative,
        IntegralKind::Reduced,
    ];

    /// Numeric index 1, 2 or 3
    pub fn index(self) -> u8 {
        match self {
            IntegralKind::Radial => 1,
            IntegralKind::Derivative => 2,
            IntegralKind::Reduced => 3,
        }
    }
}

impl TryFrom<u8> for IntegralKind {
    type Error = IntegralError;

    fn try_from(index: u8) -> Result<Self> {
        match index {
            1 => Ok(IntegralKind::Radial),
            2 => Ok(IntegralKind::Derivative),
            3 => Ok(IntegralKind::Reduced),
            other => Err(IntegralError::InvalidRequest(format!(
                "integral kind must be 1, 2 or 3, got {}",
                other
            ))),
        }
    }
}

impl fmt::Display for IntegralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// The closed set of integration methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegrationMethod {
    /// Half-period quadrature over [0, ∞) with series acceleration
    Quadosc,
    /// Ogata Hankel transform of order L + 1/2
    Hankel,
    /// Term-by-term STO series
    Analytic,
    /// Tanh-sinh over a fixed range
    TanhSinh,
    /// Tanh-sinh over successive windows
    TanhSinhStepwise,
    /// Adaptive Gauss–Kronrod over a fixed range
    Numpy,
    /// Adaptive Gauss–Kronrod over successive windows
    NumpyStepwise,
}

impl IntegrationMethod {
    /// Every method, in the order they are usually compared
    pub const ALL: [IntegrationMethod; 7] = [
        IntegrationMethod::Quadosc,
        IntegrationMethod::Hankel,
        IntegrationMethod::Analytic,
        IntegrationMethod::TanhSinh,
        IntegrationMethod::TanhSinhStepwise,
        IntegrationMethod::Numpy,
        IntegrationMethod::NumpyStepwise,
    ];

    /// Canonical method name
    pub fn name(self) -> &'static str {
        match self {
            IntegrationMethod::Quadosc => "quadosc",
            IntegrationMethod::Hankel => "Hankel",
            IntegrationMethod::Analytic => "analytic",
            IntegrationMethod::TanhSinh => "tanh-sinh",
            IntegrationMethod::TanhSinhStepwise => "tanh-sinh-stepwise",
            IntegrationMethod::Numpy => "numpy",
            IntegrationMethod::NumpyStepwise => "numpy-stepwise",
        }
    }
}

impl FromStr for IntegrationMethod {
    type Err = IntegralError;

    fn from_str(name: &str) -> Result<Self> {
        IntegrationMethod::ALL
            .into_iter()
            .find(|method| method.name() == name)
            .ok_or_else(|| IntegralError::UnknownMethod(name.to_string()))
    }
}

impl fmt::Display for IntegrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One radial integral to evaluate
#[derive(Clone, Copy)]
pub struct IntegralRequest<'a> {
    /// Integrand selector
    pub kind: IntegralKind,
    /// Bound-state model of the atom
    pub shell: &'a dyn BoundStateModel,
    /// Continuum model; Coulomb waves in the configured units when `None`
    pub continuum: Option<&'a dyn ContinuumModel>,
    /// Principal quantum number of the shell
    pub n: u32,
    /// Angular momentum of the shell
    pub l: u32,
    /// Final-state momentum
    pub k: f64,
    /// Final-state angular momentum l′
    pub l_prime: u32,
    /// Multipole order L
    pub multipole: u32,
    /// Momentum transfer
    pub q: f64,
}

impl<'a> IntegralRequest<'a> {
    /// Create a request using the default Coulomb continuum
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kind: IntegralKind,
        shell: &'a dyn BoundStateModel,
        n: u32,
        l: u32,
        k: f64,
        l_prime: u32,
        multipole: u32,
        q: f64,
    ) -> Self {
        Self {
            kind,
            shell,
            continuum: None,
            n,
            l,
            k,
            l_prime,
            multipole,
            q,
        }
    }

    /// Use a custom continuum model
    pub fn with_continuum(mut self, continuum: &'a dyn ContinuumModel) -> Self {
        self.continuum = Some(continuum);
        self
    }

    /// Reject requests no method can evaluate
    ///
    /// q = 0 is rejected here since several integrands divide by q.
    pub fn validate(&self, config: &IntegrationConfig) -> Result<()> {
        if !(self.k.is_finite() && self.k > 0.0) {
            return Err(IntegralError::InvalidRequest(format!(
                "final-state momentum must be positive and finite, got {}",
                self.k
            )));
        }
        if !(self.q.is_finite() && self.q > 0.0) {
            return Err(IntegralError::InvalidRequest(format!(
                "momentum transfer must be positive and finite, got {}",
                self.q
            )));
        }
        if !self.shell.contains_shell(self.n, self.l) {
            return Err(IntegralError::InvalidRequest(format!(
                "{} has no shell n={}, l={}",
                self.shell.name(),
                self.n,
                self.l
            )));
        }
        let z_eff = self.shell.z_effective(self.n, self.l);
        if !(z_eff.is_finite() && z_eff > 0.0) {
            return Err(IntegralError::InvalidRequest(format!(
                "effective charge must be positive, got {}",
                z_eff
            )));
        }
        let a0 = config.constants.bohr_radius;
        if (self.shell.bohr_radius() - a0).abs() > 1e-12 * a0 {
            return Err(IntegralError::InvalidRequest(format!(
                "bound-state model uses a0={} but the configuration uses a0={}",
                self.shell.bohr_radius(),
                a0
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for IntegralRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntegralRequest")
            .field("kind", &self.kind)
            .field("shell", &self.shell.name())
            .field("n", &self.n)
            .field("l", &self.l)
            .field("k", &self.k)
            .field("l_prime", &self.l_prime)
            .field("multipole", &self.multipole)
            .field("q", &self.q)
            .finish()
    }
}

/// Multipole orders L contributing for a shell l and final state l′
///
/// Kind 1 couples |l−l′| ..= l+l′; kinds 2 and 3 carry an extra vector
/// index and couple min(|l−1−l′|, |l+1−l′|) ..= l+l′+1.
pub fn multipole_range(kind: IntegralKind, l: u32, l_prime: u32) -> RangeInclusive<u32> {
    let (l, l_prime) = (l as i64, l_prime as i64);
    match kind {
        IntegralKind::Radial => ((l - l_prime).unsigned_abs() as u32)..=((l + l_prime) as u32),
        IntegralKind::Derivative | IntegralKind::Reduced => {
            let lower = (l - 1 - l_prime).abs().min((l + 1 - l_prime).abs());
            (lower as u32)..=((l + l_prime + 1) as u32)
        }
    }
}

/// Evaluate a radial integral with the default configuration
pub fn radial_integral(request: &IntegralRequest<'_>, method: IntegrationMethod) -> Result<f64> {
    radial_integral_with_config(request, method, &IntegrationConfig::default())
}

/// Evaluate a radial integral by method name
///
/// Unknown names are an error; no default method is substituted.
pub fn radial_integral_by_name(
    request: &IntegralRequest<'_>,
    method_name: &str,
    config: &IntegrationConfig,
) -> Result<f64> {
    let method = method_name.parse::<IntegrationMethod>()?;
    radial_integral_with_config(request, method, config)
}

/// Evaluate a radial integral with an explicit configuration
pub fn radial_integral_with_config(
    request: &IntegralRequest<'_>,
    method: IntegrationMethod,
    config: &IntegrationConfig,
) -> Result<f64> {
    request.validate(config)?;

    let coulomb = CoulombContinuum::new(config.constants);
    let continuum: &dyn ContinuumModel = match request.continuum {
        Some(continuum) => continuum,
        None => &coulomb,
    };
    let integrand = Integrand::new(request, continuum);

    match method {
        IntegrationMethod::Quadosc => quadosc::integrate(&integrand, config),
        IntegrationMethod::Hankel => hankel::integrate(&integrand, config),
        IntegrationMethod::Analytic => match analytic::integrate(request, config)? {
            SeriesOutcome::Converged { value, .. } => Ok(value),
            SeriesOutcome::NotConverged { terms } => {
                Err(IntegralError::NonConvergence { method, terms })
            }
        },
        IntegrationMethod::TanhSinh => tanh_sinh::integrate(&integrand, config),
        IntegrationMethod::TanhSinhStepwise => tanh_sinh::integrate_stepwise(&integrand, config),
        IntegrationMethod::Numpy => adaptive::integrate(&integrand, config),
        IntegrationMethod::NumpyStepwise => adaptive::integrate_stepwise(&integrand, config),
    }
}
