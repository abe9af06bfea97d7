/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Atomic elements described by Roothaan–Hartree–Fock STO tables
//!
//! Tables are indexed the way the published RHF data is laid out: one STO
//! basis per angular momentum l (exponents Z_lj, powers n_lj) and, for every
//! occupied shell (n, l), a coefficient vector C_nlj over that basis.

use super::errors::{ElementError, Result};
use super::sto::{self, StoExpansion};
use super::BoundStateModel;
use crate::utils::constants::{PhysicalConstants, RYDBERG};
use crate::utils::effective_charge;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Spectroscopic letters for l = 0, 1, 2, ...
const ORBITAL_LETTERS: [char; 7] = ['s', 'p', 'd', 'f', 'g', 'h', 'i'];

/// An element with STO bound-state wavefunctions for each occupied shell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Element name or symbol
    pub name: String,
    /// Nuclear charge
    pub atomic_number: u32,
    /// C_nlj indexed as [n-1][l][j]; an empty vector marks an unoccupied shell
    pub coefficients: Vec<Vec<Vec<f64>>>,
    /// Z_lj indexed as [l][j]
    pub exponents: Vec<Vec<f64>>,
    /// n_lj indexed as [l][j]
    pub powers: Vec<Vec<u32>>,
    /// Binding energies in eV indexed as [n-1][l]
    pub binding_energies: Vec<Vec<f64>>,
    /// Unit system of the radial coordinate
    #[serde(skip)]
    constants: PhysicalConstants,
}

impl Element {
    /// Create an element from its orbital tables, validating their shapes
    pub fn new(
        name: impl Into<String>,
        atomic_number: u32,
        coefficients: Vec<Vec<Vec<f64>>>,
        exponents: Vec<Vec<f64>>,
        powers: Vec<Vec<u32>>,
        binding_energies: Vec<Vec<f64>>,
    ) -> Result<Self> {
        let element = Self {
            name: name.into(),
            atomic_number,
            coefficients,
            exponents,
            powers,
            binding_energies,
            constants: PhysicalConstants::default(),
        };
        element.validate()?;
        Ok(element)
    }

    /// A one-electron ion with a single exact 1s orbital
    ///
    /// The 1s hydrogenic function is one normalised STO with exponent Z,
    /// and its binding energy Z²·Ry gives Z_eff = Z.
    pub fn hydrogen_like(atomic_number: u32) -> Result<Self> {
        let z = atomic_number as f64;
        Self::new(
            format!("Z{}+", atomic_number),
            atomic_number,
            vec![vec![vec![1.0]]],
            vec![vec![z]],
            vec![vec![1]],
            vec![vec![z * z * RYDBERG]],
        )
    }

    /// Parse an element from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let element: Self = serde_json::from_str(json)?;
        element.validate()?;
        Ok(element)
    }

    /// Read an element from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Use a different unit system for the radial coordinate
    pub fn with_constants(mut self, constants: PhysicalConstants) -> Self {
        self.constants = constants;
        self
    }

    /// Unit system of the radial coordinate
    pub fn constants(&self) -> PhysicalConstants {
        self.constants
    }

    /// Highest principal quantum number with an occupied shell
    pub fn n_max(&self) -> u32 {
        self.coefficients.len() as u32
    }

    /// Highest angular momentum tabulated for principal quantum number n
    pub fn l_max(&self, n: u32) -> Option<u32> {
        let shells = self.coefficients.get(n.checked_sub(1)? as usize)?;
        shells.len().checked_sub(1).map(|l| l as u32)
    }

    /// Spectroscopic shell name, e.g. "3p"
    pub fn shell_name(&self, n: u32, l: u32) -> String {
        match ORBITAL_LETTERS.get(l as usize) {
            Some(letter) => format!("{}{}", n, letter),
            None => format!("{}[l={}]", n, l),
        }
    }

    /// All occupied shells, outermost first as in tabulation loops
    pub fn shells(&self) -> Vec<(u32, u32)> {
        let mut shells = Vec::new();
        for n in (1..=self.n_max()).rev() {
            let l_max = self.l_max(n).unwrap_or(0);
            for l in (0..=l_max).rev() {
                if self.contains_shell(n, l) {
                    shells.push((n, l));
                }
            }
        }
        shells
    }

    /// Binding energy of shell (n, l) in eV
    pub fn binding_energy(&self, n: u32, l: u32) -> Result<f64> {
        if !self.contains_shell(n, l) {
            return Err(self.invalid_shell(n, l));
        }
        Ok(self.binding_energies[n as usize - 1][l as usize])
    }

    /// STO expansion of shell (n, l)
    pub fn expansion(&self, n: u32, l: u32) -> Result<StoExpansion> {
        if !self.contains_shell(n, l) {
            return Err(self.invalid_shell(n, l));
        }
        Ok(StoExpansion {
            coefficients: self.coefficients[n as usize - 1][l as usize].clone(),
            exponents: self.exponents[l as usize].clone(),
            powers: self.powers[l as usize].clone(),
        })
    }

    /// Borrowed (C_j, Z_j, n_j) triples of a shell, `None` when absent
    fn shell_terms(
        &self,
        n: u32,
        l: u32,
    ) -> Option<impl Iterator<Item = (f64, f64, u32)> + '_> {
        if !self.contains_shell(n, l) {
            return None;
        }
        let l = l as usize;
        Some(
            self.coefficients[n as usize - 1][l]
                .iter()
                .zip(&self.exponents[l])
                .zip(&self.powers[l])
                .map(|((&c, &z), &p)| (c, z, p)),
        )
    }

    fn invalid_shell(&self, n: u32, l: u32) -> ElementError {
        ElementError::InvalidShell {
            element: self.name.clone(),
            n,
            l,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.coefficients.is_empty() {
            return Err(ElementError::InvalidTable(format!(
                "{} has no shells",
                self.name
            )));
        }
        if self.exponents.len() != self.powers.len() {
            return Err(ElementError::InvalidTable(format!(
                "{} exponent table has {} l values but power table has {}",
                self.name,
                self.exponents.len(),
                self.powers.len()
            )));
        }
        for (l, (exponents, powers)) in self.exponents.iter().zip(&self.powers).enumerate() {
            if exponents.len() != powers.len() {
                return Err(ElementError::InvalidTable(format!(
                    "l={} basis has {} exponents but {} powers",
                    l,
                    exponents.len(),
                    powers.len()
                )));
            }
            if let Some(z) = exponents.iter().find(|z| !(z.is_finite() && **z > 0.0)) {
                return Err(ElementError::InvalidTable(format!(
                    "l={} basis has non-positive exponent {}",
                    l, z
                )));
            }
            if powers.iter().any(|&n| n == 0) {
                return Err(ElementError::InvalidTable(format!(
                    "l={} basis has a zero principal quantum number",
                    l
                )));
            }
        }
        if self.binding_energies.len() != self.coefficients.len() {
            return Err(ElementError::InvalidTable(format!(
                "{} binding energies cover {} n values, coefficients cover {}",
                self.name,
                self.binding_energies.len(),
                self.coefficients.len()
            )));
        }
        for (n_index, (shells, energies)) in self
            .coefficients
            .iter()
            .zip(&self.binding_energies)
            .enumerate()
        {
            let n = n_index + 1;
            if shells.len() > n {
                return Err(ElementError::InvalidTable(format!(
                    "n={} lists {} angular momenta",
                    n,
                    shells.len()
                )));
            }
            if energies.len() != shells.len() {
                return Err(ElementError::InvalidTable(format!(
                    "n={} has {} shells but {} binding energies",
                    n,
                    shells.len(),
                    energies.len()
                )));
            }
            for (l, coefficients) in shells.iter().enumerate() {
                if coefficients.is_empty() {
                    continue;
                }
                let basis_len = self.exponents.get(l).map_or(0, Vec::len);
                if coefficients.len() != basis_len {
                    return Err(ElementError::InvalidTable(format!(
                        "shell {} has {} coefficients for a basis of {}",
                        self.shell_name(n as u32, l as u32),
                        coefficients.len(),
                        basis_len
                    )));
                }
                if !(energies[l].is_finite() && energies[l] > 0.0) {
                    return Err(ElementError::InvalidTable(format!(
                        "shell {} has non-positive binding energy {}",
                        self.shell_name(n as u32, l as u32),
                        energies[l]
                    )));
                }
            }
        }
        Ok(())
    }
}

impl BoundStateModel for Element {
    fn radial(&self, n: u32, l: u32, r: f64) -> f64 {
        let bohr_radius = self.constants.bohr_radius;
        self.shell_terms(n, l)
            .map_or(f64::NAN, |terms| sto::sum_radial(terms, r, bohr_radius))
    }

    fn radial_derivative(&self, n: u32, l: u32, r: f64) -> f64 {
        let bohr_radius = self.constants.bohr_radius;
        self.shell_terms(n, l)
            .map_or(f64::NAN, |terms| sto::sum_radial_derivative(terms, r, bohr_radius))
    }

    fn radial_alternative(&self, n: u32, l: u32, r: f64) -> f64 {
        let bohr_radius = self.constants.bohr_radius;
        self.shell_terms(n, l)
            .map_or(f64::NAN, |terms| sto::sum_radial_log_space(terms, r, bohr_radius))
    }

    fn radial_derivative_alternative(&self, n: u32, l: u32, r: f64) -> f64 {
        let bohr_radius = self.constants.bohr_radius;
        self.shell_terms(n, l)
            .map_or(f64::NAN, |terms| sto::sum_radial_derivative_log_space(terms, r, bohr_radius))
    }

    fn z_effective(&self, n: u32, l: u32) -> f64 {
        match self.binding_energy(n, l) {
            Ok(energy) => effective_charge(n, energy),
            Err(_) => f64::NAN,
        }
    }

    fn sto_expansion(&self, n: u32, l: u32) -> Option<StoExpansion> {
        self.expansion(n, l).ok()
    }

    fn contains_shell(&self, n: u32, l: u32) -> bool {
        n >= 1
            && self
                .coefficients
                .get(n as usize - 1)
                .and_then(|shells| shells.get(l as usize))
                .is_some_and(|c| !c.is_empty())
    }

    fn bohr_radius(&self) -> f64 {
        self.constants.bohr_radius
    }

    fn name(&self) -> &str {
        &self.name
    }
}
