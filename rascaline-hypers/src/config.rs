use crate::Error;
use crate::calculator::CalculatorKind;

use crate::capabilities::cutoff::{Cutoff, CutoffSpec};
use crate::capabilities::density::{AtomicDensity, DensitySpec};
use crate::capabilities::basis::{ExpansionBasis, ExpansionBasisSpec};

/// Full configuration of a calculator, built either from plain JSON
/// mappings or from capability objects. Nodes in this configuration can be
/// custom variants, which are rejected by [`crate::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorConfig {
    /// Real space cutoff, this is `None` for LODE
    pub cutoff: Option<CutoffSpec>,
    pub density: DensitySpec,
    pub basis: ExpansionBasisSpec,
    /// Reciprocal space cutoff, only used by LODE
    pub k_cutoff: Option<f64>,
}

/// Structured keyword arguments for SOAP calculators
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct SoapArguments {
    cutoff: CutoffSpec,
    density: DensitySpec,
    basis: ExpansionBasisSpec,
}

/// Structured keyword arguments for LODE calculators
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct LodeArguments {
    #[serde(default)]
    k_cutoff: Option<f64>,
    density: DensitySpec,
    basis: ExpansionBasisSpec,
}

impl CalculatorConfig {
    /// Parse the structured keyword `arguments` (a JSON object) for the
    /// calculator of the given `kind`.
    pub fn from_arguments(kind: CalculatorKind, arguments: serde_json::Value) -> Result<CalculatorConfig, Error> {
        if kind.is_lode() {
            let arguments = serde_json::from_value::<LodeArguments>(arguments)?;
            return Ok(CalculatorConfig {
                cutoff: None,
                density: arguments.density,
                basis: arguments.basis,
                k_cutoff: arguments.k_cutoff,
            });
        }

        let arguments = serde_json::from_value::<SoapArguments>(arguments)?;
        return Ok(CalculatorConfig {
            cutoff: Some(arguments.cutoff),
            density: arguments.density,
            basis: arguments.basis,
            k_cutoff: None,
        });
    }

    /// Classify all the capability objects in `hypers` to create the
    /// configuration of a calculator of the given `kind`.
    pub fn from_hypers(kind: CalculatorKind, hypers: &Hypers) -> Result<CalculatorConfig, Error> {
        if kind.is_lode() {
            if hypers.cutoff.is_some() {
                return Err(Error::InvalidParameter(format!(
                    "{} does not use a real space cutoff, the radius should be given to the radial basis instead",
                    kind.name()
                )));
            }
        } else if hypers.cutoff.is_none() {
            return Err(Error::InvalidParameter(format!(
                "missing cutoff for the {} calculator", kind.name()
            )));
        } else if hypers.k_cutoff.is_some() {
            return Err(Error::InvalidParameter(format!(
                "k_cutoff can not be used with the {} calculator", kind.name()
            )));
        }

        return Ok(CalculatorConfig {
            cutoff: hypers.cutoff.as_ref().map(CutoffSpec::from),
            density: DensitySpec::classify(&*hypers.density),
            basis: ExpansionBasisSpec::classify(&*hypers.basis),
            k_cutoff: hypers.k_cutoff,
        });
    }
}

/// Hyper parameters defined with capability objects, the typed equivalent of
/// the JSON keyword arguments of [`crate::Calculator::new`].
#[derive(Debug)]
pub struct Hypers {
    /// Real space cutoff, required for SOAP and unused for LODE
    pub cutoff: Option<Cutoff>,
    pub density: Box<dyn AtomicDensity>,
    pub basis: Box<dyn ExpansionBasis>,
    /// Reciprocal space cutoff, only used by LODE
    pub k_cutoff: Option<f64>,
}

impl Hypers {
    /// Create hyper parameters for the SOAP calculators
    pub fn new(cutoff: Cutoff, density: impl AtomicDensity, basis: impl ExpansionBasis) -> Hypers {
        Hypers {
            cutoff: Some(cutoff),
            density: Box::new(density),
            basis: Box::new(basis),
            k_cutoff: None,
        }
    }

    /// Create hyper parameters for the LODE calculator
    pub fn lode(density: impl AtomicDensity, basis: impl ExpansionBasis) -> Hypers {
        Hypers {
            cutoff: None,
            density: Box::new(density),
            basis: Box::new(basis),
            k_cutoff: None,
        }
    }

    #[must_use]
    pub fn with_k_cutoff(mut self, k_cutoff: f64) -> Hypers {
        self.k_cutoff = Some(k_cutoff);
        self
    }
}
