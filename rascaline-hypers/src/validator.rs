use crate::calculator::CalculatorKind;
use crate::config::CalculatorConfig;
use crate::errors::{CapabilityFamily, UnsupportedVariant};

use crate::capabilities::cutoff::SmoothingVariant;
use crate::capabilities::density::{AtomicDensityVariant, ScalingVariant};
use crate::capabilities::basis::{ExpansionBasisSpec, RadialBasisSpec};

/// Check that all the nodes in `config` can be expressed with the hyper
/// parameters of the native calculator of the given `kind`.
///
/// Nodes are visited in a fixed order: cutoff smoothing, atomic density,
/// density scaling, expansion basis and finally the radial basis (by
/// increasing angular channel for explicit basis). The first unsupported
/// node is reported.
pub fn validate(kind: CalculatorKind, config: &CalculatorConfig) -> Result<(), UnsupportedVariant> {
    if let Some(ref cutoff) = config.cutoff {
        check_smoothing(cutoff.smoothing.as_ref())?;
    }

    NativeSupport { kind }.density(&config.density.kind)?;
    check_scaling(config.density.scaling.as_ref())?;
    check_basis(&config.basis)?;

    log::debug!("all hyper parameters for {} are supported by the native calculator", kind.name());
    return Ok(());
}

/// Which atomic densities are supported by a given native calculator
struct NativeSupport {
    kind: CalculatorKind,
}

impl NativeSupport {
    fn density(&self, density: &AtomicDensityVariant) -> Result<(), UnsupportedVariant> {
        match density {
            AtomicDensityVariant::Custom(name) => {
                Err(UnsupportedVariant::custom(CapabilityFamily::AtomicDensity, name))
            }
            AtomicDensityVariant::Gaussian { .. } if !self.kind.is_lode() => Ok(()),
            AtomicDensityVariant::SmearedPowerLaw { .. } if self.kind.is_lode() => Ok(()),
            // Dirac delta is only usable through a tabulated radial integral
            AtomicDensityVariant::DiracDelta |
            AtomicDensityVariant::Gaussian { .. } |
            AtomicDensityVariant::SmearedPowerLaw { .. } => {
                Err(UnsupportedVariant::in_calculator(
                    CapabilityFamily::AtomicDensity,
                    density.type_name(),
                    self.kind.name(),
                ))
            }
        }
    }
}

fn check_smoothing(smoothing: Option<&SmoothingVariant>) -> Result<(), UnsupportedVariant> {
    match smoothing {
        None | Some(SmoothingVariant::ShiftedCosine { .. } | SmoothingVariant::Step {}) => Ok(()),
        Some(SmoothingVariant::Custom(name)) => {
            Err(UnsupportedVariant::custom(CapabilityFamily::Smoothing, name))
        }
    }
}

fn check_scaling(scaling: Option<&ScalingVariant>) -> Result<(), UnsupportedVariant> {
    match scaling {
        None | Some(ScalingVariant::Willatt2018 { .. }) => Ok(()),
        Some(ScalingVariant::Custom(name)) => {
            Err(UnsupportedVariant::custom(CapabilityFamily::Scaling, name))
        }
    }
}

fn check_basis(basis: &ExpansionBasisSpec) -> Result<(), UnsupportedVariant> {
    if let ExpansionBasisSpec::Custom(name) = basis {
        return Err(UnsupportedVariant::custom(CapabilityFamily::ExpansionBasis, name));
    }

    for radial in basis.radial_nodes() {
        check_radial(radial)?;
    }

    return Ok(());
}

fn check_radial(radial: &RadialBasisSpec) -> Result<(), UnsupportedVariant> {
    match radial {
        RadialBasisSpec::Gto { .. } => Ok(()),
        RadialBasisSpec::Custom(name) => {
            Err(UnsupportedVariant::custom(CapabilityFamily::RadialBasis, name))
        }
    }
}
