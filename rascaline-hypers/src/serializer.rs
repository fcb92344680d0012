use crate::Error;
use crate::calculator::CalculatorKind;
use crate::config::CalculatorConfig;
use crate::validator::validate;

use crate::capabilities::cutoff::{CutoffSpec, SmoothingVariant};
use crate::capabilities::density::{AtomicDensityVariant, DensitySpec, ScalingVariant};
use crate::capabilities::basis::{ExpansionBasisSpec, RadialBasisSpec};

use crate::native::{NativeHypers, SoapHypers, LodeHypers};
use crate::native::{Cutoff, Smoothing, Density, DensityKind, DensityScaling};
use crate::native::{SphericalExpansionBasis, TensorProductBasis, ExplicitBasis};
use crate::native::{SoapRadialBasis, LodeRadialBasis};

/// Convert `config` to the hyper parameters of the native calculator of the
/// given `kind`.
///
/// The configuration is first checked with [`validate`], and the values in
/// the native hyper parameters are then checked to be in the expected range.
/// This function is pure: the same configuration always gives the same
/// native hyper parameters.
pub fn serialize(kind: CalculatorKind, config: &CalculatorConfig) -> Result<NativeHypers, Error> {
    validate(kind, config)?;

    let density = native_density(&config.density)?;
    let hypers = if kind.is_lode() {
        if config.cutoff.is_some() {
            return Err(Error::InvalidParameter(format!(
                "{} does not use a real space cutoff", kind.name()
            )));
        }

        NativeHypers::Lode(LodeHypers {
            k_cutoff: config.k_cutoff,
            density,
            basis: native_basis(&config.basis, |radial| lode_radial(kind, radial))?,
        })
    } else {
        let cutoff = config.cutoff.as_ref().ok_or_else(|| Error::InvalidParameter(format!(
            "missing cutoff for the {} calculator", kind.name()
        )))?;

        if config.k_cutoff.is_some() {
            return Err(Error::InvalidParameter(format!(
                "k_cutoff can not be used with the {} calculator", kind.name()
            )));
        }

        NativeHypers::Soap(SoapHypers {
            cutoff: native_cutoff(cutoff)?,
            density,
            basis: native_basis(&config.basis, soap_radial)?,
        })
    };

    hypers.validate()?;
    log::debug!("created native hyper parameters for {}", kind.name());

    return Ok(hypers);
}

fn not_validated(family: &str, name: &str) -> Error {
    Error::Internal(format!(
        "{} '{}' should have been rejected during validation", family, name
    ))
}

fn native_cutoff(cutoff: &CutoffSpec) -> Result<Cutoff, Error> {
    let smoothing = match cutoff.smoothing {
        Some(SmoothingVariant::ShiftedCosine { width }) => Smoothing::ShiftedCosine { width },
        // no smoothing is the same as a step function
        Some(SmoothingVariant::Step {}) | None => Smoothing::Step {},
        Some(SmoothingVariant::Custom(ref name)) => return Err(not_validated("smoothing", name)),
    };

    return Ok(Cutoff {
        radius: cutoff.radius,
        smoothing,
    });
}

fn native_density(density: &DensitySpec) -> Result<Density, Error> {
    let kind = match density.kind {
        AtomicDensityVariant::Gaussian { width } => DensityKind::Gaussian { width },
        AtomicDensityVariant::SmearedPowerLaw { smearing, exponent } => {
            DensityKind::SmearedPowerLaw { smearing, exponent }
        }
        AtomicDensityVariant::DiracDelta => return Err(not_validated("atomic density", "DiracDelta")),
        AtomicDensityVariant::Custom(ref name) => return Err(not_validated("atomic density", name)),
    };

    let scaling = match density.scaling {
        Some(ScalingVariant::Willatt2018 { exponent, rate, scale }) => {
            Some(DensityScaling::Willatt2018 { scale, rate, exponent })
        }
        Some(ScalingVariant::Custom(ref name)) => return Err(not_validated("scaling", name)),
        None => None,
    };

    return Ok(Density {
        kind,
        scaling,
        center_atom_weight: density.center_atom_weight,
    });
}

fn native_basis<R, F>(basis: &ExpansionBasisSpec, radial: F) -> Result<SphericalExpansionBasis<R>, Error>
    where F: Fn(&RadialBasisSpec) -> Result<R, Error>
{
    match basis {
        ExpansionBasisSpec::TensorProduct { max_angular, radial: radial_spec, spline_accuracy } => {
            return Ok(SphericalExpansionBasis::TensorProduct(TensorProductBasis {
                max_angular: *max_angular,
                radial: radial(radial_spec)?,
                spline_accuracy: *spline_accuracy,
            }));
        }
        ExpansionBasisSpec::Explicit { by_angular, spline_accuracy } => {
            let by_angular = by_angular.iter()
                .map(|(&angular, radial_spec)| -> Result<(usize, R), Error> {
                    Ok((angular, radial(radial_spec)?))
                })
                .collect::<Result<_, Error>>()?;

            return Ok(SphericalExpansionBasis::Explicit(ExplicitBasis {
                by_angular,
                spline_accuracy: *spline_accuracy,
            }));
        }
        ExpansionBasisSpec::Custom(name) => Err(not_validated("expansion basis", name)),
    }
}

fn soap_radial(radial: &RadialBasisSpec) -> Result<SoapRadialBasis, Error> {
    match *radial {
        RadialBasisSpec::Gto { max_radial, radius } => Ok(SoapRadialBasis::Gto { max_radial, radius }),
        RadialBasisSpec::Custom(ref name) => Err(not_validated("radial basis", name)),
    }
}

fn lode_radial(kind: CalculatorKind, radial: &RadialBasisSpec) -> Result<LodeRadialBasis, Error> {
    match *radial {
        RadialBasisSpec::Gto { max_radial, radius: Some(radius) } => {
            Ok(LodeRadialBasis::Gto { max_radial, radius })
        }
        RadialBasisSpec::Gto { radius: None, .. } => {
            Err(Error::InvalidParameter(format!(
                "the Gto radial basis requires a radius for the {} calculator", kind.name()
            )))
        }
        RadialBasisSpec::Custom(ref name) => Err(not_validated("radial basis", name)),
    }
}
