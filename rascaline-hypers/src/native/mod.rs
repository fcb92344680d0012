//! Hyper parameters understood by the native calculators. These types define
//! the canonical JSON representation handed over to the computation engine.
//! They can only express native variants, everything else must be rejected
//! before reaching this module.

mod cutoff;
pub use self::cutoff::{Cutoff, Smoothing};

mod density;
pub use self::density::{Density, DensityKind, DensityScaling};

mod basis;
pub use self::basis::{SphericalExpansionBasis, TensorProductBasis, ExplicitBasis};
pub use self::basis::{SoapRadialBasis, LodeRadialBasis};
pub(crate) use self::basis::{deserialize_by_angular, serde_default_spline_accuracy};

use crate::Error;

/// Hyper parameters for all the SOAP calculators: spherical expansion (also
/// by pair), radial spectrum and power spectrum.
///
/// See [this review article](https://doi.org/10.1063/1.5090481) for more
/// information on the SOAP representations.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SoapHypers {
    /// Definition of the atomic environment within a cutoff, and how
    /// neighboring atoms enter and leave the environment.
    pub cutoff: Cutoff,
    /// Definition of the density arising from atoms in the local environment.
    pub density: Density,
    /// Definition of the basis functions used to expand the atomic density
    pub basis: SphericalExpansionBasis<SoapRadialBasis>,
}

impl SoapHypers {
    pub fn validate(&self) -> Result<(), Error> {
        self.cutoff.validate()?;
        self.density.validate()?;
        self.basis.validate()?;
        for (_, radial) in self.basis.radial_basis() {
            radial.validate()?;
        }

        return Ok(());
    }
}

/// Hyper parameters for the LODE spherical expansion.
///
/// The spherical expansion is at the core of representations in the LODE
/// (long-distance equivariant) family. See [this
/// article](https://aip.scitation.org/doi/10.1063/1.5128375) for more
/// information on the LODE representation.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct LodeHypers {
    /// Spherical reciprocal cutoff. If `k_cutoff` is `None`, a cutoff of
    /// `1.2 π / SmearedPowerLaw.smearing`, which is a reasonable value for most
    /// systems, is used.
    #[serde(default)]
    pub k_cutoff: Option<f64>,
    /// Definition of the density arising from atoms in the whole system
    pub density: Density,
    /// Definition of the basis functions used to expand the atomic density in
    /// local environments
    pub basis: SphericalExpansionBasis<LodeRadialBasis>,
}

impl LodeHypers {
    /// Get the value of the k-space cutoff (either provided by the user or a
    /// default).
    pub fn get_k_cutoff(&self) -> Result<f64, Error> {
        if let Some(k_cutoff) = self.k_cutoff {
            return Ok(k_cutoff);
        }

        match self.density.kind {
            DensityKind::SmearedPowerLaw { smearing, .. } => {
                return Ok(1.2 * std::f64::consts::PI / smearing);
            },
            DensityKind::Gaussian { .. } => {
                return Err(Error::InvalidParameter(
                    "only SmearedPowerLaw density can be used with LODE".into()
                ));
            }
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        match self.density.kind {
            DensityKind::SmearedPowerLaw { exponent, .. } => {
                if exponent >= 10 {
                    return Err(Error::InvalidParameter(
                        "LODE is only implemented for SmearedPowerLaw exponent < 10".into()
                    ));
                }
            }
            DensityKind::Gaussian { .. } => {
                return Err(Error::InvalidParameter(
                    "only SmearedPowerLaw density can be used with LODE".into()
                ));
            }
        }

        if let Some(k_cutoff) = self.k_cutoff {
            if k_cutoff <= 0.0 || !k_cutoff.is_finite() {
                return Err(Error::InvalidParameter(format!(
                    "expected positive k_cutoff, got {}",
                    k_cutoff
                )));
            }
        }

        self.density.validate()?;
        self.basis.validate()?;
        for (_, radial) in self.basis.radial_basis() {
            radial.validate()?;
        }

        return Ok(());
    }
}

/// Validated hyper parameters for any of the native calculators
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize)]
#[serde(untagged)]
pub enum NativeHypers {
    Soap(SoapHypers),
    Lode(LodeHypers),
}

impl NativeHypers {
    /// Check that all values in these hyper parameters are in the range
    /// accepted by the native calculators
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            NativeHypers::Soap(hypers) => hypers.validate(),
            NativeHypers::Lode(hypers) => hypers.validate(),
        }
    }

    /// Get the canonical JSON representation of these hyper parameters
    pub fn to_json(&self) -> Result<String, Error> {
        return Ok(serde_json::to_string(self)?);
    }
}
