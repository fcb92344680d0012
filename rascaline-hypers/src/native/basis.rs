use std::collections::BTreeMap;

use serde::Deserialize;
use serde::de::Error as _;

use crate::Error;

/// Possible Basis functions to use for the SOAP or LODE spherical expansion.
///
/// The basis is made of radial and angular parts, that can be combined in
/// various ways.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
#[serde(tag = "type")]
pub enum SphericalExpansionBasis<RadialBasis> {
    /// A Tensor product basis, combining all possible radial basis functions
    /// with all possible angular basis functions.
    TensorProduct(TensorProductBasis<RadialBasis>),
    /// An explicit basis, where the radial basis can be different for each
    /// angular channel
    Explicit(ExplicitBasis<RadialBasis>),
}

impl<RadialBasis> SphericalExpansionBasis<RadialBasis> {
    /// Get the angular channels included in this basis
    pub fn angular_channels(&self) -> Vec<usize> {
        match self {
            SphericalExpansionBasis::TensorProduct(basis) => {
                return (0..=basis.max_angular).collect();
            }
            SphericalExpansionBasis::Explicit(basis) => {
                return basis.by_angular.keys().copied().collect();
            }
        }
    }

    /// Get all the radial basis in this expansion basis, together with the
    /// corresponding angular channel (`None` for a radial basis shared by all
    /// angular channels).
    pub fn radial_basis(&self) -> Vec<(Option<usize>, &RadialBasis)> {
        match self {
            SphericalExpansionBasis::TensorProduct(basis) => {
                return vec![(None, &basis.radial)];
            }
            SphericalExpansionBasis::Explicit(basis) => {
                return basis.by_angular.iter().map(|(&l, radial)| (Some(l), radial)).collect();
            }
        }
    }

    /// Get the accuracy used to spline the radial integral
    pub fn spline_accuracy(&self) -> Option<f64> {
        match self {
            SphericalExpansionBasis::TensorProduct(basis) => basis.spline_accuracy,
            SphericalExpansionBasis::Explicit(basis) => basis.spline_accuracy,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if let Some(accuracy) = self.spline_accuracy() {
            if accuracy <= 0.0 || !accuracy.is_finite() {
                return Err(Error::InvalidParameter(format!(
                    "expected positive spline accuracy, got {}",
                    accuracy
                )));
            }
        }

        return Ok(());
    }
}


/// Information about tensor product bases
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TensorProductBasis<RadialBasis> {
    /// Maximal value (inclusive) of the angular moment (quantum number `l`) to
    /// use for the spherical harmonics basis functions
    pub max_angular: usize,
    /// Definition of the radial basis functions
    pub radial: RadialBasis,
    /// Accuracy for splining the radial integral. Using splines is typically
    /// faster than analytical implementations. If this is None, no splining is
    /// done.
    ///
    /// The number of control points in the spline is automatically determined
    /// to ensure the average absolute error is close to the requested accuracy.
    #[serde(default = "serde_default_spline_accuracy")]
    pub spline_accuracy: Option<f64>,
}

/// Information about "explicit" basis, where each angular channel can use
/// a different radial basis
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
#[serde(bound(deserialize = "RadialBasis: Deserialize<'de>"))]
pub struct ExplicitBasis<RadialBasis> {
    /// A map of radial basis to use for the specified angular channels.
    ///
    /// Only angular channels included in this map will be included in the
    /// output. Different angular channels are allowed to use completely
    /// different radial basis.
    #[serde(deserialize_with = "deserialize_by_angular")]
    #[schemars(with = "BTreeMap<usize, RadialBasis>")]
    pub by_angular: BTreeMap<usize, RadialBasis>,
    /// Accuracy for splining the radial integral, see
    /// [`TensorProductBasis::spline_accuracy`]
    #[serde(default = "serde_default_spline_accuracy")]
    pub spline_accuracy: Option<f64>,
}

#[allow(clippy::unnecessary_wraps)]
pub(crate) fn serde_default_spline_accuracy() -> Option<f64> { Some(1e-8) }

/// JSON map keys are always strings, and serde can not convert them back to
/// integers when the map is inside an internally tagged enum, so we do it
/// manually here.
pub(crate) fn deserialize_by_angular<'de, D, T>(deserializer: D) -> Result<BTreeMap<usize, T>, D::Error>
    where D: serde::Deserializer<'de>, T: Deserialize<'de>
{
    let map = BTreeMap::<String, T>::deserialize(deserializer)?;

    let mut by_angular = BTreeMap::new();
    for (key, value) in map {
        let angular = key.parse::<usize>().map_err(|_| D::Error::custom(format!(
            "invalid angular channel '{}' in by_angular, expected a non-negative integer",
            key
        )))?;

        if by_angular.insert(angular, value).is_some() {
            return Err(D::Error::custom(format!(
                "angular channel {} is specified multiple times in by_angular",
                angular
            )));
        }
    }

    return Ok(by_angular);
}


/// The different kinds of radial basis supported by SOAP calculators
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
#[serde(tag = "type")]
pub enum SoapRadialBasis {
    /// Use a radial basis similar to Gaussian-Type Orbitals.
    ///
    /// The basis is defined as `R_n(r) ∝ r^n e^{- r^2 / (2 σ_n^2)}`, where `σ_n
    /// = cutoff * \sqrt{n} / n_max`
    Gto {
        /// Maximal value of `n` to include in the radial basis function
        /// definition. The overall basis will have `max_radial + 1` basis
        /// functions, indexed from `0` to `max_radial` (inclusive).
        max_radial: usize,

        #[doc(hidden)]
        #[serde(default, skip_serializing_if = "Option::is_none")]
        radius: Option<f64>,
    },
}

impl SoapRadialBasis {
    /// Get the size (number of basis function) for the current basis
    pub fn size(&self) -> usize {
        match self {
            SoapRadialBasis::Gto { max_radial, .. } => max_radial + 1,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        match self {
            SoapRadialBasis::Gto { radius, .. } => {
                if let Some(radius) = radius {
                    if *radius <= 0.0 || !radius.is_finite() {
                        return Err(Error::InvalidParameter(format!(
                            "expected positive radius for Gto radial basis, got {}",
                            radius
                        )));
                    }
                }
            }
        }

        return Ok(());
    }
}


/// The different kinds of radial basis supported LODE calculators
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
#[serde(tag = "type")]
pub enum LodeRadialBasis {
    /// Use a radial basis similar to Gaussian-Type Orbitals.
    ///
    /// The basis is defined as `R_n(r) ∝ r^n e^{- r^2 / (2 σ_n^2)}`, where `σ_n
    /// = radius * \sqrt{n} / n_max`
    Gto {
        /// Maximal value of `n` to include in the radial basis function
        /// definition. The overall basis will have `max_radial + 1` basis
        /// functions, indexed from `0` to `max_radial` (inclusive).
        max_radial: usize,
        /// Radius of the Gto basis, i.e. how far should the local LODE field be
        /// integrated.
        radius: f64,
    },
}

impl LodeRadialBasis {
    /// Get the size (number of basis function) for the current basis
    pub fn size(&self) -> usize {
        match self {
            LodeRadialBasis::Gto { max_radial, .. } => max_radial + 1,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        match self {
            LodeRadialBasis::Gto { radius, .. } => {
                if *radius <= 0.0 || !radius.is_finite() {
                    return Err(Error::InvalidParameter(format!(
                        "expected positive radius for Gto radial basis, got {}",
                        radius
                    )));
                }
            }
        }

        return Ok(());
    }
}
