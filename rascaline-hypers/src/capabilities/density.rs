use super::{CapabilityObject, short_type_name};

/// An atomic density, i.e. the function centered on each neighbor atom that
/// is summed to create the density of the local environment.
///
/// Only [`Gaussian`] (for SOAP) and [`SmearedPowerLaw`] (for LODE) can be
/// used directly by the native calculators. Other densities, including
/// [`DiracDelta`], have to be pre-tabulated on splines.
pub trait AtomicDensity: CapabilityObject + std::fmt::Debug {}

/// A radial scaling function, multiplying the density of each neighbor atom
/// depending on its distance to the center.
pub trait RadialScaling: CapabilityObject + std::fmt::Debug {}

/// Gaussian atomic density, see [`crate::native::DensityKind::Gaussian`]
#[derive(Debug)]
pub struct Gaussian {
    /// width of the gaussian
    pub width: f64,
    /// weight of the central atom contribution to the density
    pub center_atom_weight: f64,
    /// optional radial scaling of the density
    pub scaling: Option<Box<dyn RadialScaling>>,
}

impl Gaussian {
    pub fn new(width: f64) -> Gaussian {
        Gaussian {
            width,
            center_atom_weight: 1.0,
            scaling: None,
        }
    }

    #[must_use]
    pub fn with_scaling(mut self, scaling: impl RadialScaling) -> Gaussian {
        self.scaling = Some(Box::new(scaling));
        self
    }

    #[must_use]
    pub fn with_center_atom_weight(mut self, center_atom_weight: f64) -> Gaussian {
        self.center_atom_weight = center_atom_weight;
        self
    }
}

impl AtomicDensity for Gaussian {}

/// Dirac delta atomic density
#[derive(Debug)]
pub struct DiracDelta {
    /// weight of the central atom contribution to the density
    pub center_atom_weight: f64,
    /// optional radial scaling of the density
    pub scaling: Option<Box<dyn RadialScaling>>,
}

impl Default for DiracDelta {
    fn default() -> DiracDelta {
        DiracDelta {
            center_atom_weight: 1.0,
            scaling: None,
        }
    }
}

impl AtomicDensity for DiracDelta {}

/// Smeared power law density, see
/// [`crate::native::DensityKind::SmearedPowerLaw`]
#[derive(Debug)]
pub struct SmearedPowerLaw {
    /// smearing width of the density
    pub smearing: f64,
    /// exponent of the density
    pub exponent: usize,
    /// weight of the central atom contribution to the density
    pub center_atom_weight: f64,
    /// optional radial scaling of the density
    pub scaling: Option<Box<dyn RadialScaling>>,
}

impl SmearedPowerLaw {
    pub fn new(smearing: f64, exponent: usize) -> SmearedPowerLaw {
        SmearedPowerLaw {
            smearing,
            exponent,
            center_atom_weight: 1.0,
            scaling: None,
        }
    }

    #[must_use]
    pub fn with_scaling(mut self, scaling: impl RadialScaling) -> SmearedPowerLaw {
        self.scaling = Some(Box::new(scaling));
        self
    }

    #[must_use]
    pub fn with_center_atom_weight(mut self, center_atom_weight: f64) -> SmearedPowerLaw {
        self.center_atom_weight = center_atom_weight;
        self
    }
}

impl AtomicDensity for SmearedPowerLaw {}

/// Radial scaling from <https://doi.org/10.1039/C8CP05921G>, see
/// [`crate::native::DensityScaling::Willatt2018`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Willatt2018 {
    pub exponent: f64,
    pub rate: f64,
    pub scale: f64,
}

impl RadialScaling for Willatt2018 {}


/// The different variants of atomic density
#[derive(Debug, Clone, PartialEq)]
pub enum AtomicDensityVariant {
    Gaussian {
        width: f64,
    },
    DiracDelta,
    SmearedPowerLaw {
        smearing: f64,
        exponent: usize,
    },
    /// User-defined atomic density, with the corresponding type name
    Custom(String),
}

impl AtomicDensityVariant {
    /// Get the name of this variant
    pub fn type_name(&self) -> &str {
        match self {
            AtomicDensityVariant::Gaussian { .. } => "Gaussian",
            AtomicDensityVariant::DiracDelta => "DiracDelta",
            AtomicDensityVariant::SmearedPowerLaw { .. } => "SmearedPowerLaw",
            AtomicDensityVariant::Custom(name) => name,
        }
    }
}

/// The different variants of radial scaling
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
#[serde(tag = "type")]
pub enum ScalingVariant {
    Willatt2018 {
        exponent: f64,
        rate: f64,
        scale: f64,
    },
    /// User-defined radial scaling, with the corresponding type name
    #[serde(skip)]
    Custom(String),
}

impl ScalingVariant {
    /// Classify a radial scaling trait object in one of the variants
    pub fn classify(scaling: &dyn RadialScaling) -> ScalingVariant {
        if let Some(willatt) = scaling.as_any().downcast_ref::<Willatt2018>() {
            ScalingVariant::Willatt2018 {
                exponent: willatt.exponent,
                rate: willatt.rate,
                scale: willatt.scale,
            }
        } else {
            ScalingVariant::Custom(short_type_name(scaling.type_name()).to_owned())
        }
    }

    /// Get the name of this variant
    pub fn type_name(&self) -> &str {
        match self {
            ScalingVariant::Willatt2018 { .. } => "Willatt2018",
            ScalingVariant::Custom(name) => name,
        }
    }
}

/// Description of the atomic density, as given by the user
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize)]
#[serde(from = "DensityMapping")]
pub struct DensitySpec {
    pub kind: AtomicDensityVariant,
    pub center_atom_weight: f64,
    pub scaling: Option<ScalingVariant>,
}

fn classify_scaling(scaling: Option<&dyn RadialScaling>) -> Option<ScalingVariant> {
    scaling.map(ScalingVariant::classify)
}

impl DensitySpec {
    /// Classify an atomic density trait object. The center atom weight and
    /// scaling of custom densities are unknown and left to their default.
    pub fn classify(density: &dyn AtomicDensity) -> DensitySpec {
        let any = density.as_any();
        if let Some(gaussian) = any.downcast_ref::<Gaussian>() {
            DensitySpec {
                kind: AtomicDensityVariant::Gaussian { width: gaussian.width },
                center_atom_weight: gaussian.center_atom_weight,
                scaling: classify_scaling(gaussian.scaling.as_deref()),
            }
        } else if let Some(delta) = any.downcast_ref::<DiracDelta>() {
            DensitySpec {
                kind: AtomicDensityVariant::DiracDelta,
                center_atom_weight: delta.center_atom_weight,
                scaling: classify_scaling(delta.scaling.as_deref()),
            }
        } else if let Some(power_law) = any.downcast_ref::<SmearedPowerLaw>() {
            DensitySpec {
                kind: AtomicDensityVariant::SmearedPowerLaw {
                    smearing: power_law.smearing,
                    exponent: power_law.exponent,
                },
                center_atom_weight: power_law.center_atom_weight,
                scaling: classify_scaling(power_law.scaling.as_deref()),
            }
        } else {
            DensitySpec {
                kind: AtomicDensityVariant::Custom(short_type_name(density.type_name()).to_owned()),
                center_atom_weight: 1.0,
                scaling: None,
            }
        }
    }
}

/// JSON representation of a `DensitySpec`, where the type tag selects the
/// atomic density and the other fields are shared
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
#[serde(tag = "type")]
enum DensityMapping {
    Gaussian {
        width: f64,
        #[serde(default = "serde_default_center_atom_weight")]
        center_atom_weight: f64,
        #[serde(default)]
        scaling: Option<ScalingVariant>,
    },
    DiracDelta {
        #[serde(default = "serde_default_center_atom_weight")]
        center_atom_weight: f64,
        #[serde(default)]
        scaling: Option<ScalingVariant>,
    },
    SmearedPowerLaw {
        smearing: f64,
        exponent: usize,
        #[serde(default = "serde_default_center_atom_weight")]
        center_atom_weight: f64,
        #[serde(default)]
        scaling: Option<ScalingVariant>,
    },
}

fn serde_default_center_atom_weight() -> f64 {
    return 1.0;
}

impl From<DensityMapping> for DensitySpec {
    fn from(mapping: DensityMapping) -> DensitySpec {
        match mapping {
            DensityMapping::Gaussian { width, center_atom_weight, scaling } => DensitySpec {
                kind: AtomicDensityVariant::Gaussian { width },
                center_atom_weight,
                scaling,
            },
            DensityMapping::DiracDelta { center_atom_weight, scaling } => DensitySpec {
                kind: AtomicDensityVariant::DiracDelta,
                center_atom_weight,
                scaling,
            },
            DensityMapping::SmearedPowerLaw { smearing, exponent, center_atom_weight, scaling } => DensitySpec {
                kind: AtomicDensityVariant::SmearedPowerLaw { smearing, exponent },
                center_atom_weight,
                scaling,
            },
        }
    }
}
