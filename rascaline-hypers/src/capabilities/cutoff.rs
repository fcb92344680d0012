use super::{CapabilityObject, short_type_name};

/// A smoothing function, used to make atoms smoothly enter and leave the
/// local environment around the cutoff radius.
///
/// Only [`ShiftedCosine`] and [`Step`] can be used with the native
/// calculators, other implementations are rejected when creating a
/// calculator.
pub trait SmoothingFunction: CapabilityObject + std::fmt::Debug {}

/// Shifted cosine smoothing function, see [`crate::native::Smoothing`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftedCosine {
    /// width of the region where the smoothing function goes from 1 to 0
    pub width: f64,
}

impl SmoothingFunction for ShiftedCosine {}

/// Step smoothing function, i.e. no smoothing at all
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Step;

impl SmoothingFunction for Step {}

/// Spherical cutoff for atomic environments
#[derive(Debug)]
pub struct Cutoff {
    /// radius of the cutoff sphere
    pub radius: f64,
    /// smoothing function to use, `None` means no smoothing
    pub smoothing: Option<Box<dyn SmoothingFunction>>,
}

impl Cutoff {
    /// Create a new cutoff with the given `radius`, without smoothing
    pub fn new(radius: f64) -> Cutoff {
        Cutoff { radius, smoothing: None }
    }

    /// Use the given `smoothing` function for this cutoff
    #[must_use]
    pub fn with_smoothing(mut self, smoothing: impl SmoothingFunction) -> Cutoff {
        self.smoothing = Some(Box::new(smoothing));
        self
    }
}

/// The different variants of smoothing functions
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
#[serde(tag = "type")]
pub enum SmoothingVariant {
    ShiftedCosine {
        width: f64,
    },
    Step {},
    /// User-defined smoothing function, with the corresponding type name
    #[serde(skip)]
    Custom(String),
}

impl SmoothingVariant {
    /// Classify a smoothing function trait object in one of the variants
    pub fn classify(smoothing: &dyn SmoothingFunction) -> SmoothingVariant {
        let any = smoothing.as_any();
        if let Some(shifted_cosine) = any.downcast_ref::<ShiftedCosine>() {
            SmoothingVariant::ShiftedCosine { width: shifted_cosine.width }
        } else if any.is::<Step>() {
            SmoothingVariant::Step {}
        } else {
            SmoothingVariant::Custom(short_type_name(smoothing.type_name()).to_owned())
        }
    }

    /// Get the name of this variant
    pub fn type_name(&self) -> &str {
        match self {
            SmoothingVariant::ShiftedCosine { .. } => "ShiftedCosine",
            SmoothingVariant::Step {} => "Step",
            SmoothingVariant::Custom(name) => name,
        }
    }
}

/// Description of the cutoff, as given by the user
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CutoffSpec {
    pub radius: f64,
    #[serde(default)]
    pub smoothing: Option<SmoothingVariant>,
}

impl From<&Cutoff> for CutoffSpec {
    fn from(cutoff: &Cutoff) -> CutoffSpec {
        CutoffSpec {
            radius: cutoff.radius,
            smoothing: cutoff.smoothing.as_ref().map(|smoothing| SmoothingVariant::classify(&**smoothing)),
        }
    }
}
