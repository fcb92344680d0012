use std::collections::BTreeMap;

use crate::native::{deserialize_by_angular, serde_default_spline_accuracy};

use super::{CapabilityObject, short_type_name};

/// A set of basis functions (radial and angular) on which to expand the
/// atomic density. Only [`TensorProduct`] and [`Explicit`] can be used
/// directly by the native calculators.
pub trait ExpansionBasis: CapabilityObject + std::fmt::Debug {}

/// A set of radial basis functions. Only [`Gto`] can be used directly by the
/// native calculators.
pub trait RadialBasis: CapabilityObject + std::fmt::Debug {}

/// Gaussian Type Orbital radial basis, see
/// [`crate::native::SoapRadialBasis::Gto`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gto {
    /// Maximal value of `n` to include in the radial basis. There are
    /// `max_radial + 1` radial functions in total.
    pub max_radial: usize,
    /// Radius of the basis. This is required for LODE, and defaults to the
    /// cutoff radius for SOAP.
    pub radius: Option<f64>,
}

impl Gto {
    pub fn new(max_radial: usize) -> Gto {
        Gto { max_radial, radius: None }
    }

    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Gto {
        self.radius = Some(radius);
        self
    }
}

impl RadialBasis for Gto {}

/// Tensor product basis, using the same radial basis for all angular
/// channels up to `max_angular`
#[derive(Debug)]
pub struct TensorProduct {
    pub max_angular: usize,
    pub radial: Box<dyn RadialBasis>,
    /// Accuracy for splining the radial integral, `None` to disable splines
    pub spline_accuracy: Option<f64>,
}

impl TensorProduct {
    pub fn new(max_angular: usize, radial: impl RadialBasis) -> TensorProduct {
        TensorProduct {
            max_angular,
            radial: Box::new(radial),
            spline_accuracy: serde_default_spline_accuracy(),
        }
    }

    #[must_use]
    pub fn with_spline_accuracy(mut self, spline_accuracy: Option<f64>) -> TensorProduct {
        self.spline_accuracy = spline_accuracy;
        self
    }
}

impl ExpansionBasis for TensorProduct {}

/// Explicit basis, using a potentially different radial basis for each
/// angular channel
#[derive(Debug)]
pub struct Explicit {
    pub by_angular: BTreeMap<usize, Box<dyn RadialBasis>>,
    /// Accuracy for splining the radial integral, `None` to disable splines
    pub spline_accuracy: Option<f64>,
}

impl Explicit {
    pub fn new(by_angular: BTreeMap<usize, Box<dyn RadialBasis>>) -> Explicit {
        Explicit {
            by_angular,
            spline_accuracy: serde_default_spline_accuracy(),
        }
    }

    #[must_use]
    pub fn with_spline_accuracy(mut self, spline_accuracy: Option<f64>) -> Explicit {
        self.spline_accuracy = spline_accuracy;
        self
    }
}

impl ExpansionBasis for Explicit {}


/// The different variants of radial basis
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
#[serde(tag = "type")]
pub enum RadialBasisSpec {
    Gto {
        max_radial: usize,
        #[serde(default)]
        radius: Option<f64>,
    },
    /// User-defined radial basis, with the corresponding type name
    #[serde(skip)]
    Custom(String),
}

impl RadialBasisSpec {
    /// Classify a radial basis trait object in one of the variants
    pub fn classify(radial: &dyn RadialBasis) -> RadialBasisSpec {
        if let Some(gto) = radial.as_any().downcast_ref::<Gto>() {
            RadialBasisSpec::Gto {
                max_radial: gto.max_radial,
                radius: gto.radius,
            }
        } else {
            RadialBasisSpec::Custom(short_type_name(radial.type_name()).to_owned())
        }
    }

    /// Get the name of this variant
    pub fn type_name(&self) -> &str {
        match self {
            RadialBasisSpec::Gto { .. } => "Gto",
            RadialBasisSpec::Custom(name) => name,
        }
    }
}

/// The different variants of expansion basis
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
#[serde(tag = "type")]
pub enum ExpansionBasisSpec {
    TensorProduct {
        max_angular: usize,
        radial: RadialBasisSpec,
        #[serde(default = "serde_default_spline_accuracy")]
        spline_accuracy: Option<f64>,
    },
    Explicit {
        #[serde(deserialize_with = "deserialize_by_angular")]
        by_angular: BTreeMap<usize, RadialBasisSpec>,
        #[serde(default = "serde_default_spline_accuracy")]
        spline_accuracy: Option<f64>,
    },
    /// User-defined expansion basis, with the corresponding type name
    #[serde(skip)]
    Custom(String),
}

impl ExpansionBasisSpec {
    /// Classify an expansion basis trait object in one of the variants. The
    /// radial basis inside native expansion basis are classified as well.
    pub fn classify(basis: &dyn ExpansionBasis) -> ExpansionBasisSpec {
        let any = basis.as_any();
        if let Some(tensor) = any.downcast_ref::<TensorProduct>() {
            ExpansionBasisSpec::TensorProduct {
                max_angular: tensor.max_angular,
                radial: RadialBasisSpec::classify(&*tensor.radial),
                spline_accuracy: tensor.spline_accuracy,
            }
        } else if let Some(explicit) = any.downcast_ref::<Explicit>() {
            ExpansionBasisSpec::Explicit {
                by_angular: explicit.by_angular.iter()
                    .map(|(&angular, radial)| (angular, RadialBasisSpec::classify(&**radial)))
                    .collect(),
                spline_accuracy: explicit.spline_accuracy,
            }
        } else {
            ExpansionBasisSpec::Custom(short_type_name(basis.type_name()).to_owned())
        }
    }

    /// Get the name of this variant
    pub fn type_name(&self) -> &str {
        match self {
            ExpansionBasisSpec::TensorProduct { .. } => "TensorProduct",
            ExpansionBasisSpec::Explicit { .. } => "Explicit",
            ExpansionBasisSpec::Custom(name) => name,
        }
    }

    /// Get all radial basis nodes in this expansion basis, in the order they
    /// are validated: the shared radial basis for tensor product, and radial
    /// basis by increasing angular channel for explicit basis.
    pub fn radial_nodes(&self) -> Vec<&RadialBasisSpec> {
        match self {
            ExpansionBasisSpec::TensorProduct { radial, .. } => vec![radial],
            ExpansionBasisSpec::Explicit { by_angular, .. } => by_angular.values().collect(),
            ExpansionBasisSpec::Custom(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct MyCustomRadialBasis;
    impl RadialBasis for MyCustomRadialBasis {}

    #[derive(Debug)]
    struct MyCustomExpansionBasis;
    impl ExpansionBasis for MyCustomExpansionBasis {}

    #[test]
    fn classify() {
        let mut by_angular = BTreeMap::new();
        by_angular.insert(5, Box::new(Gto::new(2)) as Box<dyn RadialBasis>);
        by_angular.insert(3, Box::new(MyCustomRadialBasis) as Box<dyn RadialBasis>);
        let basis = Explicit::new(by_angular).with_spline_accuracy(None);

        let spec = ExpansionBasisSpec::classify(&basis);
        assert_eq!(spec.type_name(), "Explicit");
        assert_eq!(spec.radial_nodes(), [
            &RadialBasisSpec::Custom("MyCustomRadialBasis".into()),
            &RadialBasisSpec::Gto { max_radial: 2, radius: None },
        ]);

        let basis = TensorProduct::new(4, Gto::new(6).with_radius(3.0));
        assert_eq!(ExpansionBasisSpec::classify(&basis), ExpansionBasisSpec::TensorProduct {
            max_angular: 4,
            radial: RadialBasisSpec::Gto { max_radial: 6, radius: Some(3.0) },
            spline_accuracy: Some(1e-8),
        });

        let spec = ExpansionBasisSpec::classify(&MyCustomExpansionBasis);
        assert_eq!(spec, ExpansionBasisSpec::Custom("MyCustomExpansionBasis".into()));
        assert!(spec.radial_nodes().is_empty());
    }

    #[test]
    fn from_json() {
        let spec: ExpansionBasisSpec = serde_json::from_str(r#"{
            "type": "Explicit",
            "by_angular": {
                "3": {"type": "Gto", "max_radial": 5},
                "5": {"type": "Gto", "max_radial": 2}
            }
        }"#).unwrap();

        let mut by_angular = BTreeMap::new();
        by_angular.insert(3, RadialBasisSpec::Gto { max_radial: 5, radius: None });
        by_angular.insert(5, RadialBasisSpec::Gto { max_radial: 2, radius: None });
        assert_eq!(spec, ExpansionBasisSpec::Explicit { by_angular, spline_accuracy: Some(1e-8) });

        let spec: ExpansionBasisSpec = serde_json::from_str(r#"{
            "type": "TensorProduct",
            "max_angular": 3,
            "radial": {"type": "Gto", "max_radial": 5},
            "spline_accuracy": null
        }"#).unwrap();
        assert_eq!(spec.radial_nodes(), [&RadialBasisSpec::Gto { max_radial: 5, radius: None }]);

        let error = serde_json::from_str::<ExpansionBasisSpec>(r#"{
            "type": "TensorProduct",
            "radial": {"type": "Gto", "max_radial": 5}
        }"#).unwrap_err();
        assert!(error.to_string().contains("missing field `max_angular`"));

        let error = serde_json::from_str::<ExpansionBasisSpec>(r#"{
            "type": "TensorProduct",
            "max_angular": 3,
            "radial": {"type": "Gto", "max_radial": 5, "spline_accuracy": 1e-3}
        }"#).unwrap_err();
        assert!(error.to_string().contains("unknown field `spline_accuracy`"));
    }
}
