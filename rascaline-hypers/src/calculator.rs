use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::Error;
use crate::config::{CalculatorConfig, Hypers};
use crate::native::NativeHypers;
use crate::serializer::serialize;

/// The different native calculators accepting structured hyper parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CalculatorKind {
    SphericalExpansion,
    SphericalExpansionByPair,
    SoapPowerSpectrum,
    SoapRadialSpectrum,
    LodeSphericalExpansion,
}

static REGISTERED_CALCULATORS: Lazy<BTreeMap<&'static str, CalculatorKind>> = Lazy::new(|| {
    let mut map = BTreeMap::new();
    map.insert("spherical_expansion", CalculatorKind::SphericalExpansion);
    map.insert("spherical_expansion_by_pair", CalculatorKind::SphericalExpansionByPair);
    map.insert("soap_power_spectrum", CalculatorKind::SoapPowerSpectrum);
    map.insert("soap_radial_spectrum", CalculatorKind::SoapRadialSpectrum);
    map.insert("lode_spherical_expansion", CalculatorKind::LodeSphericalExpansion);
    return map;
});

impl CalculatorKind {
    /// Get the calculator kind registered with the given `name`
    pub fn from_name(name: &str) -> Result<CalculatorKind, Error> {
        match REGISTERED_CALCULATORS.get(name) {
            Some(&kind) => Ok(kind),
            None => Err(Error::InvalidParameter(
                format!("unknown calculator with name '{}'", name)
            )),
        }
    }

    /// Get the name of this calculator in the native engine
    pub fn name(self) -> &'static str {
        match self {
            CalculatorKind::SphericalExpansion => "spherical_expansion",
            CalculatorKind::SphericalExpansionByPair => "spherical_expansion_by_pair",
            CalculatorKind::SoapPowerSpectrum => "soap_power_spectrum",
            CalculatorKind::SoapRadialSpectrum => "soap_radial_spectrum",
            CalculatorKind::LodeSphericalExpansion => "lode_spherical_expansion",
        }
    }

    /// Does this calculator use the LODE hyper parameters? All other
    /// calculators use the SOAP ones.
    pub fn is_lode(self) -> bool {
        self == CalculatorKind::LodeSphericalExpansion
    }
}

/// The external engine running the actual calculations, receiving the
/// canonical JSON hyper parameters created by a [`Calculator`].
pub trait NativeEngine {
    /// Systems the engine can run calculations on
    type System: ?Sized;
    /// Result of a calculation
    type Output;

    /// Run the calculator with the given `name` and JSON `parameters` on
    /// `system`
    fn compute(&mut self, calculator: &str, parameters: &str, system: &Self::System) -> Result<Self::Output, Error>;
}

/// A calculator with validated hyper parameters, ready to be handed over to
/// a [`NativeEngine`].
#[derive(Debug, Clone)]
pub struct Calculator {
    kind: CalculatorKind,
    hypers: NativeHypers,
    parameters: String,
}

impl Calculator {
    /// Create a new calculator with the given `name` and `parameters`.
    ///
    /// The `parameters` should be a JSON object with the structured hyper
    /// parameters of this calculator. Using the old flat hyper parameters
    /// always fails with [`Error::DeprecatedHyperParameters`], which contains
    /// the equivalent code using structured hyper parameters.
    ///
    /// # Errors
    ///
    /// This function returns an error if there is no registered calculator with
    /// the given `name`, or if the parameters are invalid for this calculator.
    pub fn new(name: &str, parameters: String) -> Result<Calculator, Error> {
        let kind = CalculatorKind::from_name(name)?;

        let arguments = match serde_json::from_str::<serde_json::Value>(&parameters)? {
            serde_json::Value::Object(arguments) => arguments,
            other => {
                return Err(Error::InvalidParameter(format!(
                    "expected a JSON object for the parameters of {}, got {}", name, other
                )));
            }
        };

        crate::legacy::check(kind, &arguments)?;

        let config = CalculatorConfig::from_arguments(kind, serde_json::Value::Object(arguments))?;
        return Calculator::from_config(kind, &config);
    }

    /// Create a new calculator with the given `name`, using capability
    /// objects for the hyper parameters.
    ///
    /// # Errors
    ///
    /// This function returns an error if there is no registered calculator
    /// with the given `name`, if any of the capability objects can not be
    /// used with this calculator, or if the parameters values are invalid.
    pub fn with_hypers(name: &str, hypers: &Hypers) -> Result<Calculator, Error> {
        let kind = CalculatorKind::from_name(name)?;
        let config = CalculatorConfig::from_hypers(kind, hypers)?;
        return Calculator::from_config(kind, &config);
    }

    /// Create a new calculator of the given `kind` from an already parsed
    /// configuration
    pub fn from_config(kind: CalculatorKind, config: &CalculatorConfig) -> Result<Calculator, Error> {
        let hypers = serialize(kind, config)?;
        let parameters = hypers.to_json()?;

        return Ok(Calculator { kind, hypers, parameters });
    }

    /// Get the name of this calculator
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn kind(&self) -> CalculatorKind {
        self.kind
    }

    /// Get the canonical native hyper parameters of this calculator,
    /// formatted as JSON.
    pub fn parameters(&self) -> &str {
        &self.parameters
    }

    pub fn hypers(&self) -> &NativeHypers {
        &self.hypers
    }

    /// Run this calculator on `system` with the given `engine`
    pub fn compute<E: NativeEngine>(&self, engine: &mut E, system: &E::System) -> Result<E::Output, Error> {
        log::debug!("running {} in the native engine", self.name());
        return engine.compute(self.name(), &self.parameters, system);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry() {
        for &name in REGISTERED_CALCULATORS.keys() {
            assert_eq!(CalculatorKind::from_name(name).unwrap().name(), name);
        }

        let error = CalculatorKind::from_name("sorted_distances").unwrap_err();
        assert_eq!(error.to_string(), "invalid parameter: unknown calculator with name 'sorted_distances'");

        assert!(CalculatorKind::LodeSphericalExpansion.is_lode());
        assert!(!CalculatorKind::SoapRadialSpectrum.is_lode());
    }

    #[test]
    fn not_an_object() {
        let error = Calculator::new("spherical_expansion", "[3.4]".into()).unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid parameter: expected a JSON object for the parameters of spherical_expansion, got [3.4]"
        );

        let error = Calculator::new("spherical_expansion", "{\"cutoff\": ".into()).unwrap_err();
        assert!(matches!(error, Error::Json(_)));
    }

    struct EchoEngine;

    impl NativeEngine for EchoEngine {
        type System = str;
        type Output = String;

        fn compute(&mut self, calculator: &str, parameters: &str, system: &str) -> Result<String, Error> {
            if system.is_empty() {
                return Err(Error::External("empty system".into()));
            }
            Ok(format!("{}|{}|{}", calculator, system, parameters.len()))
        }
    }

    #[test]
    fn compute() {
        let calculator = Calculator::new("soap_radial_spectrum", r#"{
            "cutoff": {"radius": 3.0},
            "density": {"type": "Gaussian", "width": 0.5},
            "basis": {"type": "TensorProduct", "max_angular": 0, "radial": {"type": "Gto", "max_radial": 4}}
        }"#.to_owned()).unwrap();

        assert_eq!(calculator.kind(), CalculatorKind::SoapRadialSpectrum);
        let output = calculator.compute(&mut EchoEngine, "water").unwrap();
        assert_eq!(output, format!("soap_radial_spectrum|water|{}", calculator.parameters().len()));

        let error = calculator.compute(&mut EchoEngine, "").unwrap_err();
        assert_eq!(error.to_string(), "error from the native engine: empty system");
    }
}
