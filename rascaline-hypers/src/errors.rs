use crate::native::NativeHypers;

/// The different families of capabilities that can be given to a calculator.
/// Each family is a closed set of native variants, plus user-defined ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityFamily {
    /// Smoothing function applied close to the cutoff radius
    Smoothing,
    /// Radial scaling of the atomic density
    Scaling,
    /// Atomic density
    AtomicDensity,
    /// Full set of basis functions (radial and angular)
    ExpansionBasis,
    /// Radial basis functions
    RadialBasis,
}

impl CapabilityFamily {
    /// Get a human readable name for this family
    pub fn name(self) -> &'static str {
        match self {
            CapabilityFamily::Smoothing => "smoothing",
            CapabilityFamily::Scaling => "scaling",
            CapabilityFamily::AtomicDensity => "atomic density",
            CapabilityFamily::ExpansionBasis => "expansion basis",
            CapabilityFamily::RadialBasis => "radial basis",
        }
    }

    /// Does using a non-native variant of this family require a spliner?
    pub fn needs_spliner(self) -> bool {
        match self {
            CapabilityFamily::Smoothing | CapabilityFamily::Scaling => false,
            CapabilityFamily::AtomicDensity |
            CapabilityFamily::ExpansionBasis |
            CapabilityFamily::RadialBasis => true,
        }
    }
}

/// Error emitted when part of a configuration can not be expressed with the
/// hyper parameters of the native calculators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedVariant {
    /// family of the offending node
    pub family: CapabilityFamily,
    /// name of the offending type, without module path
    pub type_name: String,
    /// Name of the calculator rejecting this variant. This is `None` for
    /// custom variants, which no native calculator supports.
    pub calculator: Option<&'static str>,
}

impl UnsupportedVariant {
    pub(crate) fn custom(family: CapabilityFamily, type_name: &str) -> UnsupportedVariant {
        UnsupportedVariant {
            family,
            type_name: type_name.to_owned(),
            calculator: None,
        }
    }

    pub(crate) fn in_calculator(family: CapabilityFamily, type_name: &str, calculator: &'static str) -> UnsupportedVariant {
        UnsupportedVariant {
            family,
            type_name: type_name.to_owned(),
            calculator: Some(calculator),
        }
    }

    /// Suggested way to use this variant anyway, if any
    pub fn remedy(&self) -> Option<&'static str> {
        if self.family.needs_spliner() {
            Some("It should be used through one of the spliner class instead of directly")
        } else {
            None
        }
    }
}

impl std::fmt::Display for UnsupportedVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.family {
            CapabilityFamily::Smoothing => write!(f, "this smoothing function")?,
            CapabilityFamily::Scaling => write!(f, "this density scaling")?,
            CapabilityFamily::AtomicDensity => write!(f, "This density")?,
            CapabilityFamily::ExpansionBasis => write!(f, "This basis functions set")?,
            CapabilityFamily::RadialBasis => write!(f, "This radial basis function")?,
        }

        write!(f, " ({}) does not have matching hyper parameters in the native ", self.type_name)?;
        match self.calculator {
            Some(calculator) => write!(f, "{} calculator", calculator)?,
            None => write!(f, "calculators")?,
        }

        if let Some(remedy) = self.remedy() {
            write!(f, ". {}", remedy)?;
        }

        Ok(())
    }
}

impl std::error::Error for UnsupportedVariant {}

const DEPRECATED_MESSAGE: &str = "hyper parameter changed recently, please update your code.";

/// Error emitted for every call using the old, flat hyper parameters. When
/// possible, this carries the equivalent structured parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct DeprecatedHyperParameters {
    /// name of the calculator that was created with legacy parameters
    pub calculator: String,
    /// equivalent structured parameters, if the legacy parameters could be
    /// translated
    pub parameters: Option<NativeHypers>,
    /// reason why the translation failed, if it did
    pub reason: Option<String>,
}

impl DeprecatedHyperParameters {
    /// Get Rust code creating the same calculator with the structured hyper
    /// parameters, if the translation succeeded.
    pub fn code(&self) -> Option<String> {
        let parameters = self.parameters.as_ref()?;
        let json = serde_json::to_string_pretty(parameters).expect(
            "native hyper parameters only contain string keys and should always serialize"
        );
        Some(format!(
            "Calculator::new(\"{}\", r#\"{}\"#.to_owned())",
            self.calculator, json
        ))
    }
}

impl std::fmt::Display for DeprecatedHyperParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code() {
            Some(code) => {
                write!(f, "{} Here are the new equivalent parameters:\n{}", DEPRECATED_MESSAGE, code)
            }
            None => {
                write!(f, "{} ", DEPRECATED_MESSAGE)?;
                match self.reason {
                    Some(ref reason) => write!(f, "{}", reason),
                    None => write!(f, "see the documentation for the new parameters"),
                }
            }
        }
    }
}

impl std::error::Error for DeprecatedHyperParameters {}


#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// Got an invalid parameter value in a function
    InvalidParameter(String),
    /// Error while serializing/deserializing data
    Json(serde_json::Error),
    /// The hyper parameters use the old flat format
    DeprecatedHyperParameters(DeprecatedHyperParameters),
    /// Part of the hyper parameters can not be used by the native calculators
    UnsupportedVariant(UnsupportedVariant),
    /// Error from the native engine receiving the hyper parameters
    External(String),
    /// Error used for failed internal consistency check, i.e. bugs in
    /// rascaline-hypers.
    Internal(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidParameter(e) => write!(f, "invalid parameter: {}", e),
            Error::Json(e) => write!(f, "json error: {}", e),
            Error::DeprecatedHyperParameters(e) => write!(f, "{}", e),
            Error::UnsupportedVariant(e) => write!(f, "{}", e),
            Error::External(e) => write!(f, "error from the native engine: {}", e),
            Error::Internal(e) => {
                write!(f, "internal rascaline-hypers error (this is likely a bug, please report it): {}", e)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidParameter(_) |
            Error::External(_) |
            Error::Internal(_) => None,
            Error::Json(e) => Some(e),
            Error::DeprecatedHyperParameters(e) => Some(e),
            Error::UnsupportedVariant(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::Json(error)
    }
}

impl From<UnsupportedVariant> for Error {
    fn from(error: UnsupportedVariant) -> Error {
        Error::UnsupportedVariant(error)
    }
}

impl From<DeprecatedHyperParameters> for Error {
    fn from(error: DeprecatedHyperParameters) -> Error {
        Error::DeprecatedHyperParameters(error)
    }
}
