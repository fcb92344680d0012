//! Detection and translation of the old, flat hyper parameters.
//!
//! Calculators used to take all their hyper parameters as a flat set of
//! keys (`cutoff`, `max_radial`, `atomic_gaussian_width`, ...). These are no
//! longer accepted: any call using them fails with
//! [`DeprecatedHyperParameters`], carrying the equivalent structured hyper
//! parameters when the translation is possible.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::calculator::CalculatorKind;
use crate::errors::DeprecatedHyperParameters;

use crate::native::{NativeHypers, SoapHypers, LodeHypers};
use crate::native::{Cutoff, Smoothing, Density, DensityKind, DensityScaling};
use crate::native::{SphericalExpansionBasis, TensorProductBasis};
use crate::native::{SoapRadialBasis, LodeRadialBasis, serde_default_spline_accuracy};

/// Keys that only exist in the flat hyper parameters. `cutoff` is also
/// legacy when given as a number, and `k_cutoff` is valid in both forms.
const LEGACY_KEYS: &[&str] = &[
    "atomic_gaussian_width",
    "cutoff_function",
    "radial_basis",
    "radial_scaling",
    "potential_exponent",
    "max_radial",
    "max_angular",
    "center_atom_weight",
    "gradients",
];

/// Does this set of keyword arguments use the flat hyper parameters?
pub fn is_legacy(arguments: &Map<String, Value>) -> bool {
    if arguments.get("cutoff").map_or(false, Value::is_number) {
        return true;
    }

    return LEGACY_KEYS.iter().any(|key| arguments.contains_key(*key));
}

/// Reject flat hyper parameters. This returns `Ok(())` only if `arguments`
/// does not contain any legacy key, and an error explaining how to update
/// the code otherwise.
pub fn check(kind: CalculatorKind, arguments: &Map<String, Value>) -> Result<(), DeprecatedHyperParameters> {
    if !is_legacy(arguments) {
        return Ok(());
    }

    let error = match translate(kind, arguments) {
        Ok(parameters) => {
            log::warn!("translated legacy hyper parameters for {}", kind.name());
            DeprecatedHyperParameters {
                calculator: kind.name().to_owned(),
                parameters: Some(parameters),
                reason: None,
            }
        }
        Err(reason) => {
            log::warn!("could not translate legacy hyper parameters for {}: {}", kind.name(), reason);
            DeprecatedHyperParameters {
                calculator: kind.name().to_owned(),
                parameters: None,
                reason: Some(reason),
            }
        }
    };

    return Err(error);
}

/// Translate flat hyper parameters to the equivalent native ones. On
/// failure, the error explains why the translation is not possible.
pub fn translate(kind: CalculatorKind, arguments: &Map<String, Value>) -> Result<NativeHypers, String> {
    let arguments = Value::Object(arguments.clone());
    if kind.is_lode() {
        let legacy = serde_json::from_value::<LegacyLodeHypers>(arguments).map_err(|e| {
            format!("could not translate the legacy hyper parameters: {}", e)
        })?;
        return legacy.translate().map(NativeHypers::Lode);
    }

    let legacy = serde_json::from_value::<LegacySoapHypers>(arguments).map_err(|e| {
        format!("could not translate the legacy hyper parameters: {}", e)
    })?;
    return legacy.translate().map(NativeHypers::Soap);
}

fn default_center_atom_weight() -> f64 { 1.0 }

/// Flat hyper parameters of all SOAP calculators
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LegacySoapHypers {
    cutoff: f64,
    max_radial: usize,
    max_angular: usize,
    atomic_gaussian_width: f64,
    #[serde(default = "default_center_atom_weight")]
    center_atom_weight: f64,
    /// no cutoff function is the same as a step function
    #[serde(default)]
    cutoff_function: Option<LegacyCutoffFunction>,
    #[serde(default)]
    radial_basis: Option<LegacyRadialBasis>,
    #[serde(default)]
    radial_scaling: Option<LegacyRadialScaling>,
    #[serde(default)]
    gradients: Option<bool>,
}

impl LegacySoapHypers {
    fn translate(self) -> Result<SoapHypers, String> {
        warn_gradients(self.gradients);

        let (max_radial, spline_accuracy) = LegacyRadialBasis::translate(self.radial_basis, self.max_radial)?;

        return Ok(SoapHypers {
            cutoff: Cutoff {
                radius: self.cutoff,
                smoothing: self.cutoff_function.map_or(Smoothing::Step {}, LegacyCutoffFunction::translate),
            },
            density: Density {
                kind: DensityKind::Gaussian { width: self.atomic_gaussian_width },
                scaling: self.radial_scaling.and_then(LegacyRadialScaling::translate),
                center_atom_weight: self.center_atom_weight,
            },
            basis: SphericalExpansionBasis::TensorProduct(TensorProductBasis {
                max_angular: self.max_angular,
                radial: SoapRadialBasis::Gto { max_radial, radius: None },
                spline_accuracy,
            }),
        });
    }
}

/// Flat hyper parameters of the LODE spherical expansion
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LegacyLodeHypers {
    cutoff: f64,
    max_radial: usize,
    max_angular: usize,
    atomic_gaussian_width: f64,
    potential_exponent: usize,
    #[serde(default = "default_center_atom_weight")]
    center_atom_weight: f64,
    #[serde(default)]
    cutoff_function: Option<LegacyCutoffFunction>,
    #[serde(default)]
    radial_basis: Option<LegacyRadialBasis>,
    #[serde(default)]
    radial_scaling: Option<LegacyRadialScaling>,
    #[serde(default)]
    k_cutoff: Option<f64>,
    #[serde(default)]
    gradients: Option<bool>,
}

impl LegacyLodeHypers {
    fn translate(self) -> Result<LodeHypers, String> {
        warn_gradients(self.gradients);
        if self.cutoff_function.is_some() {
            log::warn!("'cutoff_function' is not used by LODE and was dropped from the hyper parameters");
        }

        let (max_radial, spline_accuracy) = LegacyRadialBasis::translate(self.radial_basis, self.max_radial)?;

        return Ok(LodeHypers {
            k_cutoff: self.k_cutoff,
            density: Density {
                kind: DensityKind::SmearedPowerLaw {
                    smearing: self.atomic_gaussian_width,
                    exponent: self.potential_exponent,
                },
                scaling: self.radial_scaling.and_then(LegacyRadialScaling::translate),
                center_atom_weight: self.center_atom_weight,
            },
            basis: SphericalExpansionBasis::TensorProduct(TensorProductBasis {
                max_angular: self.max_angular,
                radial: LodeRadialBasis::Gto { max_radial, radius: self.cutoff },
                spline_accuracy,
            }),
        });
    }
}

fn warn_gradients(gradients: Option<bool>) {
    if gradients.is_some() {
        log::warn!("'gradients' is no longer a hyper parameter, request gradients when calling compute instead");
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
enum LegacyCutoffFunction {
    ShiftedCosine { width: f64 },
    Step {},
}

impl LegacyCutoffFunction {
    fn translate(self) -> Smoothing {
        match self {
            LegacyCutoffFunction::ShiftedCosine { width } => Smoothing::ShiftedCosine { width },
            LegacyCutoffFunction::Step {} => Smoothing::Step {},
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
enum LegacyRadialScaling {
    None {},
    Willatt2018 { scale: f64, rate: f64, exponent: f64 },
}

impl LegacyRadialScaling {
    fn translate(self) -> Option<DensityScaling> {
        match self {
            LegacyRadialScaling::None {} => None,
            LegacyRadialScaling::Willatt2018 { scale, rate, exponent } => {
                Some(DensityScaling::Willatt2018 { scale, rate, exponent })
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
enum LegacyRadialBasis {
    Gto {
        #[serde(default)]
        spline_accuracy: Option<f64>,
        #[serde(default)]
        splined_radial_integral: Option<bool>,
    },
    SplinedGto {
        accuracy: f64,
    },
}

impl LegacyRadialBasis {
    /// Get the structured `max_radial` and basis `spline_accuracy`
    /// corresponding to a legacy radial basis with `max_radial` functions.
    /// A missing radial basis is the same as `Gto {}`.
    fn translate(radial: Option<LegacyRadialBasis>, max_radial: usize) -> Result<(usize, Option<f64>), String> {
        let radial = radial.unwrap_or(LegacyRadialBasis::Gto {
            spline_accuracy: None,
            splined_radial_integral: None,
        });

        match radial {
            LegacyRadialBasis::Gto { spline_accuracy, splined_radial_integral } => {
                let spline_accuracy = if splined_radial_integral == Some(false) {
                    None
                } else {
                    spline_accuracy.or_else(serde_default_spline_accuracy)
                };
                return Ok((gto_max_radial(max_radial)?, spline_accuracy));
            }
            LegacyRadialBasis::SplinedGto { accuracy } => {
                return Ok((gto_max_radial(max_radial)?, Some(accuracy)));
            }
        }
    }
}

/// Legacy `max_radial` is the number of GTO functions, the structured one is
/// the index of the last function.
fn gto_max_radial(legacy: usize) -> Result<usize, String> {
    legacy.checked_sub(1).ok_or_else(|| {
        "legacy max_radial must be at least 1, it was the number of radial basis functions".to_owned()
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn detection() {
        assert!(is_legacy(&object(json!({"cutoff": 3.4}))));
        assert!(is_legacy(&object(json!({"max_radial": 3}))));
        assert!(is_legacy(&object(json!({"gradients": false}))));

        assert!(!is_legacy(&object(json!({"cutoff": {"radius": 3.4}}))));
        assert!(!is_legacy(&object(json!({"k_cutoff": 3.0}))));
        assert!(!is_legacy(&Map::new()));

        let structured = object(json!({"cutoff": {"radius": 3.4}, "density": {}, "basis": {}}));
        assert!(check(CalculatorKind::SphericalExpansion, &structured).is_ok());
    }

    #[test]
    fn soap() {
        let arguments = object(json!({
            "cutoff": 3.4,
            "max_radial": 3,
            "max_angular": 5,
            "atomic_gaussian_width": 0.3,
            "center_atom_weight": 0.5,
            "cutoff_function": {"ShiftedCosine": {"width": 0.5}},
            "radial_scaling": {"Willatt2018": {"scale": 1.5, "rate": 0.8, "exponent": 2.0}},
            "gradients": true,
        }));

        let hypers = translate(CalculatorKind::SphericalExpansion, &arguments).unwrap();
        assert_eq!(hypers, NativeHypers::Soap(SoapHypers {
            cutoff: Cutoff { radius: 3.4, smoothing: Smoothing::ShiftedCosine { width: 0.5 } },
            density: Density {
                kind: DensityKind::Gaussian { width: 0.3 },
                scaling: Some(DensityScaling::Willatt2018 { scale: 1.5, rate: 0.8, exponent: 2.0 }),
                center_atom_weight: 0.5,
            },
            basis: SphericalExpansionBasis::TensorProduct(TensorProductBasis {
                max_angular: 5,
                radial: SoapRadialBasis::Gto { max_radial: 2, radius: None },
                spline_accuracy: Some(1e-8),
            }),
        }));
    }

    #[test]
    fn no_radial_scaling() {
        let arguments = object(json!({
            "cutoff": 3.4,
            "max_radial": 3,
            "max_angular": 5,
            "atomic_gaussian_width": 0.3,
            "radial_scaling": {"None": {}},
        }));

        match translate(CalculatorKind::SoapPowerSpectrum, &arguments) {
            Ok(NativeHypers::Soap(hypers)) => assert_eq!(hypers.density.scaling, None),
            other => panic!("unexpected translation: {:?}", other),
        }

        let error = check(CalculatorKind::SoapPowerSpectrum, &arguments).unwrap_err();
        assert!(error.code().unwrap().contains("\"scaling\": null"));
    }

    #[test]
    fn radial_basis() {
        let with_radial_basis = |radial_basis: Value| {
            let arguments = object(json!({
                "cutoff": 3.4,
                "max_radial": 6,
                "max_angular": 5,
                "atomic_gaussian_width": 0.3,
                "cutoff_function": {"Step": {}},
                "radial_basis": radial_basis,
            }));

            match translate(CalculatorKind::SoapRadialSpectrum, &arguments) {
                Ok(NativeHypers::Soap(hypers)) => {
                    assert_eq!(hypers.basis.radial_basis()[0].1, &SoapRadialBasis::Gto { max_radial: 5, radius: None });
                    assert_eq!(hypers.cutoff.smoothing, Smoothing::Step {});
                    hypers.basis.spline_accuracy()
                }
                other => panic!("unexpected translation: {:?}", other),
            }
        };

        assert_eq!(with_radial_basis(json!({"Gto": {}})), Some(1e-8));
        assert_eq!(with_radial_basis(json!({"Gto": {"spline_accuracy": 1e-5}})), Some(1e-5));
        assert_eq!(with_radial_basis(json!({"Gto": {"splined_radial_integral": false}})), None);
        assert_eq!(with_radial_basis(json!({"Gto": {"splined_radial_integral": true}})), Some(1e-8));
        assert_eq!(with_radial_basis(json!({"SplinedGto": {"accuracy": 1e-4}})), Some(1e-4));
    }

    #[test]
    fn lode() {
        let arguments = object(json!({
            "cutoff": 3.4,
            "max_radial": 3,
            "max_angular": 5,
            "atomic_gaussian_width": 0.3,
            "center_atom_weight": 0.5,
            "potential_exponent": 3,
            "cutoff_function": {"ShiftedCosine": {"width": 0.5}},
            "k_cutoff": 26.2,
        }));

        let hypers = translate(CalculatorKind::LodeSphericalExpansion, &arguments).unwrap();
        assert_eq!(hypers, NativeHypers::Lode(LodeHypers {
            k_cutoff: Some(26.2),
            density: Density {
                kind: DensityKind::SmearedPowerLaw { smearing: 0.3, exponent: 3 },
                scaling: None,
                center_atom_weight: 0.5,
            },
            basis: SphericalExpansionBasis::TensorProduct(TensorProductBasis {
                max_angular: 5,
                radial: LodeRadialBasis::Gto { max_radial: 2, radius: 3.4 },
                spline_accuracy: Some(1e-8),
            }),
        }));
    }

    #[test]
    fn untranslatable() {
        let arguments = object(json!({
            "cutoff": 3.4,
            "max_radial": 0,
            "max_angular": 5,
            "atomic_gaussian_width": 0.3,
            "cutoff_function": {"Step": {}},
        }));
        let error = check(CalculatorKind::SoapPowerSpectrum, &arguments).unwrap_err();
        assert_eq!(error.parameters, None);
        assert_eq!(
            error.to_string(),
            "hyper parameter changed recently, please update your code. legacy \
            max_radial must be at least 1, it was the number of radial basis functions"
        );

        let arguments = object(json!({
            "cutoff": 3.4,
            "max_radial": 3,
            "max_angular": 5,
            "atomic_gaussian_width": 0.3,
            "cutoff_function": {"Step": {}},
            "radial_basis": {"Tabulated": {"file": "basis.npy"}},
        }));
        let error = check(CalculatorKind::SphericalExpansion, &arguments).unwrap_err();
        assert!(error.code().is_none());
        assert!(error.reason.unwrap().contains("unknown variant `Tabulated`"));

        // missing required legacy key
        let arguments = object(json!({"cutoff": 3.4, "max_radial": 3}));
        let error = check(CalculatorKind::SphericalExpansion, &arguments).unwrap_err();
        assert!(error.reason.unwrap().contains("missing field"));
    }

    #[test]
    fn generated_code() {
        let arguments = object(json!({
            "cutoff": 3.4,
            "max_radial": 3,
            "max_angular": 5,
            "atomic_gaussian_width": 0.3,
            "cutoff_function": {"Step": {}},
        }));

        let error = check(CalculatorKind::SphericalExpansion, &arguments).unwrap_err();
        let code = error.code().unwrap();
        assert!(code.starts_with("Calculator::new(\"spherical_expansion\", r#\"{\n"));
        assert!(code.ends_with("}\"#.to_owned())"));
        assert!(code.contains("\"max_radial\": 2"));

        let message = error.to_string();
        let mut lines = message.lines();
        assert_eq!(
            lines.next(),
            Some("hyper parameter changed recently, please update your code. Here are the new equivalent parameters:")
        );
        assert_eq!(lines.next(), Some("Calculator::new(\"spherical_expansion\", r#\"{"));
    }
}
