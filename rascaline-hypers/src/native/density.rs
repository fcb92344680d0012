use crate::Error;


/// Definition of the (atomic) density to expand on a basis
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
pub struct Density {
    #[serde(flatten)] // because of this flatten, we can not use deny_unknown_fields
    pub kind: DensityKind,
    /// radial scaling can be used to reduce the importance of neighbor atoms
    /// further away from the center, usually improving the performance of the
    /// model
    #[serde(default)]
    pub scaling: Option<DensityScaling>,
    /// Weight of the central atom contribution to the density. If `1` the
    /// center atom contribution is weighted the same as any other contribution.
    /// If `0` the central atom does not contribute to the density at all.
    #[serde(default = "serde_default_center_atom_weight")]
    pub center_atom_weight: f64,
}

fn serde_default_center_atom_weight() -> f64 {
    return 1.0;
}


/// Different kinds of atomic density the native calculators can use directly
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(tag = "type")]
pub enum DensityKind {
    /// Gaussian atomic density `exp(-r^2/width^2)`
    Gaussian {
        /// Width of the gaussian, the same width is used for all atoms
        width: f64
    },
    /// Smeared power law density, that behaves like `1 / r^p` as `r` goes to
    /// infinity, while removing any singularity at `r=0` and ensuring the
    /// density is differentiable everywhere.
    ///
    /// The density functional form is `f(r) = 1 / Γ(p/2) * γ(p/2, r^2/(2 σ^2))
    /// / r^p`, with σ the smearing width, Γ the Gamma function and γ the lower
    /// incomplete gamma function.
    SmearedPowerLaw {
        /// Smearing width of the density (`σ`)
        smearing: f64,
        /// Exponent of the density (`p`)
        exponent: usize
    },
}

/// Implemented options for radial scaling of the atomic density around an atom
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
#[serde(tag = "type")]
pub enum DensityScaling {
    /// Use a long-range algebraic decay and smooth behavior at `r → 0` as
    /// introduced in <https://doi.org/10.1039/C8CP05921G>:
    /// `f(r) = rate / (rate + (r / scale) ^ exponent)`
    Willatt2018 {
        /// see in the formula
        scale: f64,
        /// see in the formula
        rate: f64,
        /// see in the formula
        exponent: f64,
    },
}

impl Density {
    pub fn validate(&self) -> Result<(), Error> {
        match self.kind {
            DensityKind::Gaussian { width } => {
                if width <= 0.0 || !width.is_finite() {
                    return Err(Error::InvalidParameter(format!(
                        "expected positive width for Gaussian density, got {}",
                        width
                    )));
                }
            }
            DensityKind::SmearedPowerLaw { smearing, .. } => {
                if smearing <= 0.0 || !smearing.is_finite() {
                    return Err(Error::InvalidParameter(format!(
                        "expected positive smearing for SmearedPowerLaw density, got {}",
                        smearing
                    )));
                }
            }
        }

        if !(0.0..=1.0).contains(&self.center_atom_weight) {
            return Err(Error::InvalidParameter(format!(
                "expected center_atom_weight between 0 and 1, got {}",
                self.center_atom_weight
            )));
        }

        if let Some(scaling) = self.scaling {
            scaling.validate()?;
        }

        return Ok(());
    }
}

impl DensityScaling {
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            DensityScaling::Willatt2018 { scale, rate, exponent } => {
                if *scale <= 0.0 || !scale.is_finite() {
                    return Err(Error::InvalidParameter(format!(
                        "expected positive scale for Willatt2018 radial scaling function, got {}",
                        scale
                    )));
                }

                if *rate <= 0.0 || !rate.is_finite() {
                    return Err(Error::InvalidParameter(format!(
                        "expected positive rate for Willatt2018 radial scaling function, got {}",
                        rate
                    )));
                }

                if *exponent <= 0.0 || !exponent.is_finite() {
                    return Err(Error::InvalidParameter(format!(
                        "expected positive exponent for Willatt2018 radial scaling function, got {}",
                        exponent
                    )));
                }
            }
        }
        return Ok(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json() {
        let density = Density {
            kind: DensityKind::Gaussian { width: 0.3 },
            scaling: None,
            center_atom_weight: 0.5,
        };

        assert_eq!(
            serde_json::to_string(&density).unwrap(),
            r#"{"type":"Gaussian","width":0.3,"scaling":null,"center_atom_weight":0.5}"#
        );

        let density: Density = serde_json::from_str(r#"{"type": "SmearedPowerLaw", "smearing": 1.2, "exponent": 3}"#).unwrap();
        assert_eq!(density.kind, DensityKind::SmearedPowerLaw { smearing: 1.2, exponent: 3 });
        assert_eq!(density.center_atom_weight, 1.0);
        assert_eq!(density.scaling, None);
    }

    #[test]
    fn validate() {
        let mut density = Density {
            kind: DensityKind::Gaussian { width: 0.3 },
            scaling: Some(DensityScaling::Willatt2018 { scale: 1.0, rate: 2.0, exponent: 3.0 }),
            center_atom_weight: 1.0,
        };
        assert!(density.validate().is_ok());

        density.center_atom_weight = 1.5;
        assert_eq!(
            density.validate().unwrap_err().to_string(),
            "invalid parameter: expected center_atom_weight between 0 and 1, got 1.5"
        );

        density.center_atom_weight = 0.0;
        density.scaling = Some(DensityScaling::Willatt2018 { scale: 1.0, rate: -2.0, exponent: 3.0 });
        assert_eq!(
            density.validate().unwrap_err().to_string(),
            "invalid parameter: expected positive rate for Willatt2018 radial scaling function, got -2"
        );

        density.scaling = None;
        density.kind = DensityKind::SmearedPowerLaw { smearing: 0.0, exponent: 1 };
        assert_eq!(
            density.validate().unwrap_err().to_string(),
            "invalid parameter: expected positive smearing for SmearedPowerLaw density, got 0"
        );
    }

    #[test]
    fn non_finite() {
        let mut density = Density {
            kind: DensityKind::Gaussian { width: f64::NAN },
            scaling: None,
            center_atom_weight: 1.0,
        };
        assert_eq!(
            density.validate().unwrap_err().to_string(),
            "invalid parameter: expected positive width for Gaussian density, got NaN"
        );

        density.kind = DensityKind::SmearedPowerLaw { smearing: f64::INFINITY, exponent: 1 };
        assert_eq!(
            density.validate().unwrap_err().to_string(),
            "invalid parameter: expected positive smearing for SmearedPowerLaw density, got inf"
        );

        density.kind = DensityKind::Gaussian { width: 0.3 };
        density.scaling = Some(DensityScaling::Willatt2018 { scale: f64::NAN, rate: 1.0, exponent: 3.0 });
        assert!(density.validate().is_err());

        density.scaling = None;
        density.center_atom_weight = f64::NAN;
        assert!(density.validate().is_err());
    }
}
