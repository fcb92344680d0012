use crate::Error;

/// Definition of the local environment cutoff
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Cutoff {
    /// Radius of the spherical cutoff to use for atomic environments
    pub radius: f64,
    /// Cutoff function used to smooth the behavior around the cutoff radius
    pub smoothing: Smoothing,
}

/// Possible values for the smoothing cutoff function
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
#[serde(tag = "type")]
pub enum Smoothing {
    /// Shifted cosine switching function
    /// `f(r) = 1/2 * (1 + cos(π (r - cutoff + width) / width ))`
    ShiftedCosine {
        width: f64,
    },
    /// Step function, 1 if `r < cutoff` and 0 if `r >= cutoff`
    Step {},
}

impl Cutoff {
    pub fn validate(&self) -> Result<(), Error> {
        if self.radius <= 0.0 || !self.radius.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "expected positive cutoff radius, got {}",
                self.radius
            )));
        }

        match self.smoothing {
            Smoothing::Step {} => {},
            Smoothing::ShiftedCosine { width } => {
                if width <= 0.0 || !width.is_finite() {
                    return Err(Error::InvalidParameter(format!(
                        "expected positive width for shifted cosine cutoff function, got {}",
                        width
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
        let cutoff = Cutoff { radius: 3.4, smoothing: Smoothing::Step {} };
        assert_eq!(
            serde_json::to_string(&cutoff).unwrap(),
            r#"{"radius":3.4,"smoothing":{"type":"Step"}}"#
        );

        let cutoff: Cutoff = serde_json::from_str(
            r#"{"radius": 3.4, "smoothing": {"type": "ShiftedCosine", "width": 0.5}}"#
        ).unwrap();
        assert_eq!(cutoff.smoothing, Smoothing::ShiftedCosine { width: 0.5 });

        let error = serde_json::from_str::<Cutoff>(
            r#"{"radius": 3.4, "smoothing": {"type": "Step", "width": 0.5}}"#
        ).unwrap_err();
        assert!(error.to_string().contains("unknown field `width`"));
    }

    #[test]
    fn validate() {
        let cutoff = Cutoff { radius: -1.0, smoothing: Smoothing::Step {} };
        assert_eq!(
            cutoff.validate().unwrap_err().to_string(),
            "invalid parameter: expected positive cutoff radius, got -1"
        );

        let cutoff = Cutoff { radius: 3.0, smoothing: Smoothing::ShiftedCosine { width: 0.0 } };
        assert_eq!(
            cutoff.validate().unwrap_err().to_string(),
            "invalid parameter: expected positive width for shifted cosine cutoff function, got 0"
        );

        let cutoff = Cutoff { radius: 3.0, smoothing: Smoothing::ShiftedCosine { width: 0.5 } };
        assert!(cutoff.validate().is_ok());
    }

    #[test]
    fn non_finite() {
        let cutoff = Cutoff { radius: f64::NAN, smoothing: Smoothing::Step {} };
        assert_eq!(
            cutoff.validate().unwrap_err().to_string(),
            "invalid parameter: expected positive cutoff radius, got NaN"
        );

        let cutoff = Cutoff { radius: f64::INFINITY, smoothing: Smoothing::Step {} };
        assert!(cutoff.validate().is_err());

        let cutoff = Cutoff { radius: 3.0, smoothing: Smoothing::ShiftedCosine { width: f64::NAN } };
        assert_eq!(
            cutoff.validate().unwrap_err().to_string(),
            "invalid parameter: expected positive width for shifted cosine cutoff function, got NaN"
        );
    }
}
