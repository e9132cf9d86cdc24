use serde::{Deserialize, Serialize};

use super::{ArtifactError, FeatureScaler, Matrix, PredictionError};

// ---------------------------------------------------------------------------
// Scaler artifact
// ---------------------------------------------------------------------------

/// A fitted per-column affine transform.
///
/// JSON layout (tagged by `kind`):
///
/// ```json
/// { "kind": "standard", "mean": [..], "scale": [..] }
/// { "kind": "min_max",  "min":  [..], "scale": [..] }
/// ```
///
/// `standard` computes `(x - mean) / scale`, `min_max` computes
/// `x * scale + min`, matching the fitted attributes exported from a
/// standard/min-max scaler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerArtifact {
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}

impl ScalerArtifact {
    /// Check shapes and values once, at load time.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        let (offset, scale) = match self {
            ScalerArtifact::Standard { mean, scale } => (mean, scale),
            ScalerArtifact::MinMax { min, scale } => (min, scale),
        };
        if offset.is_empty() || offset.len() != scale.len() {
            return Err(invalid(format!(
                "parameter lengths {} and {} must be equal and non-zero",
                offset.len(),
                scale.len()
            )));
        }
        if let Some(i) = offset.iter().chain(scale).position(|v| !v.is_finite()) {
            return Err(invalid(format!("parameter {i} is not finite")));
        }
        if let ScalerArtifact::Standard { scale, .. } = self {
            if let Some(i) = scale.iter().position(|s| *s == 0.0) {
                return Err(invalid(format!("scale of column {i} is zero")));
            }
        }
        Ok(())
    }
}

fn invalid(reason: String) -> ArtifactError {
    ArtifactError::Invalid {
        what: "scaler",
        reason,
    }
}

impl FeatureScaler for ScalerArtifact {
    fn n_features(&self) -> usize {
        match self {
            ScalerArtifact::Standard { mean, .. } => mean.len(),
            ScalerArtifact::MinMax { min, .. } => min.len(),
        }
    }

    fn transform(&self, input: &Matrix) -> Result<Matrix, PredictionError> {
        input.expect_cols(self.n_features())?;
        let out = match self {
            ScalerArtifact::Standard { mean, scale } => input.map_rows(|row, out| {
                out.extend(row.iter().zip(mean).zip(scale).map(|((x, m), s)| (x - m) / s))
            }),
            ScalerArtifact::MinMax { min, scale } => input.map_rows(|row, out| {
                out.extend(row.iter().zip(min).zip(scale).map(|((x, m), s)| x * s + m))
            }),
        };
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_centres_and_scales() {
        let s = ScalerArtifact::Standard {
            mean: vec![10.0, 0.0],
            scale: vec![2.0, 4.0],
        };
        s.validate().unwrap();
        let out = s.transform(&Matrix::from_rows(&[[12.0, 8.0], [10.0, -4.0]])).unwrap();
        assert_eq!(out.row(0), &[1.0, 2.0]);
        assert_eq!(out.row(1), &[0.0, -1.0]);
    }

    #[test]
    fn min_max_is_affine() {
        let s = ScalerArtifact::MinMax {
            min: vec![-1.0],
            scale: vec![0.5],
        };
        let out = s.transform(&Matrix::single([4.0])).unwrap();
        assert_eq!(out.row(0), &[1.0]);
    }

    #[test]
    fn wrong_width_is_a_prediction_error() {
        let s = ScalerArtifact::Standard {
            mean: vec![0.0; 8],
            scale: vec![1.0; 8],
        };
        let err = s.transform(&Matrix::single([1.0, 2.0])).unwrap_err();
        assert_eq!(
            err,
            PredictionError::DimensionMismatch {
                expected: 8,
                actual: 2
            }
        );
    }

    #[test]
    fn zero_scale_is_rejected_at_load() {
        let s = ScalerArtifact::Standard {
            mean: vec![0.0, 0.0],
            scale: vec![1.0, 0.0],
        };
        assert!(matches!(s.validate(), Err(ArtifactError::Invalid { .. })));
    }

    #[test]
    fn parses_tagged_json() {
        let s: ScalerArtifact =
            serde_json::from_str(r#"{"kind":"min_max","min":[0.0],"scale":[1.0]}"#).unwrap();
        assert_eq!(
            s,
            ScalerArtifact::MinMax {
                min: vec![0.0],
                scale: vec![1.0]
            }
        );
    }
}
