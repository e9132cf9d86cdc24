use std::path::Path;

use thiserror::Error;

use crate::features::{FeatureVector, FormInput, InputValidationError, FEATURE_COUNT};
use crate::model::{
    load_model, load_scaler, ArtifactError, FeatureScaler, Matrix, PredictionError, Regressor,
};

// ---------------------------------------------------------------------------
// Predictor: scaler → model
// ---------------------------------------------------------------------------

/// Failure of a single-record prediction. Input problems are kept apart from
/// model problems so the UI can show the input hint.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SinglePredictionError {
    #[error(transparent)]
    Input(#[from] InputValidationError),
    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

/// The frozen scaler and model. Read-only after construction; share it across
/// threads behind an `Arc`.
pub struct Predictor {
    scaler: Box<dyn FeatureScaler>,
    model: Box<dyn Regressor>,
}

impl Predictor {
    pub fn new(scaler: Box<dyn FeatureScaler>, model: Box<dyn Regressor>) -> Self {
        Self { scaler, model }
    }

    /// Load `scaler.json` and `model.json` style artifacts.
    pub fn load(scaler_path: &Path, model_path: &Path) -> Result<Self, ArtifactError> {
        let scaler = load_scaler(scaler_path)?;
        let model = load_model(model_path)?;
        log::info!(
            "Artifacts loaded: scaler expects {} features, model expects {}",
            scaler.n_features(),
            model.n_features()
        );
        Ok(Self::new(Box::new(scaler), Box::new(model)))
    }

    /// Scale then predict, one output per input row.
    pub fn predict_matrix(&self, raw: &Matrix) -> Result<Vec<f64>, PredictionError> {
        let scaled = self.scale(raw)?;
        self.predict_scaled(&scaled)
    }

    pub fn scale(&self, raw: &Matrix) -> Result<Matrix, PredictionError> {
        self.scaler.transform(raw)
    }

    pub fn predict_scaled(&self, scaled: &Matrix) -> Result<Vec<f64>, PredictionError> {
        let out = self.model.predict(scaled)?;
        if out.len() != scaled.rows() {
            return Err(PredictionError::OutputLength {
                expected: scaled.rows(),
                actual: out.len(),
            });
        }
        if let Some(row) = out.iter().position(|v| !v.is_finite()) {
            return Err(PredictionError::NonFinite { row });
        }
        Ok(out)
    }

    /// Bond strength (MPa) for one validated specimen.
    pub fn predict_one(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        let row: [f64; FEATURE_COUNT] = features.to_row();
        let out = self.predict_matrix(&Matrix::single(row))?;
        out.first()
            .copied()
            .ok_or(PredictionError::OutputLength {
                expected: 1,
                actual: 0,
            })
    }

    /// Parse the form and predict. Nothing reaches the model when parsing fails.
    pub fn predict_form(&self, form: &FormInput) -> Result<f64, SinglePredictionError> {
        let features = form.parse()?;
        let value = self.predict_one(&features)?;
        log::info!(
            "Prediction succeeded. Input: {:?}, predicted: {value:.2}",
            features.to_row()
        );
        Ok(value)
    }
}

/// `12.34 MPa` style rendering used by the result label.
pub fn format_mpa(value: f64) -> String {
    format!("{value:.2} MPa")
}
