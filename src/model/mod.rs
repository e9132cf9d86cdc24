/// Model layer: pre-fitted scaler and regressor artifacts.
///
/// Both artifacts are loaded once from JSON, validated, and then only read.
/// They are used through the [`FeatureScaler`] and [`Regressor`] traits so the
/// pipeline does not depend on a particular artifact kind.
pub mod artifacts;
pub mod regressor;
pub mod scaler;

use std::path::PathBuf;

use thiserror::Error;

pub use artifacts::{load_model, load_scaler};
pub use regressor::{ModelArtifact, Tree};
pub use scaler::ScalerArtifact;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The model or scaler could not be loaded. Fatal at startup.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("{}: file not found", path.display())]
    NotFound { path: PathBuf },
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: not a valid artifact: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid {what}: {reason}")]
    Invalid { what: &'static str, reason: String },
}

/// The scaler or model failed while transforming or predicting.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("model returned {actual} predictions for {expected} rows")]
    OutputLength { expected: usize, actual: usize },
    #[error("prediction for row {row} is not a finite number")]
    NonFinite { row: usize },
    #[error("{0}")]
    Failed(String),
}

// ---------------------------------------------------------------------------
// Matrix – row-major N×K block of f64
// ---------------------------------------------------------------------------

/// Dense row-major matrix. Rows are samples, columns are features.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Build from a flat row-major buffer. `None` if the length does not fit.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Option<Self> {
        (rows * cols == data.len()).then_some(Self { rows, cols, data })
    }

    pub fn from_rows<const N: usize>(rows: &[[f64; N]]) -> Self {
        Self {
            rows: rows.len(),
            cols: N,
            data: rows.iter().flatten().copied().collect(),
        }
    }

    /// A 1×N matrix.
    pub fn single<const N: usize>(row: [f64; N]) -> Self {
        Self::from_rows(&[row])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.rows).map(move |i| self.row(i))
    }

    fn map_rows<F>(&self, mut f: F) -> Matrix
    where
        F: FnMut(&[f64], &mut Vec<f64>),
    {
        let mut data = Vec::with_capacity(self.data.len());
        for row in self.iter_rows() {
            f(row, &mut data);
        }
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }

    fn expect_cols(&self, expected: usize) -> Result<(), PredictionError> {
        if self.cols != expected {
            return Err(PredictionError::DimensionMismatch {
                expected,
                actual: self.cols,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Seams used by the pipeline
// ---------------------------------------------------------------------------

/// Pre-fitted transform from raw feature space to model input space.
pub trait FeatureScaler: Send + Sync {
    fn n_features(&self) -> usize;

    /// Transform every row. Output has the same shape as the input.
    fn transform(&self, input: &Matrix) -> Result<Matrix, PredictionError>;
}

/// Pre-fitted regression model producing one value per row.
pub trait Regressor: Send + Sync {
    fn n_features(&self) -> usize;

    fn predict(&self, input: &Matrix) -> Result<Vec<f64>, PredictionError>;
}
