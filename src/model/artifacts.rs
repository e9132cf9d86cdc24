use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;

use super::{ArtifactError, ModelArtifact, ScalerArtifact};

// ---------------------------------------------------------------------------
// Artifact loading
// ---------------------------------------------------------------------------

/// Read and validate the scaler artifact.
pub fn load_scaler(path: &Path) -> Result<ScalerArtifact, ArtifactError> {
    let scaler: ScalerArtifact = read_json(path)?;
    scaler.validate()?;
    log::debug!("Scaler loaded from {}", path.display());
    Ok(scaler)
}

/// Read and validate the model artifact.
pub fn load_model(path: &Path) -> Result<ModelArtifact, ArtifactError> {
    let model: ModelArtifact = read_json(path)?;
    model.validate()?;
    log::debug!("Model loaded from {}", path.display());
    Ok(model)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let text = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ArtifactError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    serde_json::from_str(&text).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
