use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::i18n::Language;

/// Optional overrides file, looked up in the resource directory.
pub const SETTINGS_FILE: &str = "settings.json";

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// Startup configuration. Every field has a default; `settings.json` may
/// override any subset of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the artifacts, images and the log file. Resolved at
    /// startup, never read from the settings file.
    #[serde(skip)]
    pub resource_dir: PathBuf,
    pub model_file: String,
    pub scaler_file: String,
    pub log_file: String,
    /// `env_logger` filter directives, e.g. `"info"` or `"frp_bond_predictor=debug"`.
    pub log_filter: String,
    pub language: Language,
    pub window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            resource_dir: PathBuf::from("."),
            model_file: "model.json".into(),
            scaler_file: "scaler.json".into(),
            log_file: "prediction_app.log".into(),
            log_filter: "info".into(),
            language: Language::default(),
            window_size: [1200.0, 800.0],
        }
    }
}

impl AppConfig {
    /// Resolve the resource directory and apply `settings.json` if present.
    pub fn load() -> Result<Self> {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf));
        let cwd = std::env::current_dir().context("reading current directory")?;
        Self::load_from(&resolve_resource_dir(exe_dir.as_deref(), &cwd))
    }

    /// Load with a known resource directory.
    pub fn load_from(resource_dir: &Path) -> Result<Self> {
        let settings = resource_dir.join(SETTINGS_FILE);
        let mut config = if settings.is_file() {
            let text = std::fs::read_to_string(&settings)
                .with_context(|| format!("reading {}", settings.display()))?;
            serde_json::from_str::<AppConfig>(&text)
                .with_context(|| format!("parsing {}", settings.display()))?
        } else {
            AppConfig::default()
        };
        config.resource_dir = resource_dir.to_path_buf();
        Ok(config)
    }

    pub fn model_path(&self) -> PathBuf {
        self.resource_dir.join(&self.model_file)
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.resource_dir.join(&self.scaler_file)
    }

    pub fn log_path(&self) -> PathBuf {
        self.resource_dir.join(&self.log_file)
    }

    /// Path of an optional image asset.
    pub fn resource(&self, name: &str) -> PathBuf {
        self.resource_dir.join(name)
    }
}

/// The executable's directory when it ships the model next to it (packaged
/// build), otherwise the working directory.
fn resolve_resource_dir(exe_dir: Option<&Path>, cwd: &Path) -> PathBuf {
    let default_model = AppConfig::default().model_file;
    match exe_dir {
        Some(dir) if dir.join(&default_model).is_file() => dir.to_path_buf(),
        _ => cwd.to_path_buf(),
    }
}
