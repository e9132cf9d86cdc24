use std::fs::OpenOptions;

use env_logger::{Builder, Target};

use crate::config::AppConfig;

/// Install the global logger: filter from the config, output appended to the
/// log file, stderr when that file cannot be opened. Environment variables
/// are not consulted. Calling it twice is a no-op.
pub fn init(config: &AppConfig) {
    let mut builder = Builder::new();
    builder.parse_filters(&config.log_filter);

    let path = config.log_path();
    let to_file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            builder.target(Target::Pipe(Box::new(file)));
            true
        }
        Err(e) => {
            eprintln!("cannot open log file {}: {e}; logging to stderr", path.display());
            builder.target(Target::Stderr);
            false
        }
    };

    if builder.try_init().is_ok() && to_file {
        log::debug!("Logging to {}", path.display());
    }
}
