// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for kbminer.
//!
//! Layers compiled defaults, optional TOML files, the legacy environment
//! names used by existing `.env` files, and `KBMINER_` overrides into one
//! [`KbMinerConfig`] that is resolved once at startup.
//!
//! # Usage
//!
//! ```no_run
//! use kbminer_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("history file: {}", config.history.path);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str, load_dotenv};
pub use model::KbMinerConfig;

/// Load configuration from the XDG hierarchy and environment, then validate it.
///
/// Figment errors are converted to diagnostics with typo suggestions and,
/// where possible, spans into the TOML file that caused them.
pub fn load_and_validate() -> Result<KbMinerConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let toml_sources = collect_toml_sources();
            Err(diagnostic::figment_to_config_errors(err, &toml_sources))
        }
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<KbMinerConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Read the TOML files `load_config` may have merged, for error spans.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut candidates = vec![std::path::PathBuf::from("/etc/kbminer/kbminer.toml")];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("kbminer/kbminer.toml"));
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join("kbminer.toml"));
    }

    candidates
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            Some((path.display().to_string(), content))
        })
        .collect()
}
