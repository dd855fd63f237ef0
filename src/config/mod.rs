//! Project configuration
//!
//! Optional `cogmark.toml` in the working directory supplies default
//! paths for the CLI:
//!
//! ```toml
//! # cogmark.toml
//!
//! [paths]
//! dataset = "data/sample_patient_history.csv"
//! model = "models/progression_model.json"
//! ```
//!
//! Configuration never fails a command: a missing file means defaults,
//! a malformed file logs a warning and means defaults. Explicit CLI
//! flags override anything configured here.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Config file name looked up in the working directory.
pub const CONFIG_FILE: &str = "cogmark.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Training dataset read by `cogmark train`.
    pub dataset: Option<PathBuf>,
    /// Model artifact written by `train` and read by `assess`.
    pub model: Option<PathBuf>,
}

impl Config {
    /// Dataset path to use when the CLI gives none.
    pub fn dataset_path(&self) -> PathBuf {
        self.paths
            .dataset
            .clone()
            .unwrap_or_else(|| PathBuf::from("data/sample_patient_history.csv"))
    }

    /// Model artifact path to use when the CLI gives none.
    pub fn model_path(&self) -> PathBuf {
        self.paths.model.clone().unwrap_or_else(default_model_path)
    }
}

/// Per-user data directory location for the trained model.
fn default_model_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cogmark")
        .join("progression_model.json")
}

/// Loads `cogmark.toml` from `dir`, falling back to defaults.
pub fn load_config(dir: &Path) -> Config {
    let path = dir.join(CONFIG_FILE);
    if path.exists() {
        match load_toml_config(&path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
            }
        }
    }

    debug!("No config file found, using defaults");
    Config::default()
}

fn load_toml_config(path: &Path) -> anyhow::Result<Config> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_config(dir.path());
        assert_eq!(
            config.dataset_path(),
            PathBuf::from("data/sample_patient_history.csv")
        );
        assert!(config
            .model_path()
            .to_string_lossy()
            .contains("progression_model.json"));
    }

    #[test]
    fn test_configured_paths_win() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[paths]\ndataset = \"cohort.csv\"\nmodel = \"out/model.json\"\n",
        )
        .expect("write config");

        let config = load_config(dir.path());
        assert_eq!(config.dataset_path(), PathBuf::from("cohort.csv"));
        assert_eq!(config.model_path(), PathBuf::from("out/model.json"));
    }

    #[test]
    fn test_malformed_config_degrades_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(CONFIG_FILE), "this is [[ not valid toml")
            .expect("write config");

        let config = load_config(dir.path());
        assert_eq!(
            config.dataset_path(),
            PathBuf::from("data/sample_patient_history.csv")
        );
    }

    #[test]
    fn test_partial_config_fills_missing_with_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(CONFIG_FILE), "[paths]\ndataset = \"only.csv\"\n")
            .expect("write config");

        let config = load_config(dir.path());
        assert_eq!(config.dataset_path(), PathBuf::from("only.csv"));
        assert!(config
            .model_path()
            .to_string_lossy()
            .contains("progression_model.json"));
    }
}
