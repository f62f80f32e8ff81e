//! Configuration management for hf-chat

use crate::harness::DEFAULT_REPORT_PATH;
use crate::llm::DEFAULT_BASE_URL;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub inference: InferenceConfig,
    pub session: SessionConfig,
    pub harness: HarnessConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct InferenceConfig {
    pub base_url: String,
    pub model: String,
    /// Request timeout for contextual sessions
    pub contextual_timeout_secs: u64,
    /// Request timeout for one-off sessions and batch runs
    pub one_off_timeout_secs: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: "HuggingFaceH4/zephyr-7b-beta".to_string(),
            contextual_timeout_secs: 30,
            one_off_timeout_secs: 50,
        }
    }
}

impl InferenceConfig {
    pub fn contextual_timeout(&self) -> Duration {
        Duration::from_secs(self.contextual_timeout_secs)
    }

    pub fn one_off_timeout(&self) -> Duration {
        Duration::from_secs(self.one_off_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of previous exchanges rendered into each contextual prompt
    pub history_length: usize,
    pub exit_word: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_length: 3,
            exit_word: crate::conversation::EXIT_WORD.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HarnessConfig {
    pub report_path: PathBuf,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
        }
    }
}

impl Config {
    /// Load configuration from default location or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, falling back to defaults when absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Invalid config {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "hf-chat") {
            Ok(proj_dirs.config_dir().join("config.toml"))
        } else {
            Ok(PathBuf::from("config.toml"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(
            config.inference.base_url,
            "https://api-inference.huggingface.co/models"
        );
        assert_eq!(config.inference.contextual_timeout(), Duration::from_secs(30));
        assert_eq!(config.inference.one_off_timeout(), Duration::from_secs(50));
        assert_eq!(config.session.history_length, 3);
        assert_eq!(config.session.exit_word, "exit");
        assert_eq!(
            config.harness.report_path,
            PathBuf::from("results/part_2/example.txt")
        );
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_from(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "[inference]\nmodel = \"google/flan-t5-base\"\n\n[session]\nhistory_length = 5\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.inference.model, "google/flan-t5-base");
        assert_eq!(config.inference.one_off_timeout_secs, 50);
        assert_eq!(config.session.history_length, 5);
        assert_eq!(config.session.exit_word, "exit");
    }

    #[test]
    fn test_invalid_file_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[session]\nhistory_length = \"lots\"\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
