//! Configuration management
//!
//! Manages the model directory and tokenizer settings. Loaded from a TOML
//! file under the platform config directory; missing fields fall back to
//! defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::vectorizer::CountVectorizer;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding one sub-directory of weight tables per user
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,
    /// Tokenizer settings for term extraction
    #[serde(default)]
    pub tokenizer: TokenizerConfig,
}

/// Tokenizer settings for the default vectorizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// Minimum token length kept in a vocabulary
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
    /// Stopwords excluded in addition to the built-in English list
    #[serde(default)]
    pub extra_stopwords: Vec<String>,
}

fn default_model_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "mailrank", "mailrank")
        .map(|dirs| dirs.data_dir().join("models"))
        .unwrap_or_else(|| PathBuf::from("models"))
}

fn default_min_token_len() -> usize {
    2
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            min_token_len: default_min_token_len(),
            extra_stopwords: Vec::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_dir: default_model_dir(),
            tokenizer: TokenizerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, writing the defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            let config: Config = toml::from_str(&contents)
                .context("Failed to parse config file")?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = config_path()?;
        let parent = config_path
            .parent()
            .context("Config path has no parent")?;

        std::fs::create_dir_all(parent)
            .context("Failed to create config directory")?;

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Build the default vectorizer from the tokenizer settings
    pub fn vectorizer(&self) -> CountVectorizer {
        CountVectorizer::with_options(&self.tokenizer.extra_stopwords, self.tokenizer.min_token_len)
    }
}

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    let base = directories::ProjectDirs::from("com", "mailrank", "mailrank")
        .context("Failed to get project directories")?;
    Ok(base.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.tokenizer.min_token_len, 2);
        assert!(config.tokenizer.extra_stopwords.is_empty());
    }

    #[test]
    fn test_partial_config_parses() {
        let config: Config = toml::from_str(
            r#"
            model_dir = "/tmp/models"

            [tokenizer]
            extra_stopwords = ["unsubscribe"]
            "#,
        )
        .unwrap();
        assert_eq!(config.model_dir, PathBuf::from("/tmp/models"));
        assert_eq!(config.tokenizer.extra_stopwords, vec!["unsubscribe"]);
        assert_eq!(config.tokenizer.min_token_len, 2);
    }

    #[test]
    fn test_round_trip() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.model_dir, config.model_dir);
    }
}
