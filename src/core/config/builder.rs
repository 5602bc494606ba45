//! Provides the `ConfigBuilder` for fluent configuration construction.

use super::loading::{apply_file_config, load_config_file};
use super::validation::validate_config;
use super::{Config, ConfigFile, Result};
use crate::core::error::AppError;
use std::path::Path;

/// Builder pattern for creating `Config` instances fluently.
///
/// This is the primary way users should create a `Config` object.
/// It handles loading from files, applying overrides, and validation.
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
    config_file_path: Option<String>,
    overrides: ConfigFile,
}

impl ConfigBuilder {
    /// Creates a new builder with default configuration values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify an optional configuration file path to load.
    pub fn config_file(mut self, path: impl Into<String>) -> Self {
        self.config_file_path = Some(path.into());
        self
    }

    pub fn block_words(mut self, words: Vec<String>) -> Self {
        self.overrides.filtering.block_words = Some(words);
        self
    }
    pub fn webmail_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.overrides.filtering.webmail_prefixes = Some(prefixes);
        self
    }
    pub fn generic_local_tokens(mut self, tokens: Vec<String>) -> Self {
        self.overrides.filtering.generic_local_tokens = Some(tokens);
        self
    }
    pub fn max_local_part_length(mut self, value: usize) -> Self {
        self.overrides.filtering.max_local_part_length = Some(value);
        self
    }
    pub fn name_stopwords(mut self, words: Vec<String>) -> Self {
        self.overrides.extraction.stopwords = Some(words);
        self
    }
    pub fn missing_name_markers(mut self, markers: Vec<String>) -> Self {
        self.overrides.extraction.missing_name_markers = Some(markers);
        self
    }
    pub fn relaxed_second_pass(mut self, enable: bool) -> Self {
        self.overrides.extraction.relaxed_second_pass = Some(enable);
        self
    }
    pub fn verify_similar_names(mut self, enable: bool) -> Self {
        self.overrides.trust.verify_similar_names = Some(enable);
        self
    }
    pub fn mask_repeated_names(mut self, enable: bool) -> Self {
        self.overrides.report.mask_repeated_names = Some(enable);
        self
    }

    /// Builds the final `Config` object, applying defaults, file settings,
    /// overrides, and validation.
    pub fn build(mut self) -> Result<Config> {
        let mut loaded_path: Option<String> = None;

        if let Some(ref path) = self.config_file_path {
            match load_config_file(path) {
                Ok(file_config) => {
                    apply_file_config(&mut self.config, &file_config);
                    loaded_path = Some(path.clone());
                    tracing::info!("Loaded base configuration from specified file: {}", path);
                }
                Err(e) => {
                    tracing::error!("Failed to load specified config file '{}': {}", path, e);
                    return Err(AppError::Config(format!(
                        "Failed to load specified configuration file '{}': {}",
                        path, e
                    )));
                }
            }
        } else {
            tracing::debug!("No config file specified, checking default locations.");
            for path_str in ["./email-refinery.toml", "./config.toml"] {
                if Path::new(path_str).exists() {
                    tracing::debug!("Found potential default config file: {}", path_str);
                    match load_config_file(path_str) {
                        Ok(file_config) => {
                            apply_file_config(&mut self.config, &file_config);
                            loaded_path = Some(path_str.to_string());
                            tracing::info!(
                                "Loaded base configuration from default location: {}",
                                path_str
                            );
                            break;
                        }
                        Err(e) => {
                            tracing::warn!(
                                "Failed to load or parse default config '{}': {}",
                                path_str,
                                e
                            );
                        }
                    }
                }
            }
            if loaded_path.is_none() {
                tracing::debug!("No configuration file found. Using default values and overrides.");
            }
        }

        apply_file_config(&mut self.config, &self.overrides);
        self.config.loaded_config_path = loaded_path;
        validate_config(&mut self.config)?;

        tracing::debug!("Final configuration built successfully.");
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_build() {
        let config = ConfigBuilder::new().build().unwrap();
        assert!(config.relaxed_second_pass);
        assert!(!config.verify_similar_names);
        assert!(config.mask_repeated_names);
        assert_eq!(config.max_local_part_length, 50);
        assert!(config.block_words.iter().any(|w| w == "correspondence"));
        assert!(config.name_stopwords.contains("postdoc"));
        assert!(config.email_regex.is_match("a.b@c.de"));
    }

    #[test]
    fn test_builder_overrides_win() {
        let config = ConfigBuilder::new()
            .max_local_part_length(20)
            .relaxed_second_pass(false)
            .verify_similar_names(true)
            .block_words(vec!["SPAM".to_string()])
            .build()
            .unwrap();
        assert_eq!(config.max_local_part_length, 20);
        assert!(!config.relaxed_second_pass);
        assert!(config.verify_similar_names);
        // Validation lowercases list entries.
        assert_eq!(config.block_words, vec!["spam".to_string()]);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let result = ConfigBuilder::new()
            .config_file("/definitely/not/here.toml")
            .build();
        assert!(result.is_err());
    }
}
