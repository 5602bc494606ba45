//! Handles loading configuration from files and applying it to the Config struct.

use super::{Config, ConfigFile};
use anyhow::Context;
use std::fs;
use std::path::Path;

/// Loads configuration settings from a TOML file.
/// Returns the parsed `ConfigFile` content.
/// Internal to the builder logic.
pub(crate) fn load_config_file(file_path: &str) -> anyhow::Result<ConfigFile> {
    let path = Path::new(file_path);
    if !path.exists() || !path.is_file() {
        return Err(anyhow::anyhow!(
            "File not found or is not a file: {}",
            file_path
        ));
    }
    tracing::debug!("Attempting to read config file: {}", file_path);
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", file_path))?;

    tracing::debug!("Attempting to parse TOML from: {}", file_path);
    let config_file_content: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML configuration from {}", file_path))?;

    tracing::debug!("Successfully parsed configuration file: {}", file_path);
    Ok(config_file_content)
}

/// Applies settings from a parsed `ConfigFile` onto a mutable `Config` instance.
/// Internal helper for the builder. This merges settings.
pub(crate) fn apply_file_config(config: &mut Config, file_config: &ConfigFile) {
    // Filtering
    if let Some(ref words) = file_config.filtering.block_words {
        config.block_words = words.clone();
    }
    if let Some(ref prefixes) = file_config.filtering.webmail_prefixes {
        config.webmail_prefixes = prefixes.clone();
    }
    if let Some(ref tokens) = file_config.filtering.generic_local_tokens {
        config.generic_local_tokens = tokens.clone();
    }
    if let Some(length) = file_config.filtering.max_local_part_length {
        config.max_local_part_length = length;
    }

    // Extraction
    if let Some(ref stopwords) = file_config.extraction.stopwords {
        config.name_stopwords = stopwords.iter().cloned().collect();
    }
    if let Some(ref markers) = file_config.extraction.missing_name_markers {
        config.missing_name_markers = markers.clone();
    }
    if let Some(enable) = file_config.extraction.relaxed_second_pass {
        config.relaxed_second_pass = enable;
    }

    // Trust
    if let Some(enable) = file_config.trust.verify_similar_names {
        config.verify_similar_names = enable;
    }

    // Report
    if let Some(enable) = file_config.report.mask_repeated_names {
        config.mask_repeated_names = enable;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_file_config_merges_sections() {
        let mut config = Config::default();
        let file_config: ConfigFile = toml::from_str(
            r#"
            [filtering]
            max_local_part_length = 32
            webmail_prefixes = ["gmail.com"]

            [extraction]
            relaxed_second_pass = false

            [trust]
            verify_similar_names = true
            "#,
        )
        .unwrap();

        apply_file_config(&mut config, &file_config);

        assert_eq!(config.max_local_part_length, 32);
        assert_eq!(config.webmail_prefixes, vec!["gmail.com".to_string()]);
        assert!(!config.relaxed_second_pass);
        assert!(config.verify_similar_names);
        // Untouched sections keep their defaults.
        assert!(config.mask_repeated_names);
        assert!(config.block_words.iter().any(|w| w == "pleasesend"));
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        let parsed: anyhow::Result<ConfigFile> =
            toml::from_str("[network]\ntimeout = 5\n").map_err(Into::into);
        assert!(parsed.is_err());
    }
}
