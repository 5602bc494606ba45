//! Contains validation logic for the final Config struct.

use super::{default_block_words, default_max_local_part_length, Config, Result};

/// Validates the configuration settings after loading and potential overrides.
/// Mutates the config to normalize values or restore defaults where a setting
/// would disable a correctness-bearing filter entirely.
/// Internal helper for the builder's `build` method.
pub(crate) fn validate_config(config: &mut Config) -> Result<()> {
    if config.max_local_part_length == 0 {
        tracing::warn!(
            "Max local-part length was set to 0 (every email would be junk). Restoring default {}.",
            default_max_local_part_length()
        );
        config.max_local_part_length = default_max_local_part_length();
    }

    if config.block_words.is_empty() {
        tracing::warn!("Junk block-word list is empty. Restoring the default list.");
        config.block_words = default_block_words();
    }

    if config.name_stopwords.is_empty() {
        tracing::warn!(
            "Name stopword list is empty. Role words like 'admin' will be extracted as names."
        );
    }
    if config.webmail_prefixes.is_empty() {
        tracing::warn!("Webmail prefix list is empty. Leaked-domain local parts will pass.");
    }

    // All substring and equality checks run against lowercased local parts,
    // so the configured lists must be lowercase too.
    lowercase_in_place(&mut config.block_words);
    lowercase_in_place(&mut config.webmail_prefixes);
    lowercase_in_place(&mut config.generic_local_tokens);
    lowercase_in_place(&mut config.missing_name_markers);
    config.name_stopwords = config
        .name_stopwords
        .iter()
        .map(|w| w.trim().to_lowercase())
        .collect();

    if !config
        .missing_name_markers
        .iter()
        .any(|m| m.is_empty())
    {
        tracing::warn!(
            "Missing-name markers do not include the empty string; adding it (an empty cell always means no name)."
        );
        config.missing_name_markers.push(String::new());
    }

    Ok(())
}

fn lowercase_in_place(items: &mut [String]) {
    for item in items.iter_mut() {
        *item = item.trim().to_lowercase();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_length_cap_restored() {
        let mut config = Config {
            max_local_part_length: 0,
            ..Config::default()
        };
        validate_config(&mut config).unwrap();
        assert_eq!(config.max_local_part_length, 50);
    }

    #[test]
    fn test_empty_block_list_restored() {
        let mut config = Config {
            block_words: Vec::new(),
            ..Config::default()
        };
        validate_config(&mut config).unwrap();
        assert!(!config.block_words.is_empty());
    }

    #[test]
    fn test_lists_are_lowercased() {
        let mut config = Config {
            block_words: vec!["PleaseSend ".to_string()],
            ..Config::default()
        };
        config.name_stopwords.insert("ADMIN".to_string());
        validate_config(&mut config).unwrap();
        assert!(config.block_words.contains(&"pleasesend".to_string()));
        assert!(config.name_stopwords.contains("admin"));
    }

    #[test]
    fn test_empty_string_marker_is_ensured() {
        let mut config = Config {
            missing_name_markers: vec!["unknown".to_string()],
            ..Config::default()
        };
        validate_config(&mut config).unwrap();
        assert!(config.missing_name_markers.iter().any(|m| m.is_empty()));
    }
}
