//! Name cleaning, missing-name classification, rule-based name extraction
//! from email local parts, and the name/email similarity check.

use crate::core::config::Config;
use crate::utils::email::local_part;
use crate::utils::LOCAL_PART_SEPARATORS;

/// Invisible characters stripped from declared names. These survive the
/// whitespace collapse because they are not ordinary whitespace.
const INVISIBLE_CHARS: &[char] = &[
    '\u{00a0}', '\u{200b}', '\u{200c}', '\u{200d}', '\u{feff}', '\u{2028}', '\u{2029}',
];

/// Normalizes a raw name cell: collapses whitespace runs to single spaces,
/// trims, and strips invisible Unicode characters anywhere in the string.
/// Absent input yields the empty string.
pub fn clean_name(raw: Option<&str>) -> String {
    let Some(value) = raw else {
        return String::new();
    };
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .chars()
        .filter(|c| !INVISIBLE_CHARS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Whether a cleaned name is one of the values that mean "no name declared"
/// (empty cell, "nan", "unknown", "n/a", ...).
pub fn is_missing_name(config: &Config, name: &str) -> bool {
    let normalized = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    config.missing_name_markers.iter().any(|m| *m == normalized)
}

/// Derives a person name from an email's local part, or the empty string
/// when the evidence is not confident enough.
///
/// Tokens are split on `. - _ +`; anything empty, digit-bearing, two
/// characters or shorter, or in the stopword set is discarded, and the
/// survivors are capitalized. Strict mode needs at least two surviving
/// tokens, relaxed mode accepts one. Precision over recall: a missed real
/// name is acceptable, garbage promoted to a name is not.
///
/// ```
/// use email_refinery_core::{extract_name_from_email, ConfigBuilder};
///
/// let config = ConfigBuilder::new().build().unwrap();
/// assert_eq!(
///     extract_name_from_email(&config, "mohammad.ghadri@mail.com", false),
///     "Mohammad Ghadri"
/// );
/// assert_eq!(extract_name_from_email(&config, "cchen151@univ.edu", true), "");
/// assert_eq!(extract_name_from_email(&config, "guohao@lab.org", false), "");
/// assert_eq!(extract_name_from_email(&config, "guohao@lab.org", true), "Guohao");
/// ```
pub fn extract_name_from_email(config: &Config, email: &str, relaxed: bool) -> String {
    let local = local_part(email).to_lowercase();

    let mut name_tokens = Vec::new();
    for token in local.split(LOCAL_PART_SEPARATORS) {
        if token.is_empty() || token.chars().any(|c| c.is_ascii_digit()) {
            continue;
        }
        // Two characters or fewer: initials, not a name.
        if token.chars().count() <= 2 {
            continue;
        }
        if config.name_stopwords.contains(token) {
            continue;
        }
        name_tokens.push(capitalize(token));
    }

    let required = if relaxed { 1 } else { 2 };
    if name_tokens.len() < required {
        tracing::trace!(
            "No confident name in '{}' ({} usable tokens, {} required)",
            email,
            name_tokens.len(),
            required
        );
        return String::new();
    }
    name_tokens.join(" ")
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whether a declared name is plausibly embedded in an email's local part.
///
/// Intentionally permissive (any name token of more than two characters as
/// a substring of the local part): this is a trust upgrade check applied to
/// emails already marked similar by the upstream matcher, not a primary
/// filter.
pub fn is_name_similar_to_email(config: &Config, name: &str, email: &str) -> bool {
    if email.is_empty() || is_missing_name(config, name) {
        return false;
    }

    let lowered = name.to_lowercase();
    let depunctuated: String = lowered
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    let local = local_part(email).to_lowercase();

    depunctuated
        .split_whitespace()
        .filter(|part| part.chars().count() > 2)
        .any(|part| local.contains(part))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ConfigBuilder;

    fn test_config() -> Config {
        ConfigBuilder::new()
            .build()
            .expect("Failed to build default config for test")
    }

    #[test]
    fn test_clean_name_collapses_whitespace() {
        assert_eq!(clean_name(Some("  Jane \t  Doe \n")), "Jane Doe");
        assert_eq!(clean_name(Some("Jane Doe")), "Jane Doe");
        assert_eq!(clean_name(None), "");
    }

    #[test]
    fn test_clean_name_strips_invisible_characters() {
        assert_eq!(clean_name(Some("Jane\u{00a0}Doe")), "Jane Doe");
        assert_eq!(clean_name(Some("Ja\u{200b}ne\u{feff} Doe")), "Jane Doe");
        assert_eq!(clean_name(Some("\u{2028}Jane Doe\u{2029}")), "Jane Doe");
    }

    #[test]
    fn test_is_missing_name_markers() {
        let config = test_config();
        for missing in ["", "  ", "nan", "None", "NULL", "Unknown", "-", "na", "N/A", "not  available"] {
            assert!(is_missing_name(&config, missing), "{:?}", missing);
        }
        assert!(!is_missing_name(&config, "Jane Doe"));
        assert!(!is_missing_name(&config, "Na Li")); // full name, not the "na" marker
    }

    #[test]
    fn test_extract_strict_two_token_names() {
        let config = test_config();
        assert_eq!(
            extract_name_from_email(&config, "mohammad.ghadri@mail.com", false),
            "Mohammad Ghadri"
        );
        assert_eq!(
            extract_name_from_email(&config, "sana.syed@univ.edu", false),
            "Sana Syed"
        );
        assert_eq!(
            extract_name_from_email(&config, "jane_smith@company.com", false),
            "Jane Smith"
        );
    }

    #[test]
    fn test_extract_rejects_digit_bearing_tokens() {
        let config = test_config();
        assert_eq!(extract_name_from_email(&config, "cchen151@univ.edu", false), "");
        assert_eq!(extract_name_from_email(&config, "cchen151@univ.edu", true), "");
        assert_eq!(extract_name_from_email(&config, "21831010@univ.cn", true), "");
        assert_eq!(extract_name_from_email(&config, "zxiong002@univ.edu", true), "");
    }

    #[test]
    fn test_extract_rejects_short_tokens_and_stopwords() {
        let config = test_config();
        // Initials only.
        assert_eq!(extract_name_from_email(&config, "jcb@univ.edu", true), "");
        // Role words.
        assert_eq!(extract_name_from_email(&config, "admin@univ.edu", true), "");
        assert_eq!(extract_name_from_email(&config, "info.support@univ.edu", true), "");
        // "lu" is dropped as too short, leaving one survivor: below the
        // strict threshold, enough for relaxed.
        assert_eq!(extract_name_from_email(&config, "lu.qin@univ.cn", false), "");
        assert_eq!(extract_name_from_email(&config, "lu.qin@univ.cn", true), "Qin");
    }

    #[test]
    fn test_extract_single_token_needs_relaxed_mode() {
        let config = test_config();
        assert_eq!(extract_name_from_email(&config, "guohao@lab.org", false), "");
        assert_eq!(extract_name_from_email(&config, "guohao@lab.org", true), "Guohao");
        assert_eq!(extract_name_from_email(&config, "errolf@uni.edu", false), "");
        assert_eq!(extract_name_from_email(&config, "errolf@uni.edu", true), "Errolf");
    }

    #[test]
    fn test_relaxed_agrees_with_strict_when_strict_succeeds() {
        let config = test_config();
        for email in ["mohammad.ghadri@mail.com", "sana.syed@univ.edu", "a.b.santos-silva@usp.br"] {
            let strict = extract_name_from_email(&config, email, false);
            if !strict.is_empty() {
                assert_eq!(strict, extract_name_from_email(&config, email, true));
            }
        }
    }

    #[test]
    fn test_similarity_matches_embedded_tokens() {
        let config = test_config();
        assert!(is_name_similar_to_email(
            &config,
            "Zhenhua Feng",
            "zhfeng@example.com"
        ));
        assert!(is_name_similar_to_email(
            &config,
            "Zhenhua Feng",
            "z.feng@surrey.ac.uk"
        ));
        assert!(is_name_similar_to_email(
            &config,
            "Anders Søgaard",
            "anders@example.com"
        ));
    }

    #[test]
    fn test_similarity_rejects_unrelated_or_missing() {
        let config = test_config();
        assert!(!is_name_similar_to_email(
            &config,
            "John Smith",
            "jane.doe@example.com"
        ));
        // All name tokens too short to be evidence.
        assert!(!is_name_similar_to_email(&config, "An So", "as@example.com"));
        assert!(!is_name_similar_to_email(&config, "Unknown", "unknown@x.de"));
        assert!(!is_name_similar_to_email(&config, "Jane Doe", ""));
    }
}
