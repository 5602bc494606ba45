//! Configuration for the classification pipeline: runtime [`Config`], its
//! fluent [`ConfigBuilder`], and the TOML [`ConfigFile`] overlay.

mod builder;
mod loading;
mod validation;

pub use builder::ConfigBuilder;

pub(crate) use crate::core::error::Result;

use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;

/// Structural shape every email must match before any other check runs.
const EMAIL_PATTERN: &str = r"^[\w.-]+@[\w.-]+\.\w+$";

/// Local-part fragments that mark an address as scraped instruction text or
/// a placeholder. Matched case-insensitively as substrings.
const DEFAULT_BLOCK_WORDS: &[&str] = &[
    "correspondence",
    "pleasesend",
    "workconducted",
    "workdone",
    "writtenwhile",
    "interning",
    "currentaddress",
    "author",
    "reprint",
    "address",
    "published",
    "submitted",
    "preprint",
    "report",
    "firstname",
    "lastname",
    "surname",
    "secondname",
    "yourname",
    "username",
    "user.name",
    "example",
    "email",
    "contact",
    "domain",
    "here",
];

/// Consumer webmail domains that sometimes leak into the local part when a
/// scraper mangles an address.
const DEFAULT_WEBMAIL_PREFIXES: &[&str] = &["gmail.com", "yahoo.com", "hotmail.com"];

/// Local parts consisting of exactly one of these tokens carry no identity.
const DEFAULT_GENERIC_LOCAL_TOKENS: &[&str] = &["working", "name", "user"];

/// Role, department and placeholder words that never count as name tokens.
const DEFAULT_NAME_STOPWORDS: &[&str] = &[
    "admin",
    "info",
    "support",
    "contact",
    "mail",
    "email",
    "noreply",
    "no-reply",
    "help",
    "team",
    "office",
    "phd",
    "lab",
    "dept",
    "university",
    "research",
    "group",
    "center",
    "cs",
    "eng",
    "sci",
    "edu",
    "web",
    "service",
    "services",
    "first",
    "last",
    "name",
    "working",
    "user",
    "postdoc",
];

/// Cleaned, lowercased name values that mean "no name was declared".
const DEFAULT_MISSING_NAME_MARKERS: &[&str] = &[
    "",
    "nan",
    "none",
    "null",
    "unknown",
    "-",
    "na",
    "n/a",
    "not available",
];

const DEFAULT_MAX_LOCAL_PART_LENGTH: usize = 50;

/// Effective runtime configuration. Built once via [`ConfigBuilder`], then
/// shared immutably for the whole batch.
#[derive(Debug, Clone)]
pub struct Config {
    /// Compiled structural email check, applied before every other filter.
    pub email_regex: Regex,
    /// Junk-filter substring block list (lowercase).
    pub block_words: Vec<String>,
    /// Webmail domains rejected as local-part prefixes (lowercase).
    pub webmail_prefixes: Vec<String>,
    /// Single tokens that make a one-token local part junk (lowercase).
    pub generic_local_tokens: Vec<String>,
    /// Local parts longer than this are treated as scraped sentences.
    pub max_local_part_length: usize,
    /// Tokens the name extractor discards (lowercase).
    pub name_stopwords: HashSet<String>,
    /// Cleaned name values treated as missing (lowercase).
    pub missing_name_markers: Vec<String>,
    /// Re-attempt blank rule-extraction rows with the relaxed extractor.
    pub relaxed_second_pass: bool,
    /// Re-check the declared name against the local part before trusting an
    /// upstream similar-email marking.
    pub verify_similar_names: bool,
    /// Blank out a clean-table name repeating the immediately preceding row.
    pub mask_repeated_names: bool,
    /// The configuration file the settings were loaded from, if any.
    pub loaded_config_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            email_regex: Regex::new(EMAIL_PATTERN).expect("hard-coded email pattern must compile"),
            block_words: to_string_vec(DEFAULT_BLOCK_WORDS),
            webmail_prefixes: to_string_vec(DEFAULT_WEBMAIL_PREFIXES),
            generic_local_tokens: to_string_vec(DEFAULT_GENERIC_LOCAL_TOKENS),
            max_local_part_length: DEFAULT_MAX_LOCAL_PART_LENGTH,
            name_stopwords: DEFAULT_NAME_STOPWORDS.iter().map(|s| s.to_string()).collect(),
            missing_name_markers: to_string_vec(DEFAULT_MISSING_NAME_MARKERS),
            relaxed_second_pass: true,
            verify_similar_names: false,
            mask_repeated_names: true,
            loaded_config_path: None,
        }
    }
}

pub(crate) fn to_string_vec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn default_block_words() -> Vec<String> {
    to_string_vec(DEFAULT_BLOCK_WORDS)
}

pub(crate) fn default_max_local_part_length() -> usize {
    DEFAULT_MAX_LOCAL_PART_LENGTH
}

/// Raw deserialized shape of a TOML configuration file. All fields are
/// optional; absent values leave the corresponding [`Config`] field alone.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub filtering: FilteringSection,
    #[serde(default)]
    pub extraction: ExtractionSection,
    #[serde(default)]
    pub trust: TrustSection,
    #[serde(default)]
    pub report: ReportSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilteringSection {
    pub block_words: Option<Vec<String>>,
    pub webmail_prefixes: Option<Vec<String>>,
    pub generic_local_tokens: Option<Vec<String>>,
    pub max_local_part_length: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractionSection {
    pub stopwords: Option<Vec<String>>,
    pub missing_name_markers: Option<Vec<String>>,
    pub relaxed_second_pass: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrustSection {
    pub verify_similar_names: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportSection {
    pub mask_repeated_names: Option<bool>,
}
