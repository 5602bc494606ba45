//! # Email Refinery Core Library
//!
//! This crate provides the core logic for cleaning, classifying and
//! deduplicating harvested academic contact emails: structural validation,
//! junk/placeholder filtering, domain-to-country classification, rule-based
//! name inference from email local parts, and the aggregation of everything
//! into deduplicated output tables with summary statistics.
//!
//! It is designed to be used either directly as a library or via the
//! `email-refinery` command-line tool (which uses this library).

mod core;
mod utils;

pub use crate::core::classifier::classify_author;
pub use crate::core::config::{
    Config, ConfigBuilder, ConfigFile, ExtractionSection, FilteringSection, ReportSection,
    TrustSection,
};
pub use crate::core::error::{AppError, Result};
pub use crate::core::models::{
    records_from_rows, AuthorRecord, ClassifiedEmail, NameSource, OutputRow, Report, SummaryRow,
    REQUIRED_COLUMNS,
};
pub use crate::core::report::process_records;
pub use crate::utils::country::{country_for_domain, UNKNOWN_COUNTRY};
pub use crate::utils::email::{is_junk_email, is_valid_email};
pub use crate::utils::names::{
    clean_name, extract_name_from_email, is_missing_name, is_name_similar_to_email,
};
