//! Data structures shared across the classification pipeline and the report
//! builder, plus the raw-row parsing that turns spreadsheet-shaped JSON rows
//! into [`AuthorRecord`]s.

use crate::core::error::{AppError, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

/// Input column holding the author's declared name.
pub const COLUMN_NAME: &str = "Name";
/// Input column holding the author's citation count.
pub const COLUMN_CITATIONS: &str = "Citations";
/// Input column holding all harvested emails, comma-joined.
pub const COLUMN_ALL_EMAILS: &str = "All Emails";
/// Input column holding the trusted subset of emails, comma-joined.
pub const COLUMN_SIMILAR_EMAILS: &str = "Similar Emails";

/// Columns that must be present somewhere in the dataset schema.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    COLUMN_NAME,
    COLUMN_CITATIONS,
    COLUMN_ALL_EMAILS,
    COLUMN_SIMILAR_EMAILS,
];

/// One author as read from the input dataset. Never mutated after parsing.
#[derive(Debug, Clone, Default)]
pub struct AuthorRecord {
    /// Declared name as it appeared in the source, `None` when the cell was
    /// absent. Cleaning and missing-name classification happen later.
    pub name: Option<String>,
    pub citations: i64,
    /// All harvested emails, lowercased, in their original order.
    pub all_emails: Vec<String>,
    /// Emails pre-marked by the upstream matcher as likely belonging to the
    /// declared name. Expected to be a subset of `all_emails`; entries that
    /// are not are simply inert.
    pub similar_emails: HashSet<String>,
}

impl AuthorRecord {
    /// Builds a record from raw cell values, splitting the comma-joined email
    /// columns. Emails are trimmed and lowercased; empty fragments dropped.
    pub fn from_raw(
        name: Option<&str>,
        citations: i64,
        all_emails: Option<&str>,
        similar_emails: Option<&str>,
    ) -> Self {
        Self {
            name: name.map(str::to_string),
            citations,
            all_emails: split_email_list(all_emails).collect(),
            similar_emails: split_email_list(similar_emails).collect(),
        }
    }
}

fn split_email_list(joined: Option<&str>) -> impl Iterator<Item = String> + '_ {
    joined
        .unwrap_or_default()
        .split(',')
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
}

/// Parses raw JSON rows (one object per spreadsheet row) into author records.
///
/// Fails loudly with [`AppError::MissingColumn`] when a required column is
/// absent from every row of a non-empty dataset — a structural precondition,
/// unlike per-row gaps which simply yield empty fields. A column that is JSON
/// `null` on every row counts as absent.
pub fn records_from_rows(rows: &[Value]) -> Result<Vec<AuthorRecord>> {
    let objects: Vec<&serde_json::Map<String, Value>> = rows
        .iter()
        .filter_map(|row| {
            let obj = row.as_object();
            if obj.is_none() {
                tracing::warn!("Skipping non-object input row: {}", row);
            }
            obj
        })
        .collect();

    if !objects.is_empty() {
        for column in REQUIRED_COLUMNS {
            let present = objects
                .iter()
                .any(|obj| obj.get(column).is_some_and(|v| !v.is_null()));
            if !present {
                return Err(AppError::MissingColumn(column.to_string()));
            }
        }
    }

    Ok(objects
        .iter()
        .map(|obj| {
            AuthorRecord::from_raw(
                cell_as_text(obj.get(COLUMN_NAME)).as_deref(),
                cell_as_citations(obj.get(COLUMN_CITATIONS)),
                cell_as_text(obj.get(COLUMN_ALL_EMAILS)).as_deref(),
                cell_as_text(obj.get(COLUMN_SIMILAR_EMAILS)).as_deref(),
            )
        })
        .collect())
}

fn cell_as_text(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn cell_as_citations(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Where a classified email's resolved name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    /// The author's declared name, inherited by the primary email.
    Declared,
    /// The declared name, confirmed by the upstream similarity marking.
    SimilarTrusted,
    /// Strict rule-based extraction from the email local part.
    RuleStrict,
    /// Relaxed (single-token) rule-based extraction, second-chance pass.
    RuleRelaxed,
    /// No confident name could be resolved.
    None,
}

/// One valid, non-junk email after the per-author classification pass.
/// Immutable once emitted; only ever copied into output tables.
#[derive(Debug, Clone)]
pub struct ClassifiedEmail {
    pub email: String,
    pub domain: String,
    pub country: String,
    pub citations: i64,
    /// The author's declared name after cleaning. May still be a
    /// missing-name placeholder such as "Unknown".
    pub declared_name: String,
    pub name_missing: bool,
    /// True only for the first valid, non-junk email in the author's
    /// original list order.
    pub is_primary: bool,
    pub is_trusted: bool,
    pub resolved_name: String,
    pub source: NameSource,
}

impl ClassifiedEmail {
    /// Copies this email into an output row carrying the given name.
    pub fn row_with_name(&self, name: impl Into<String>) -> OutputRow {
        OutputRow {
            name: name.into(),
            email: self.email.clone(),
            domain: self.domain.clone(),
            country: self.country.clone(),
            citations: self.citations,
        }
    }
}

/// A row of one of the named output tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Citations")]
    pub citations: i64,
}

/// One metric of the summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "Metric")]
    pub metric: String,
    #[serde(rename = "Count")]
    pub count: usize,
}

impl SummaryRow {
    pub fn new(metric: impl Into<String>, count: usize) -> Self {
        Self {
            metric: metric.into(),
            count,
        }
    }
}

/// The finalized output tables plus summary statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    #[serde(rename = "All_Clean_Emails")]
    pub all_clean_emails: Vec<OutputRow>,
    #[serde(rename = "Similar_Name_Emails")]
    pub similar_name_emails: Vec<OutputRow>,
    #[serde(rename = "Name_Processed_Emails")]
    pub name_processed_emails: Vec<OutputRow>,
    #[serde(rename = "Email_Name_Extracted")]
    pub email_name_extracted: Vec<OutputRow>,
    #[serde(rename = "Final_Combined")]
    pub final_combined: Vec<OutputRow>,
    #[serde(rename = "Summary")]
    pub summary: Vec<SummaryRow>,
}

impl Report {
    /// The named tables in their fixed output order.
    pub fn named_tables(&self) -> [(&'static str, &[OutputRow]); 5] {
        [
            ("All_Clean_Emails", self.all_clean_emails.as_slice()),
            ("Similar_Name_Emails", self.similar_name_emails.as_slice()),
            (
                "Name_Processed_Emails",
                self.name_processed_emails.as_slice(),
            ),
            ("Email_Name_Extracted", self.email_name_extracted.as_slice()),
            ("Final_Combined", self.final_combined.as_slice()),
        ]
    }
}
