//! Per-author classification: filters an author's harvested emails and
//! resolves a name and name source for each survivor.

use crate::core::config::Config;
use crate::core::models::{AuthorRecord, ClassifiedEmail, NameSource};
use crate::utils::country::country_for_domain;
use crate::utils::email::{is_junk_email, is_valid_email};
use crate::utils::names::{clean_name, extract_name_from_email, is_missing_name, is_name_similar_to_email};

/// Classifies one author's emails, preserving their original order.
///
/// Emails are gated through the structural validator and the junk filter;
/// the first survivor is the author's primary email. Each surviving email
/// gets a domain, a country, and a resolved name:
/// - an upstream-trusted email carries the declared name regardless of its
///   position in the list;
/// - an untrusted primary email carries the declared name when one exists;
/// - everything else falls back to strict rule-based extraction. Extra
///   emails never inherit the declared name, since a shared author row is
///   not evidence they belong to that name.
pub fn classify_author(config: &Config, record: &AuthorRecord) -> Vec<ClassifiedEmail> {
    let declared_name = clean_name(record.name.as_deref());
    let name_missing = is_missing_name(config, &declared_name);

    let valid_emails: Vec<&String> = record
        .all_emails
        .iter()
        .filter(|email| is_valid_email(config, email) && !is_junk_email(config, email))
        .collect();

    tracing::debug!(
        "Author '{}': {} of {} emails survived filtering",
        declared_name,
        valid_emails.len(),
        record.all_emails.len()
    );

    valid_emails
        .iter()
        .enumerate()
        .map(|(index, email)| {
            let domain = email
                .split_once('@')
                .map(|(_, d)| d.to_string())
                .unwrap_or_default();
            let country = country_for_domain(&domain).to_string();
            let is_primary = index == 0;

            let mut is_trusted = record.similar_emails.contains(email.as_str());
            if is_trusted && config.verify_similar_names {
                is_trusted = is_name_similar_to_email(config, &declared_name, email);
                if !is_trusted {
                    tracing::debug!(
                        "Downgrading trust for '{}': declared name '{}' not found in local part",
                        email,
                        declared_name
                    );
                }
            }

            let (resolved_name, source) = if is_trusted {
                (declared_name.clone(), NameSource::SimilarTrusted)
            } else if is_primary && !name_missing {
                (declared_name.clone(), NameSource::Declared)
            } else {
                let extracted = extract_name_from_email(config, email, false);
                if extracted.is_empty() {
                    (String::new(), NameSource::None)
                } else {
                    (extracted, NameSource::RuleStrict)
                }
            };

            ClassifiedEmail {
                email: (*email).clone(),
                domain,
                country,
                citations: record.citations,
                declared_name: declared_name.clone(),
                name_missing,
                is_primary,
                is_trusted,
                resolved_name,
                source,
            }
        })
        .collect()
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

    fn record(
        name: Option<&str>,
        citations: i64,
        all_emails: &str,
        similar_emails: &str,
    ) -> AuthorRecord {
        AuthorRecord::from_raw(name, citations, Some(all_emails), Some(similar_emails))
    }

    #[test]
    fn test_primary_email_keeps_declared_name() {
        let config = test_config();
        let rows = classify_author(
            &config,
            &record(Some("Jane Doe"), 10, "jane@univ.edu, other@lab.org", ""),
        );
        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_primary);
        assert_eq!(rows[0].resolved_name, "Jane Doe");
        assert_eq!(rows[0].source, NameSource::Declared);
        assert!(!rows[1].is_primary);
        assert_ne!(rows[1].resolved_name, "Jane Doe");
    }

    #[test]
    fn test_exactly_one_primary_per_author() {
        let config = test_config();
        let rows = classify_author(
            &config,
            &record(
                Some("Jane Doe"),
                3,
                "not-an-email, firstname.lastname@lne.fr, jane@univ.edu, jd@lab.org",
                "",
            ),
        );
        // The malformed and junk entries are dropped; the first survivor is
        // the primary.
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].email, "jane@univ.edu");
        assert_eq!(rows.iter().filter(|r| r.is_primary).count(), 1);
    }

    #[test]
    fn test_trusted_extra_email_gets_declared_name() {
        let config = test_config();
        let rows = classify_author(
            &config,
            &record(
                Some("Zhenhua Feng"),
                6,
                "primary@univ.edu, z.feng@surrey.ac.uk",
                "z.feng@surrey.ac.uk",
            ),
        );
        assert_eq!(rows[1].source, NameSource::SimilarTrusted);
        assert_eq!(rows[1].resolved_name, "Zhenhua Feng");
        assert!(rows[1].is_trusted);
        assert!(!rows[1].is_primary);
    }

    #[test]
    fn test_missing_name_falls_back_to_extraction() {
        let config = test_config();
        let rows = classify_author(
            &config,
            &record(Some("Unknown"), 5, "mohammad.ghadri@mail.com, guohao@lab.org", ""),
        );
        assert!(rows[0].name_missing);
        assert_eq!(rows[0].source, NameSource::RuleStrict);
        assert_eq!(rows[0].resolved_name, "Mohammad Ghadri");
        // Single-token local part: strict extraction fails, no name resolved.
        assert_eq!(rows[1].source, NameSource::None);
        assert_eq!(rows[1].resolved_name, "");
    }

    #[test]
    fn test_domain_and_country_are_resolved() {
        let config = test_config();
        let rows = classify_author(&config, &record(Some("A B"), 1, "a.b@dept.ac.uk", ""));
        assert_eq!(rows[0].domain, "dept.ac.uk");
        assert_eq!(rows[0].country, "United Kingdom");
    }

    #[test]
    fn test_verify_similar_names_downgrades_mismatches() {
        let config = ConfigBuilder::new()
            .verify_similar_names(true)
            .build()
            .unwrap();
        let rows = classify_author(
            &config,
            &record(
                Some("John Smith"),
                2,
                "jane.doe@example.com, smith@univ.edu",
                "jane.doe@example.com, smith@univ.edu",
            ),
        );
        // The name does not appear in jane.doe; the upstream marking is
        // rejected and the email is handled as an ordinary primary.
        assert!(!rows[0].is_trusted);
        assert_eq!(rows[0].source, NameSource::Declared);
        // "smith" is embedded, so the marking stands.
        assert!(rows[1].is_trusted);
        assert_eq!(rows[1].source, NameSource::SimilarTrusted);
    }

    #[test]
    fn test_author_without_valid_emails_yields_nothing() {
        let config = test_config();
        let rows = classify_author(&config, &record(Some("Jane Doe"), 9, "broken, user@x", ""));
        assert!(rows.is_empty());
    }
}
