//! Structural email validation and the junk/placeholder filter.

use crate::core::config::Config;
use crate::utils::LOCAL_PART_SEPARATORS;

/// Returns the substring before the `@`, or the whole string when there is
/// no `@` at all.
pub(crate) fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or_default()
}

/// Checks that an address has the shape `local@domain.tld`.
///
/// Purely structural: anchored at both ends, exactly one `@`, at least one
/// dot in the domain, no surrounding whitespace. Runs before every other
/// check; no normalization is performed here.
pub fn is_valid_email(config: &Config, candidate: &str) -> bool {
    !candidate.is_empty() && config.email_regex.is_match(candidate)
}

/// Decides whether a syntactically valid email is junk: a scraped sentence,
/// instruction text, or a placeholder rather than a real identifier.
///
/// The checks are OR'd; their order only buys early exits. Junk emails are
/// silently dropped by the pipeline, so this logs at trace level only.
pub fn is_junk_email(config: &Config, email: &str) -> bool {
    if email.is_empty() {
        return true;
    }
    let local = local_part(email).to_lowercase();

    // Instruction fragments and placeholders anywhere in the local part.
    if let Some(word) = config.block_words.iter().find(|w| local.contains(w.as_str())) {
        tracing::trace!("Junk email '{}': block word '{}'", email, word);
        return true;
    }

    let tokens: Vec<&str> = local
        .split(LOCAL_PART_SEPARATORS)
        .filter(|t| !t.is_empty())
        .collect();

    // first.last@ / first-last@ templates. Token equality, not substring,
    // so that real names merely containing "first"/"last" survive.
    if tokens.iter().any(|t| *t == "first") && tokens.iter().any(|t| *t == "last") {
        tracing::trace!("Junk email '{}': first/last template", email);
        return true;
    }

    // A single generic token with no other content carries no identity.
    if tokens.len() == 1 && config.generic_local_tokens.iter().any(|g| g == tokens[0]) {
        tracing::trace!("Junk email '{}': generic single token", email);
        return true;
    }

    if local.starts_with("name.") || local.ends_with(".name") || local.contains(".name.") {
        tracing::trace!("Junk email '{}': 'name' placeholder segment", email);
        return true;
    }

    // A webmail domain leading the local part is a scraping artifact where
    // the domain leaked into the address.
    if let Some(prefix) = config
        .webmail_prefixes
        .iter()
        .find(|p| local.starts_with(p.as_str()))
    {
        tracing::trace!("Junk email '{}': webmail prefix '{}'", email, prefix);
        return true;
    }

    // Real usernames are short; scraped sentences are long.
    if local.chars().count() > config.max_local_part_length {
        tracing::trace!("Junk email '{}': local part too long", email);
        return true;
    }

    false
}
