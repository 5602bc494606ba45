//! Maps email domains to human-readable country/region labels.
//!
//! A best-effort suffix lookup, not a full TLD registry. Unknown domains
//! fall back to [`UNKNOWN_COUNTRY`].

use once_cell::sync::Lazy;
use std::cmp::Reverse;

/// Label returned for domains the table does not cover.
pub const UNKNOWN_COUNTRY: &str = "Other/Global";

/// Country suffixes, including academic/commercial sub-TLDs where a bare
/// country code would be too coarse.
const TLD_COUNTRIES: &[(&str, &str)] = &[
    (".ac.uk", "United Kingdom"),
    (".co.uk", "United Kingdom"),
    (".uk", "United Kingdom"),
    (".edu.au", "Australia"),
    (".com.au", "Australia"),
    (".net.au", "Australia"),
    (".au", "Australia"),
    (".edu.cn", "China"),
    (".com.cn", "China"),
    (".cn", "China"),
    (".edu.hk", "Hong Kong"),
    (".hk", "Hong Kong"),
    (".edu.tw", "Taiwan"),
    (".tw", "Taiwan"),
    (".de", "Germany"),
    (".fr", "France"),
    (".edu", "USA (Academic)"),
    (".ac.jp", "Japan"),
    (".jp", "Japan"),
    (".ac.kr", "South Korea"),
    (".kr", "South Korea"),
    (".ca", "Canada"),
    (".ac.in", "India"),
    (".co.in", "India"),
    (".in", "India"),
    (".com.sg", "Singapore"),
    (".sg", "Singapore"),
    (".it", "Italy"),
    (".es", "Spain"),
    (".nl", "Netherlands"),
    (".ru", "Russia"),
    (".br", "Brazil"),
    (".pk", "Pakistan"),
    (".se", "Sweden"),
    (".no", "Norway"),
    (".dk", "Denmark"),
    (".fi", "Finland"),
    (".pl", "Poland"),
    (".ch", "Switzerland"),
    (".at", "Austria"),
    (".be", "Belgium"),
    (".cz", "Czech Republic"),
    (".tr", "Turkey"),
    (".gr", "Greece"),
    (".ac.il", "Israel"),
    (".il", "Israel"),
    (".ac.za", "South Africa"),
    (".za", "South Africa"),
    (".mx", "Mexico"),
    (".ar", "Argentina"),
    (".cl", "Chile"),
    (".co", "Colombia"),
    (".my", "Malaysia"),
    (".id", "Indonesia"),
    (".th", "Thailand"),
    (".vn", "Vietnam"),
    (".ph", "Philippines"),
    (".nz", "New Zealand"),
    (".ie", "Ireland"),
    (".pt", "Portugal"),
    (".hu", "Hungary"),
    (".ro", "Romania"),
    (".ua", "Ukraine"),
    (".ir", "Iran"),
    (".eg", "Egypt"),
    (".sa", "Saudi Arabia"),
    (".ae", "UAE"),
];

// Longest suffix must win (.ac.uk before .uk), so the lookup order is fixed
// once here instead of being re-sorted per call.
static TLD_TABLE: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    let mut table = TLD_COUNTRIES.to_vec();
    table.sort_by_key(|(suffix, _)| Reverse(suffix.len()));
    table
});

/// Resolves the country/region label for an email domain.
///
/// Matching is case-insensitive and longest-suffix-first; unmatched domains
/// return [`UNKNOWN_COUNTRY`].
pub fn country_for_domain(domain: &str) -> &'static str {
    let domain = domain.to_lowercase();
    TLD_TABLE
        .iter()
        .find(|(suffix, _)| domain.ends_with(suffix))
        .map(|(_, country)| *country)
        .unwrap_or(UNKNOWN_COUNTRY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_suffix_wins() {
        // .ac.uk must not fall through to the generic .uk entry.
        assert_eq!(country_for_domain("dept.ac.uk"), "United Kingdom");
        assert_eq!(country_for_domain("cs.edu.au"), "Australia");
        assert_eq!(country_for_domain("physics.ac.jp"), "Japan");
        // The .edu entry must not shadow .edu.au or .edu.cn.
        assert_eq!(country_for_domain("uni.edu.cn"), "China");
        assert_eq!(country_for_domain("univ.edu"), "USA (Academic)");
    }

    #[test]
    fn test_plain_country_codes() {
        assert_eq!(country_for_domain("test.pk"), "Pakistan");
        assert_eq!(country_for_domain("test.br"), "Brazil");
        assert_eq!(country_for_domain("test.ru"), "Russia");
        assert_eq!(country_for_domain("tum.de"), "Germany");
        assert_eq!(country_for_domain("lne.fr"), "France");
    }

    #[test]
    fn test_unknown_domains_fall_back() {
        assert_eq!(country_for_domain("test.unknown"), UNKNOWN_COUNTRY);
        assert_eq!(country_for_domain("apolloresearch.ai"), UNKNOWN_COUNTRY);
        assert_eq!(country_for_domain(""), UNKNOWN_COUNTRY);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(country_for_domain("Cl.CAM.AC.UK"), "United Kingdom");
    }
}
