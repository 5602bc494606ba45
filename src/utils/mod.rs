//! Pure helper functions for email and name heuristics.

pub mod country;
pub mod email;
pub mod names;

/// Separators a local part is split on when it is examined token-by-token.
pub(crate) const LOCAL_PART_SEPARATORS: &[char] = &['.', '-', '_', '+'];
