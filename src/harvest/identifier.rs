//! Listing identifiers
//!
//! Identifiers are kept as strings so leading zeros survive and arbitrarily long
//! values never overflow. Ordering is plain string order.

use std::fmt;

/// A validated, digit-only listing identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    /// Accepts a raw attribute value if it is a valid identifier
    ///
    /// Surrounding whitespace is not trimmed: `" 123"` is rejected just like
    /// any other value containing a non-digit.
    pub fn parse(raw: &str) -> Option<Self> {
        if is_valid_identifier(raw) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns true if the value is non-empty and made only of ASCII decimal digits
///
/// Only `0`-`9` count. Non-ASCII digits such as Arabic-Indic `١٢٣` are
/// rejected, unlike Python's `str.isdigit()` which accepts them.
pub fn is_valid_identifier(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())
}
