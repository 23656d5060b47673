//! Email address validation for the claim form.

use regex::Regex;
use std::sync::LazyLock;

/// Conventional `local-part@domain.tld` shape with a top-level segment of at
/// least two letters. No normalization and no length bounds.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// Check whether the entered address is a syntactically valid email address
pub fn is_valid_input(address: &str) -> bool {
    EMAIL_PATTERN.is_match(address)
}
