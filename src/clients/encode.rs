//! Percent-encoding for free-text query strings and URL path segments.
//!
//! Encodes everything outside RFC 3986's unreserved set
//! (`ALPHA / DIGIT / "-" / "." / "_" / "~"`) — `percent_encoding`'s
//! `NON_ALPHANUMERIC` set is a byte too aggressive, since it would also
//! escape `~`, which JQL/CQL and issue keys carry unescaped.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[must_use]
pub fn component(raw: &str) -> String {
    percent_encoding::utf8_percent_encode(raw, UNRESERVED).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_spaces_and_equals_but_not_tilde() {
        let encoded = component("project = FOO AND status = Done");
        assert!(encoded.contains("%20AND%20"));
        assert!(encoded.contains("%3D"));
    }

    #[test]
    fn preserves_tilde_and_hyphen() {
        let encoded = component("text ~ \"login timeout\" ORDER BY updated DESC");
        assert_eq!(
            encoded,
            "text%20~%20%22login%20timeout%22%20ORDER%20BY%20updated%20DESC"
        );
        assert_eq!(component("PROJ-1"), "PROJ-1");
    }
}
