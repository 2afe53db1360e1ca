//! Shared helpers used by every product handler: argument lookup, JSON
//! string escaping, ADF envelope synthesis, and structured-query
//! auto-detection.

use crate::error::HandlerError;

const DEFAULT_MAX_RESULTS: i64 = 25;

/// Looks up `name` in an `extractArgumentMap`-shaped argument list.
#[must_use]
pub fn lookup<'a>(args: &'a [(String, String)], name: &str) -> Option<&'a str> {
    args.iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

/// Required string argument.
///
/// # Errors
/// Returns [`HandlerError::MissingArgument`] if absent or blank.
pub fn required<'a>(args: &'a [(String, String)], name: &str) -> Result<&'a str, HandlerError> {
    match lookup(args, name) {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(HandlerError::MissingArgument(name.to_string())),
    }
}

/// Optional string argument with a fallback.
#[must_use]
pub fn optional<'a>(args: &'a [(String, String)], name: &str, default: &'a str) -> &'a str {
    lookup(args, name).filter(|v| !v.is_empty()).unwrap_or(default)
}

/// `maxResults`, defaulting to 25 on absence or parse failure — never an
/// error, per the handler defaults table.
#[must_use]
pub fn max_results(args: &[(String, String)]) -> i64 {
    lookup(args, "maxResults")
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(DEFAULT_MAX_RESULTS)
}

/// An integer argument that must parse if present and required.
///
/// # Errors
/// Returns [`HandlerError::MissingArgument`] if absent,
/// [`HandlerError::InvalidArgument`] if present but not an integer.
pub fn required_int(args: &[(String, String)], name: &str) -> Result<i64, HandlerError> {
    let raw = required(args, name)?;
    raw.parse::<i64>()
        .map_err(|_| HandlerError::InvalidArgument {
            name: name.to_string(),
            expected: "an integer",
            actual: raw.to_string(),
        })
}

/// Escapes `\`, `"`, `\n`, `\r`, `\t` for embedding in a JSON string
/// literal.
#[must_use]
pub fn escape_json_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// Wraps plain text in a single `doc` → `paragraph` → `text` Atlassian
/// Document Format envelope.
#[must_use]
pub fn adf_document(text: &str) -> String {
    format!(
        r#"{{"type":"doc","version":1,"content":[{{"type":"paragraph","content":[{{"type":"text","text":"{}"}}]}}]}}"#,
        escape_json_string(text)
    )
}

/// Keywords and operators that mark a query as already-structured
/// JQL/CQL rather than free text, per the handler's auto-detection rule.
const STRUCTURED_MARKERS: &[&str] = &["=", "~", " AND ", " OR ", "ORDER BY"];
const STRUCTURED_LEADING_KEYWORDS: &[&str] = &["PROJECT", "STATUS", "TYPE", "SPACE"];

/// True if `query` looks like raw JQL/CQL rather than natural-language
/// free text.
#[must_use]
pub fn is_structured_query(query: &str) -> bool {
    if STRUCTURED_MARKERS.iter().any(|m| query.contains(m)) {
        return true;
    }
    let upper = query.trim_start().to_uppercase();
    STRUCTURED_LEADING_KEYWORDS
        .iter()
        .any(|kw| upper.starts_with(kw))
}

/// Wraps free text in a default text-search expression ordered by
/// `order_by_field DESC`, e.g. `text ~ "login timeout" ORDER BY updated
/// DESC`.
#[must_use]
pub fn default_text_search(query: &str, order_by_field: &str) -> String {
    format!(
        "text ~ \"{}\" ORDER BY {} DESC",
        escape_json_string(query),
        order_by_field
    )
}

/// Resolves `query` to a JQL/CQL expression: verbatim if already
/// structured, else wrapped in a default text-search expression.
#[must_use]
pub fn resolve_query(query: &str, order_by_field: &str) -> String {
    if is_structured_query(query) {
        query.to_string()
    } else {
        default_text_search(query, order_by_field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_missing_and_blank() {
        let args = vec![("a".to_string(), "  ".to_string())];
        assert!(required(&args, "a").is_err());
        assert!(required(&args, "b").is_err());
    }

    #[test]
    fn max_results_defaults_on_absence_and_garbage() {
        assert_eq!(max_results(&[]), 25);
        let args = vec![("maxResults".to_string(), "not-a-number".to_string())];
        assert_eq!(max_results(&args), 25);
        let args = vec![("maxResults".to_string(), "7".to_string())];
        assert_eq!(max_results(&args), 7);
    }

    #[test]
    fn required_int_errors_with_expected_and_actual() {
        let args = vec![("boardId".to_string(), "not-a-number".to_string())];
        let err = required_int(&args, "boardId").unwrap_err();
        match err {
            HandlerError::InvalidArgument { name, actual, .. } => {
                assert_eq!(name, "boardId");
                assert_eq!(actual, "not-a-number");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn escape_json_string_covers_all_five_escapes() {
        let escaped = escape_json_string("a\\b\"c\nd\re\tf");
        assert_eq!(escaped, "a\\\\b\\\"c\\nd\\re\\tf");
    }

    #[test]
    fn adf_document_round_trips_quotes_and_newlines() {
        let doc = adf_document("Line 1\nLine 2\"quoted\"");
        assert!(doc.contains("\"type\":\"doc\""));
        assert!(doc.contains("\"version\":1"));
        assert!(doc.contains("Line 1\\nLine 2\\\"quoted\\\""));
    }

    #[test]
    fn structured_query_detection_matches_spec_scenarios() {
        assert!(is_structured_query("project = FOO AND status = Done"));
        assert!(!is_structured_query("login timeout"));
    }

    #[test]
    fn default_text_search_matches_expected_expression() {
        assert_eq!(
            default_text_search("login timeout", "updated"),
            "text ~ \"login timeout\" ORDER BY updated DESC"
        );
    }
}
