//! A heuristic, shape-directed reader over JSON text.
//!
//! This is **not** a validating parser — it relies on the well-known,
//! stable shapes returned by the Jira, Confluence, and Bitbucket REST
//! APIs. Every public function here is total: on malformed or missing
//! input it returns an empty/default value rather than panicking or
//! raising, which keeps the unified-search formatters in [`crate::search`]
//! branch-free in the face of upstream shape drift.
//!
//! No dependency on `serde_json` is used anywhere in this module, by
//! design — see the design notes in `SPEC_FULL.md`.

mod tokens;

pub use tokens::raw_token;

/// Returns the first string value associated with `"key":`, or `None` if
/// the key is missing or its value is not a string.
pub fn string_at(json: &str, key: &str) -> Option<String> {
    let start = tokens::find_value_start(json, key)?;
    tokens::parse_string_at(json, start).map(|(s, _)| s)
}

/// Same as [`string_at`], returning `dflt` when the key is absent.
pub fn string_or_default(json: &str, key: &str, dflt: &str) -> String {
    string_at(json, key).unwrap_or_else(|| dflt.to_string())
}

/// Parses the numeric token after `"key":`; returns `dflt` on absence or
/// parse failure.
pub fn int_at(json: &str, key: &str, dflt: i64) -> i64 {
    let Some(start) = tokens::find_value_start(json, key) else {
        return dflt;
    };
    let Some((token, _)) = tokens::parse_number_token(json, start) else {
        return dflt;
    };
    token
        .parse::<i64>()
        .or_else(|_| token.parse::<f64>().map(|f| f as i64))
        .unwrap_or(dflt)
}

/// Accepts `true`/`false` literal tokens after `"key":`.
pub fn bool_at(json: &str, key: &str, dflt: bool) -> bool {
    let Some(start) = tokens::find_value_start(json, key) else {
        return dflt;
    };
    if json[start..].starts_with("true") {
        true
    } else if json[start..].starts_with("false") {
        false
    } else {
        dflt
    }
}

/// Returns the raw substring of the object `{...}` or array `[...]` value
/// for `key`, with matched brackets.
pub fn block(json: &str, key: &str) -> Option<String> {
    let start = tokens::find_value_start(json, key)?;
    tokens::extract_block(json, start).map(str::to_string)
}

/// Ordered sequence of raw object/array blocks inside the named array.
pub fn array_blocks(json: &str, key: &str) -> Vec<String> {
    let Some(raw) = block(json, key) else {
        return Vec::new();
    };
    let Some(inner) = tokens::strip_outer_bracket(&raw) else {
        return Vec::new();
    };
    tokens::split_top_level(inner)
        .into_iter()
        .filter(|el| el.starts_with('{') || el.starts_with('['))
        .map(str::to_string)
        .collect()
}

/// Ordered sequence of strings inside a string array.
pub fn string_list(json: &str, key: &str) -> Vec<String> {
    let Some(raw) = block(json, key) else {
        return Vec::new();
    };
    let Some(inner) = tokens::strip_outer_bracket(&raw) else {
        return Vec::new();
    };
    tokens::split_top_level(inner)
        .into_iter()
        .filter_map(|el| tokens::parse_string_at(el, 0).map(|(s, _)| s))
        .collect()
}

/// Walks N-1 nested blocks, then extracts the last key as a string.
pub fn navigate(json: &str, keys: &[&str]) -> Option<String> {
    let (last, path) = keys.split_last()?;
    let mut cursor = json.to_string();
    for key in path {
        cursor = block(&cursor, key)?;
    }
    string_at(&cursor, last)
}

/// All `"text"` leaves in an Atlassian Document Format tree, joined by
/// single spaces and trimmed.
pub fn extract_adf_text(json: &str) -> String {
    let mut out = Vec::new();
    let mut cursor = 0usize;
    while let Some(start) = tokens::find_value_start(&json[cursor..], "text") {
        let abs_start = cursor + start;
        if let Some((s, end)) = tokens::parse_string_at(json, abs_start) {
            if !s.is_empty() {
                out.push(s);
            }
            cursor = end;
        } else {
            cursor = abs_start + json[abs_start..].chars().next().map_or(1, char::len_utf8);
        }
        if cursor >= json.len() {
            break;
        }
    }
    out.join(" ").trim().to_string()
}

/// Ordered mapping of keys to canonical string forms of their values, for
/// the text of a flat JSON object. Strings are unquoted; numbers and
/// booleans render as literals; nested objects/arrays are kept as raw
/// text; nulls become the empty string.
pub fn extract_argument_map(json_object: &str) -> Vec<(String, String)> {
    let trimmed = json_object.trim();
    let Some(inner) = tokens::strip_outer_brace(trimmed) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for pair in tokens::split_top_level(inner) {
        let Some((key, key_end)) = tokens::parse_string_at(pair, 0) else {
            continue;
        };
        let Some(colon) = pair[key_end..].find(':') else {
            continue;
        };
        let value_part = pair[key_end + colon + 1..].trim();
        out.push((key, tokens::canonical_value(value_part)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_at_basic() {
        let j = r#"{"name": "PROJ-1", "count": 3}"#;
        assert_eq!(string_at(j, "name"), Some("PROJ-1".to_string()));
        assert_eq!(string_at(j, "missing"), None);
    }

    #[test]
    fn string_at_handles_escapes() {
        let j = r#"{"text": "Line 1\nLine 2\"quoted\""}"#;
        assert_eq!(
            string_at(j, "text"),
            Some("Line 1\nLine 2\"quoted\"".to_string())
        );
    }

    #[test]
    fn string_at_unicode_escape() {
        let j = r#"{"name": "café"}"#;
        assert_eq!(string_at(j, "name"), Some("caf\u{e9}".to_string()));
    }

    #[test]
    fn string_or_default_fallback() {
        assert_eq!(string_or_default("{}", "k", "dflt"), "dflt");
    }

    #[test]
    fn int_at_parses_and_falls_back() {
        let j = r#"{"total": 42, "bad": "x"}"#;
        assert_eq!(int_at(j, "total", -1), 42);
        assert_eq!(int_at(j, "missing", -1), -1);
    }

    #[test]
    fn bool_at_reads_literal() {
        let j = r#"{"active": true, "closed": false}"#;
        assert!(bool_at(j, "active", false));
        assert!(!bool_at(j, "closed", true));
        assert!(bool_at(j, "missing", true));
    }

    #[test]
    fn block_extracts_nested_object() {
        let j = r#"{"fields": {"status": {"name": "Done"}}, "key": "X-1"}"#;
        let fields = block(j, "fields").unwrap();
        assert_eq!(fields, r#"{"status": {"name": "Done"}}"#);
    }

    #[test]
    fn block_handles_arrays_inside_objects() {
        let j = r#"{"issues": [{"key": "A-1"}, {"key": "A-2"}]}"#;
        let arr = block(j, "issues").unwrap();
        assert_eq!(arr, r#"[{"key": "A-1"}, {"key": "A-2"}]"#);
    }

    #[test]
    fn array_blocks_splits_elements() {
        let j = r#"{"issues": [{"key": "A-1"}, {"key": "A-2"}]}"#;
        let blocks = array_blocks(j, "issues");
        assert_eq!(blocks, vec![r#"{"key": "A-1"}"#, r#"{"key": "A-2"}"#]);
    }

    #[test]
    fn array_blocks_missing_key_is_empty() {
        assert!(array_blocks("{}", "issues").is_empty());
    }

    #[test]
    fn string_list_reads_strings() {
        let j = r#"{"labels": ["bug", "urgent"]}"#;
        assert_eq!(string_list(j, "labels"), vec!["bug", "urgent"]);
    }

    #[test]
    fn navigate_walks_nested_keys() {
        let j = r#"{"fields": {"status": {"name": "Done"}}}"#;
        assert_eq!(
            navigate(j, &["fields", "status", "name"]),
            Some("Done".to_string())
        );
    }

    #[test]
    fn navigate_missing_path_is_none() {
        let j = r#"{"fields": {}}"#;
        assert_eq!(navigate(j, &["fields", "status", "name"]), None);
    }

    #[test]
    fn extract_adf_text_joins_leaves() {
        let j = r#"{"type":"doc","content":[{"type":"paragraph","content":[
            {"type":"text","text":"Line 1"},{"type":"text","text":"Line 2"}]}]}"#;
        assert_eq!(extract_adf_text(j), "Line 1 Line 2");
    }

    #[test]
    fn extract_adf_text_empty_doc() {
        let j = r#"{"type":"doc","content":[]}"#;
        assert_eq!(extract_adf_text(j), "");
    }

    #[test]
    fn raw_token_preserves_shape() {
        assert_eq!(raw_token(r#"{"id": 1}"#, "id"), Some("1".to_string()));
        assert_eq!(
            raw_token(r#"{"id": "abc"}"#, "id"),
            Some("\"abc\"".to_string())
        );
        assert_eq!(raw_token(r#"{"id": null}"#, "id"), Some("null".to_string()));
    }

    #[test]
    fn extract_argument_map_preserves_order_and_shapes() {
        let j = r#"{"key": "PROJ-1", "count": 3, "active": true, "meta": {"a": 1}, "note": null}"#;
        let map = extract_argument_map(j);
        assert_eq!(
            map,
            vec![
                ("key".to_string(), "PROJ-1".to_string()),
                ("count".to_string(), "3".to_string()),
                ("active".to_string(), "true".to_string()),
                ("meta".to_string(), "{\"a\": 1}".to_string()),
                ("note".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn totality_on_malformed_input() {
        assert_eq!(string_at("not json at all", "key"), None);
        assert_eq!(int_at("{\"k\": ", "k", 7), 7);
        assert!(block("{", "k").is_none());
        assert!(array_blocks("[[[", "k").is_empty());
        assert!(extract_argument_map("not an object").is_empty());
        assert_eq!(extract_adf_text("{{{"), "");
    }

    #[test]
    fn extract_adf_text_skips_non_string_value_without_panicking() {
        let j = r#"{"text":é,"text":"ok"}"#;
        assert_eq!(extract_adf_text(j), "ok");
    }
}
