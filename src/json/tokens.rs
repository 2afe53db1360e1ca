//! Low-level scanning primitives shared by the extractor functions in
//! `json::mod`. Kept separate so the public contract in `mod.rs` reads as
//! a flat list of operations, matching the table in `SPEC_FULL.md`.

/// Finds `"key"` followed by optional whitespace and a `:`, and returns the
/// byte offset of the value that follows (whitespace already skipped).
pub(super) fn find_value_start(json: &str, key: &str) -> Option<usize> {
    let needle = format!("\"{key}\"");
    let bytes = json.as_bytes();
    let mut search_from = 0usize;
    while let Some(rel) = json.get(search_from..).and_then(|s| s.find(&needle)) {
        let pos = search_from + rel;
        let mut i = pos + needle.len();
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i < bytes.len() && bytes[i] == b':' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            return Some(i);
        }
        search_from = pos + needle.len();
    }
    None
}

/// Parses a JSON string literal starting at `start` (which must point at
/// the opening `"`). Returns the unescaped value and the byte offset just
/// past the closing quote.
pub(super) fn parse_string_at(json: &str, start: usize) -> Option<(String, usize)> {
    let bytes = json.as_bytes();
    if bytes.get(start) != Some(&b'"') {
        return None;
    }
    let mut out = String::new();
    let mut i = start + 1;
    let mut seg_start = i;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                out.push_str(&json[seg_start..i]);
                return Some((out, i + 1));
            }
            b'\\' => {
                out.push_str(&json[seg_start..i]);
                i += 1;
                let esc = *bytes.get(i)?;
                match esc {
                    b'"' => out.push('"'),
                    b'\\' => out.push('\\'),
                    b'/' => out.push('/'),
                    b'n' => out.push('\n'),
                    b't' => out.push('\t'),
                    b'r' => out.push('\r'),
                    b'b' => out.push('\u{8}'),
                    b'f' => out.push('\u{c}'),
                    b'u' => {
                        let hex = json.get(i + 1..i + 5)?;
                        let cp = u32::from_str_radix(hex, 16).ok()?;
                        if let Some(ch) = char::from_u32(cp) {
                            out.push(ch);
                        }
                        i += 4;
                    }
                    other => out.push(other as char),
                }
                i += 1;
                seg_start = i;
            }
            _ => i += 1,
        }
    }
    None
}

/// Consumes the maximal run of digits, sign, decimal point, and exponent
/// markers starting at `start`. Returns the raw token text and the offset
/// just past it.
pub(super) fn parse_number_token(json: &str, start: usize) -> Option<(&str, usize)> {
    let bytes = json.as_bytes();
    let mut i = start;
    if bytes.get(i).is_some_and(|b| *b == b'-' || *b == b'+') {
        i += 1;
    }
    let mut seen_digit = false;
    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => {
                seen_digit = true;
                i += 1;
            }
            b'.' => i += 1,
            b'e' | b'E' => {
                i += 1;
                if bytes.get(i).is_some_and(|b| *b == b'+' || *b == b'-') {
                    i += 1;
                }
            }
            _ => break,
        }
    }
    if !seen_digit {
        return None;
    }
    Some((&json[start..i], i))
}

/// Extracts the raw `{...}` or `[...]` substring starting at `start`,
/// using bracket counting that skips brackets inside string literals.
pub(super) fn extract_block(json: &str, start: usize) -> Option<&str> {
    let bytes = json.as_bytes();
    let open = *bytes.get(start)?;
    if open != b'{' && open != b'[' {
        return None;
    }
    let mut depth: i32 = 0;
    let mut i = start;
    let mut in_string = false;
    while i < bytes.len() {
        let c = bytes[i];
        if in_string {
            if c == b'\\' {
                i += 2;
                continue;
            }
            if c == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        match c {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth -= 1;
                if depth == 0 {
                    return json.get(start..=i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Strips one layer of matching `{` / `}` from a trimmed block, returning
/// the interior text.
pub(super) fn strip_outer_brace(s: &str) -> Option<&str> {
    let s = s.trim();
    if s.starts_with('{') && s.ends_with('}') {
        Some(&s[1..s.len() - 1])
    } else {
        None
    }
}

/// Strips one layer of matching `[` / `]` or `{` / `}` — used by
/// `array_blocks`/`string_list`, which accept either bracket form for the
/// outer container returned by `block`.
pub(super) fn strip_outer_bracket(s: &str) -> Option<&str> {
    let s = s.trim();
    if (s.starts_with('[') && s.ends_with(']')) || (s.starts_with('{') && s.ends_with('}')) {
        Some(&s[1..s.len() - 1])
    } else {
        None
    }
}

/// Splits the interior of a block into its top-level comma-separated
/// elements, respecting nested brackets and string literals.
pub(super) fn split_top_level(s: &str) -> Vec<&str> {
    let bytes = s.as_bytes();
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut in_string = false;
    let mut start = 0usize;
    let mut i = 0usize;
    while i < bytes.len() {
        let c = bytes[i];
        if in_string {
            if c == b'\\' {
                i += 2;
                continue;
            }
            if c == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        match c {
            b'"' => {
                in_string = true;
                i += 1;
            }
            b'{' | b'[' => {
                depth += 1;
                i += 1;
            }
            b'}' | b']' => {
                depth -= 1;
                i += 1;
            }
            b',' if depth == 0 => {
                parts.push(s[start..i].trim());
                i += 1;
                start = i;
            }
            _ => i += 1,
        }
    }
    let last = s[start..].trim();
    if !last.is_empty() {
        parts.push(last);
    }
    parts.into_iter().filter(|p| !p.is_empty()).collect()
}

/// Canonicalizes a single value's raw text per `extract_argument_map`'s
/// rules: strings unquoted, nulls to empty, everything else verbatim.
pub(super) fn canonical_value(value: &str) -> String {
    if value.starts_with('"') {
        parse_string_at(value, 0).map_or_else(String::new, |(s, _)| s)
    } else if value.starts_with('{') || value.starts_with('[') {
        extract_block(value, 0).unwrap_or("").to_string()
    } else if value.starts_with("null") {
        String::new()
    } else {
        value.trim().to_string()
    }
}

/// Returns the raw JSON token (string incl. quotes, number, `true`,
/// `false`, or `null`) associated with `key`, preserving its exact shape.
pub fn raw_token(json: &str, key: &str) -> Option<String> {
    let start = find_value_start(json, key)?;
    let bytes = json.as_bytes();
    match *bytes.get(start)? {
        b'"' => {
            let (_, end) = parse_string_at(json, start)?;
            json.get(start..end).map(str::to_string)
        }
        b'{' | b'[' => extract_block(json, start).map(str::to_string),
        b'-' | b'+' | b'0'..=b'9' => parse_number_token(json, start).map(|(t, _)| t.to_string()),
        _ => {
            for lit in ["null", "true", "false"] {
                if json[start..].starts_with(lit) {
                    return Some(lit.to_string());
                }
            }
            None
        }
    }
}
