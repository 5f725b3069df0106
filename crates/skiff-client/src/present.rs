//! JSON presentation helper

use serde_json::Value;

/// Render a JSON body for display.
///
/// With `pretty` set the value is re-indented with two spaces; bytes that
/// do not parse as JSON pass through verbatim, since this boundary only
/// affects human-readable output.
#[must_use]
pub fn present(bytes: &[u8], pretty: bool) -> String {
    if !pretty {
        return String::from_utf8_lossy(bytes).into_owned();
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(value) => serde_json::to_string_pretty(&value)
            .unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned()),
        Err(_) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_mode_passes_bytes_through() {
        let body = br#"{"a":1,"b":[2,3]}"#;
        assert_eq!(present(body, false), r#"{"a":1,"b":[2,3]}"#);
    }

    #[test]
    fn pretty_mode_round_trips() {
        let body = br#"{"a":1,"b":[2,3],"c":{"d":"e"}}"#;
        let rendered = present(body, true);
        assert!(rendered.contains("\n  \"a\": 1"));
        let reparsed: Value = serde_json::from_str(&rendered).unwrap();
        let original: Value = serde_json::from_slice(body).unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn pretty_mode_tolerates_malformed_json() {
        assert_eq!(present(b"not json {", true), "not json {");
        assert_eq!(present(b"", true), "");
    }
}
