//! Header merging for outgoing requests.

use std::collections::HashMap;

/// Header name to value mapping.
pub type Headers = HashMap<String, String>;

/// Header forced onto every request that carries a body.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Value forced for [`CONTENT_TYPE`].
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Combines service defaults with per-call overrides.
///
/// Applied in this order:
///
/// 1. `defaults`, verbatim, when there are no `overrides` (absent stays absent)
/// 2. otherwise `defaults` (or an empty map) with every override key laid on
///    top, overrides winning
/// 3. when `has_body`, `Content-Type: application/json` last, replacing any
///    `Content-Type` key regardless of its casing
///
/// # Example
///
/// ```rust
/// use resource_loader::rest::{merge_headers, Headers};
///
/// let mut defaults = Headers::new();
/// defaults.insert("Content-Type".to_string(), "text/plain".to_string());
///
/// let merged = merge_headers(Some(&defaults), None, true).unwrap();
/// assert_eq!(merged["Content-Type"], "application/json");
///
/// assert!(merge_headers(None, None, false).is_none());
/// ```
#[must_use]
pub fn merge_headers(
    defaults: Option<&Headers>,
    overrides: Option<&Headers>,
    has_body: bool,
) -> Option<Headers> {
    let mut merged = overrides.map_or_else(
        || defaults.cloned(),
        |overrides| {
            let mut merged = defaults.cloned().unwrap_or_default();
            for (key, value) in overrides {
                merged.insert(key.clone(), value.clone());
            }
            Some(merged)
        },
    );

    if has_body {
        let headers = merged.get_or_insert_with(Headers::new);
        headers.retain(|key, _| !key.eq_ignore_ascii_case(CONTENT_TYPE));
        headers.insert(CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string());
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> Headers {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_absent_overrides_return_defaults_verbatim() {
        let defaults = headers(&[("Accept", "application/json")]);
        assert_eq!(merge_headers(Some(&defaults), None, false), Some(defaults));
        assert_eq!(merge_headers(None, None, false), None);
    }

    #[test]
    fn test_overrides_without_defaults_start_from_empty() {
        let overrides = headers(&[("X-Trace", "1")]);
        assert_eq!(
            merge_headers(None, Some(&overrides), false),
            Some(overrides)
        );
    }

    #[test]
    fn test_overrides_win_over_defaults() {
        let defaults = headers(&[("Accept", "text/html"), ("Authorization", "Bearer a")]);
        let overrides = headers(&[("Accept", "application/json"), ("X-Trace", "1")]);

        let merged = merge_headers(Some(&defaults), Some(&overrides), false).unwrap();

        assert_eq!(
            merged,
            headers(&[
                ("Accept", "application/json"),
                ("Authorization", "Bearer a"),
                ("X-Trace", "1"),
            ])
        );
    }

    #[test]
    fn test_empty_overrides_still_produce_a_map() {
        let merged = merge_headers(None, Some(&Headers::new()), false);
        assert_eq!(merged, Some(Headers::new()));
    }

    #[test]
    fn test_body_forces_json_content_type_over_everything() {
        let defaults = headers(&[("Content-Type", "text/plain")]);
        let overrides = headers(&[("Content-Type", "application/xml")]);

        let merged = merge_headers(Some(&defaults), Some(&overrides), true).unwrap();

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[CONTENT_TYPE], JSON_CONTENT_TYPE);
    }

    #[test]
    fn test_body_replaces_content_type_in_any_casing() {
        let overrides = headers(&[("content-type", "text/csv"), ("Accept", "*/*")]);

        let merged = merge_headers(None, Some(&overrides), true).unwrap();

        assert_eq!(
            merged,
            headers(&[("Content-Type", "application/json"), ("Accept", "*/*")])
        );
    }

    #[test]
    fn test_body_creates_headers_when_none_exist() {
        let merged = merge_headers(None, None, true).unwrap();
        assert_eq!(merged, headers(&[("Content-Type", "application/json")]));
    }

    #[test]
    fn test_without_body_content_type_is_left_alone() {
        let defaults = headers(&[("Content-Type", "text/plain")]);
        let merged = merge_headers(Some(&defaults), None, false).unwrap();
        assert_eq!(merged[CONTENT_TYPE], "text/plain");
    }
}
