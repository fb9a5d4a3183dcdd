//! Defensive attribute readers for loosely-typed records.
//!
//! Plan stops and raw place candidates arrive as arbitrary JSON shapes: fields
//! may be missing, carry the wrong type, or hold provider-specific tokens such
//! as `"$$$"` price levels. Every reader in this crate degrades to
//! `None`/empty instead of failing, so upstream layers never have to guard a
//! field access.

use serde_json::Value;

/// Read a string field. Non-string scalars and blank/whitespace-only strings
/// are treated as absent; the result is trimmed.
pub fn string_field(record: &Value, key: &str) -> Option<String> {
    let raw = record.get(key)?.as_str()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Read the first resolvable string across a chain of keys.
pub fn first_string(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| string_field(record, key))
}

/// Read a list of strings. Elements are lowercased, trimmed, and deduplicated
/// preserving first-seen order; non-string elements are skipped. A bare string
/// value is accepted as a one-element list.
pub fn string_list_field(record: &Value, key: &str) -> Vec<String> {
    match record.get(key) {
        Some(Value::Array(items)) => {
            let mut out = Vec::new();
            for item in items {
                if let Some(token) = item.as_str() {
                    push_token(&mut out, token);
                }
            }
            out
        }
        Some(Value::String(single)) => {
            let mut out = Vec::new();
            push_token(&mut out, single);
            out
        }
        _ => Vec::new(),
    }
}

fn push_token(out: &mut Vec<String>, raw: &str) {
    let token = raw.trim().to_lowercase();
    if !token.is_empty() && !out.iter().any(|seen| seen == &token) {
        out.push(token);
    }
}

/// Read a numeric field. JSON numbers pass through; a string made only of one
/// or more `$` characters yields its length (price-level token, `"$$$"` is 3);
/// any other string gets a trimmed numeric parse. Everything else is absent.
pub fn number_field(record: &Value, key: &str) -> Option<f64> {
    match record.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(raw) => parse_numeric_token(raw),
        _ => None,
    }
}

/// Read the first resolvable number across a chain of keys.
pub fn first_number(record: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| number_field(record, key))
}

fn parse_numeric_token(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.chars().all(|c| c == '$') {
        return Some(trimmed.len() as f64);
    }
    trimmed.parse::<f64>().ok()
}

/// Read a nested object sub-record (e.g. `placeRef`, `placeLite`).
pub fn nested_record<'a>(record: &'a Value, key: &str) -> Option<&'a Value> {
    let nested = record.get(key)?;
    if nested.is_object() {
        Some(nested)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_field_trims_and_rejects_blank() {
        let record = json!({
            "name": "  Oak Row Bistro  ",
            "title": "   ",
            "count": 3,
        });
        assert_eq!(string_field(&record, "name").as_deref(), Some("Oak Row Bistro"));
        assert_eq!(string_field(&record, "title"), None);
        assert_eq!(string_field(&record, "count"), None);
        assert_eq!(string_field(&record, "missing"), None);
    }

    #[test]
    fn first_string_follows_fallback_chain() {
        let record = json!({ "title": "", "label": "Back Room" });
        assert_eq!(
            first_string(&record, &["name", "title", "label"]).as_deref(),
            Some("Back Room")
        );
        assert_eq!(first_string(&record, &["name", "title"]), None);
    }

    #[test]
    fn string_list_lowercases_and_dedups_in_order() {
        let record = json!({
            "types": ["Bar", " bar ", "MUSEUM", 7, null, "museum", "arcade"],
        });
        assert_eq!(
            string_list_field(&record, "types"),
            vec!["bar", "museum", "arcade"]
        );
    }

    #[test]
    fn string_list_accepts_bare_string() {
        let record = json!({ "types": " Cafe " });
        assert_eq!(string_list_field(&record, "types"), vec!["cafe"]);
        assert!(string_list_field(&record, "tags").is_empty());
        assert!(string_list_field(&json!({ "types": 12 }), "types").is_empty());
    }

    #[test]
    fn number_field_passes_numbers_through() {
        let record = json!({ "energy": 0.7, "rank": 4 });
        assert_eq!(number_field(&record, "energy"), Some(0.7));
        assert_eq!(number_field(&record, "rank"), Some(4.0));
    }

    #[test]
    fn number_field_counts_price_tokens() {
        let record = json!({ "price": "$$$", "cost": " $$ " });
        assert_eq!(number_field(&record, "price"), Some(3.0));
        assert_eq!(number_field(&record, "cost"), Some(2.0));
    }

    #[test]
    fn number_field_parses_numeric_strings() {
        let record = json!({ "distance": " 12.5 ", "bogus": "12km", "flag": true });
        assert_eq!(number_field(&record, "distance"), Some(12.5));
        assert_eq!(number_field(&record, "bogus"), None);
        assert_eq!(number_field(&record, "flag"), None);
    }

    #[test]
    fn first_number_follows_fallback_chain() {
        let record = json!({ "priceLevel": "$$", "cost": "oops" });
        assert_eq!(first_number(&record, &["cost", "priceLevel"]), Some(2.0));
    }

    #[test]
    fn nested_record_requires_object() {
        let record = json!({ "placeRef": { "placeId": "p-1" }, "placeLite": "nope" });
        assert!(nested_record(&record, "placeRef").is_some());
        assert!(nested_record(&record, "placeLite").is_none());
        assert!(nested_record(&record, "missing").is_none());
    }

    #[test]
    fn readers_tolerate_non_object_records() {
        let record = json!("just a string");
        assert_eq!(string_field(&record, "name"), None);
        assert!(string_list_field(&record, "types").is_empty());
        assert_eq!(number_field(&record, "energy"), None);
    }
}
