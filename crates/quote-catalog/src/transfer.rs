//! JSON export and import

use serde_json::Value;

use crate::error::CatalogError;
use crate::quote::Quote;
use crate::Result;

pub const EXPORT_FILE_NAME: &str = "quotes_export.json";

/// Pretty-printed JSON array of the whole collection.
pub fn export_json(quotes: &[Quote]) -> Result<String> {
    Ok(serde_json::to_string_pretty(quotes)?)
}

/// Parse an import payload. The whole payload is rejected if it is not an
/// array or if any entry lacks a non-empty `text` or `category` string.
pub fn parse_import(json: &str) -> Result<Vec<Quote>> {
    let value: Value = serde_json::from_str(json)?;
    let entries = match value {
        Value::Array(entries) => entries,
        _ => return Err(CatalogError::NotAnArray),
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| parse_entry(index, entry))
        .collect()
}

fn parse_entry(index: usize, entry: Value) -> Result<Quote> {
    let invalid = |reason: &str| CatalogError::InvalidEntry {
        index,
        reason: reason.to_string(),
    };

    let object = entry.as_object().ok_or_else(|| invalid("not an object"))?;

    let text = match object.get("text") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::String(_)) => return Err(invalid("empty text")),
        _ => return Err(invalid("missing text")),
    };
    let category = match object.get("category") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::String(_)) => return Err(invalid("empty category")),
        _ => return Err(invalid("missing category")),
    };
    let id = object.get("id").and_then(Value::as_u64);

    Ok(Quote { text, category, id })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_is_pretty_array() {
        let quotes = vec![Quote::new("A", "X").unwrap()];
        let json = export_json(&quotes).unwrap();
        assert!(json.starts_with("[\n"));
        assert!(json.contains("\"text\": \"A\""));
    }

    #[test]
    fn test_import_valid_payload() {
        let quotes =
            parse_import(r#"[{"text":"C","category":"Z"},{"text":"D","category":"W","id":4}]"#)
                .unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0], Quote::new("C", "Z").unwrap());
        assert_eq!(quotes[1].id, Some(4));
    }

    #[test]
    fn test_import_empty_array() {
        assert!(parse_import("[]").unwrap().is_empty());
    }

    #[test]
    fn test_import_rejects_non_array() {
        let err = parse_import(r#"{"text":"C","category":"Z"}"#).unwrap_err();
        assert!(matches!(err, CatalogError::NotAnArray));
    }

    #[test]
    fn test_import_rejects_invalid_json() {
        assert!(matches!(
            parse_import("not json").unwrap_err(),
            CatalogError::Json(_)
        ));
    }

    #[test]
    fn test_import_rejects_whole_payload_on_bad_entry() {
        let err = parse_import(
            r#"[{"text":"ok","category":"X"},{"text":"","category":"Y"}]"#,
        )
        .unwrap_err();
        match err {
            CatalogError::InvalidEntry { index, .. } => assert_eq!(index, 1),
            other => panic!("unexpected error: {other}"),
        }

        assert!(parse_import(r#"[{"text":"ok"}]"#).is_err());
        assert!(parse_import(r#"[{"text":1,"category":"X"}]"#).is_err());
        assert!(parse_import(r#"["just a string"]"#).is_err());
    }

    #[test]
    fn test_export_then_import_preserves_content() {
        let quotes = vec![
            Quote::new("A", "X").unwrap(),
            Quote::with_id(2, "B", "Y"),
        ];
        let parsed = parse_import(&export_json(&quotes).unwrap()).unwrap();
        assert_eq!(parsed, quotes);
    }
}
