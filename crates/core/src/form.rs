//! Parsing of loosely-typed form values.
//!
//! Element create/update requests arrive as multipart forms where every
//! scalar is a string, sometimes wrapped in an extra pair of double quotes
//! by the diagram editor.

use crate::error::CoreError;
use crate::types::DbId;

/// Strip surrounding whitespace and one layer of surrounding double quotes.
pub fn unquote(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
}

/// Parse a boolean form value. Empty means `false`.
pub fn parse_flag(field: &str, raw: &str) -> Result<bool, CoreError> {
    match unquote(raw).to_ascii_lowercase().as_str() {
        "" | "false" | "0" | "off" | "no" => Ok(false),
        "true" | "1" | "on" | "yes" => Ok(true),
        other => Err(CoreError::Validation(format!(
            "Field '{field}' must be a boolean, got '{other}'"
        ))),
    }
}

/// Parse an optional id. Empty, `""` and `null` mean "not set".
pub fn parse_optional_id(field: &str, raw: &str) -> Result<Option<DbId>, CoreError> {
    let value = unquote(raw);
    if value.is_empty() || value.eq_ignore_ascii_case("null") {
        return Ok(None);
    }
    value
        .parse::<DbId>()
        .map(Some)
        .map_err(|_| CoreError::Validation(format!("Field '{field}' is not a valid id: '{value}'")))
}

/// Parse a required id.
pub fn parse_required_id(field: &str, raw: Option<&str>) -> Result<DbId, CoreError> {
    parse_optional_id(field, raw.unwrap_or(""))?
        .ok_or_else(|| CoreError::Validation(format!("Field '{field}' is required")))
}

/// Optional free text. Empty strings are stored as `None`.
pub fn optional_text(raw: Option<&str>) -> Option<String> {
    raw.map(unquote)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::new_id;
    use assert_matches::assert_matches;

    #[test]
    fn unquote_strips_one_layer() {
        assert_eq!(unquote("\"Core\""), "Core");
        assert_eq!(unquote("  Core "), "Core");
        assert_eq!(unquote("\"\"x\"\""), "\"x\"");
        assert_eq!(unquote("\""), "\"");
    }

    #[test]
    fn flags_accept_editor_spellings() {
        assert!(!parse_flag("availability", "False").unwrap());
        assert!(parse_flag("integrity", "True").unwrap());
        assert!(parse_flag("integrity", "\"true\"").unwrap());
        assert!(!parse_flag("integrity", "").unwrap());
        assert!(parse_flag("integrity", "1").unwrap());
    }

    #[test]
    fn garbage_flag_rejected() {
        assert_matches!(parse_flag("integrity", "maybe"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn optional_id_handles_blank_values() {
        assert_eq!(parse_optional_id("port_to_port", "").unwrap(), None);
        assert_eq!(parse_optional_id("port_to_port", "\"\"").unwrap(), None);
        assert_eq!(parse_optional_id("port_to_port", "null").unwrap(), None);

        let id = new_id();
        assert_eq!(
            parse_optional_id("port_to_port", &format!("\"{id}\"")).unwrap(),
            Some(id)
        );
    }

    #[test]
    fn malformed_id_rejected() {
        assert_matches!(
            parse_optional_id("component", "not-a-uuid"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn required_id_must_be_present() {
        assert_matches!(parse_required_id("port_from", None), Err(CoreError::Validation(_)));
        assert_matches!(
            parse_required_id("port_from", Some("")),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn optional_text_drops_empty_values() {
        assert_eq!(optional_text(Some("\"\"")), None);
        assert_eq!(optional_text(None), None);
        assert_eq!(optional_text(Some("hello")), Some("hello".to_string()));
    }
}
