// ABOUTME: Loader for selector sets from embedded JSON data or user-supplied files.
// ABOUTME: Provides load_builtin_selectors() for the default Glassdoor markup.

//! Selector set loader.
//!
//! The builtin set is embedded at compile time. A user file replaces it
//! wholesale when the site markup drifts; it is validated before use.

use std::fs;
use std::path::Path;

use crate::error::ScrapeError;
use crate::extractors::selectors::SelectorSet;

/// Embedded JSON describing the Glassdoor interview page markup.
const BUILTIN_SELECTORS_JSON: &str = include_str!("../../data/selectors.json");

/// Loads the builtin selector set from embedded JSON.
///
/// # Panics
///
/// Panics if the embedded JSON is malformed or cannot be deserialized.
pub fn load_builtin_selectors() -> SelectorSet {
    serde_json::from_str(BUILTIN_SELECTORS_JSON).expect("failed to parse builtin selectors")
}

/// Parses and validates a selector set from a JSON string.
pub fn parse_selectors(json: &str) -> Result<SelectorSet, ScrapeError> {
    let set: SelectorSet = serde_json::from_str(json).map_err(|e| {
        ScrapeError::config(
            "ParseSelectors",
            Some(anyhow::anyhow!("invalid selector JSON: {}", e)),
        )
    })?;
    set.validate()?;
    Ok(set)
}

/// Reads, parses, and validates a selector set from a JSON file.
pub fn load_selectors_file(path: &Path) -> Result<SelectorSet, ScrapeError> {
    let json = fs::read_to_string(path).map_err(|e| {
        ScrapeError::config(
            "LoadSelectors",
            Some(anyhow::anyhow!("reading {}: {}", path.display(), e)),
        )
    })?;
    parse_selectors(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_selectors_use_data_test_attributes() {
        let set = load_builtin_selectors();
        assert_eq!(set.question, r#"[data-test="interview-question"]"#);
        assert_eq!(set.offer, r#"[data-test="interview-offer"]"#);
        assert!(set.block.is_none());
    }

    #[test]
    fn builtin_popups_are_cookie_then_sign_in() {
        let set = load_builtin_selectors();
        let names: Vec<&str> = set.popups.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["cookie-consent", "sign-in"]);
        assert_eq!(set.popups[0].selector, "#onetrust-accept-btn-handler");
    }

    #[test]
    fn parse_selectors_accepts_block_and_defaults_popups() {
        let json = r#"{
            "block": "li.card",
            "question": ".q",
            "answer": ".a",
            "date": ".d",
            "difficulty": ".diff",
            "role": ".r",
            "process": ".p",
            "offer": ".o"
        }"#;
        let set = parse_selectors(json).unwrap();
        assert_eq!(set.block.as_deref(), Some("li.card"));
        assert!(set.popups.is_empty());
    }

    #[test]
    fn parse_selectors_rejects_missing_field() {
        let err = parse_selectors(r#"{ "question": ".q" }"#).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn parse_selectors_rejects_bad_css() {
        let json = r#"{
            "question": ".q", "answer": "[[[", "date": ".d", "difficulty": ".diff",
            "role": ".r", "process": ".p", "offer": ".o"
        }"#;
        assert!(parse_selectors(json).unwrap_err().is_config());
    }

    #[test]
    fn load_selectors_file_missing_path() {
        let err = load_selectors_file(Path::new("/nonexistent/selectors.json")).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("LoadSelectors"));
    }
}
