// ABOUTME: Text cleaner applied to every extracted field before it lands in a record.
// ABOUTME: Collapses whitespace runs, strips disallowed punctuation, and trims the result.

use once_cell::sync::Lazy;
use regex::Regex;

// Unicode White_Space plus the ASCII information separators U+001C..U+001F.
static WHITESPACE_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\x1C-\x1F]+").unwrap());

// Letters, numbers, underscore, whitespace, and `. , ! ? -` survive. Combining
// marks and other connector punctuation do not.
static DISALLOWED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}_\s\x1C-\x1F.,!?-]").unwrap());

/// Normalizes raw element text.
///
/// Whitespace runs become a single space first, then every character outside
/// the allowed set is removed, then the ends are trimmed. Removal happens after
/// collapsing, so `"a # b"` becomes `"a  b"`.
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let collapsed = WHITESPACE_RUN_RE.replace_all(text, " ");
    let stripped = DISALLOWED_RE.replace_all(&collapsed, "");
    stripped.trim().to_string()
}

/// Like [`clean_text`], treating absent input as empty.
pub fn clean_opt(text: Option<&str>) -> String {
    text.map(clean_text).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_and_strips_symbols() {
        assert_eq!(clean_text("  a\n\nb!! #$"), "a b!!");
    }

    #[test]
    fn empty_and_absent_input() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_opt(None), "");
        assert_eq!(clean_opt(Some("  ")), "");
    }

    #[test]
    fn keeps_allowed_punctuation() {
        assert_eq!(
            clean_text("Why Google? Well, it's big - really big!"),
            "Why Google? Well, its big - really big!"
        );
        assert_eq!(clean_text("snake_case_name."), "snake_case_name.");
    }

    #[test]
    fn removal_after_collapse_can_leave_double_space() {
        assert_eq!(clean_text("a # b"), "a  b");
    }

    #[test]
    fn unicode_letters_are_word_characters() {
        assert_eq!(clean_text("Café\tMünchen (DE)"), "Café München DE");
    }

    #[test]
    fn combining_marks_and_connectors_are_stripped() {
        assert_eq!(clean_text("Cafe\u{301}"), "Cafe");
        assert_eq!(clean_text("a\u{203f}b"), "ab");
        assert_eq!(clean_text("snake_case"), "snake_case");
        assert_eq!(clean_text("\u{2167} \u{00bd}"), "\u{2167} \u{00bd}");
    }

    #[test]
    fn information_separators_count_as_whitespace() {
        assert_eq!(clean_text("a\u{1c}b"), "a b");
        assert_eq!(clean_text("a\u{1f}\u{1e} b"), "a b");
    }

    #[test]
    fn is_deterministic() {
        let raw = "\t Tell me about   a time you failed.\n";
        assert_eq!(clean_text(raw), clean_text(raw));
        assert_eq!(clean_text(raw), "Tell me about a time you failed.");
    }
}
