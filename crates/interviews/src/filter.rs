// ABOUTME: Permissive role filter applied to scraped records.
// ABOUTME: Keeps a record unless both roles are known and the target is not a case-insensitive substring.

use crate::result::InterviewRecord;

/// Decides whether a record with `record_role` survives a search for `target`.
///
/// Either side empty (or no target) means no filtering.
pub fn role_matches(target: Option<&str>, record_role: &str) -> bool {
    let target = match target.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return true,
    };
    if record_role.is_empty() {
        return true;
    }
    record_role.to_lowercase().contains(&target.to_lowercase())
}

/// Applies [`role_matches`] to a record's metadata.
pub fn keep_for_role(record: &InterviewRecord, target: Option<&str>) -> bool {
    role_matches(target, &record.metadata.role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Metadata;

    #[test]
    fn substring_match_is_case_insensitive() {
        assert!(role_matches(Some("Engineer"), "Senior Software Engineer"));
        assert!(role_matches(Some("software engineer"), "Senior Software Engineer"));
        assert!(!role_matches(Some("Engineer"), "Product Manager"));
    }

    #[test]
    fn empty_record_role_is_kept() {
        assert!(role_matches(Some("Engineer"), ""));
    }

    #[test]
    fn no_target_keeps_everything() {
        assert!(role_matches(None, "Product Manager"));
        assert!(role_matches(Some(""), "Product Manager"));
        assert!(role_matches(Some("   "), "Product Manager"));
    }

    #[test]
    fn surrounding_whitespace_in_target_is_ignored() {
        assert!(role_matches(Some("Engineer "), "Senior Software Engineer"));
        assert!(role_matches(Some("  engineer"), "Software Engineer II"));
    }

    #[test]
    fn longer_target_than_role_does_not_match() {
        assert!(!role_matches(Some("Senior Software Engineer"), "Engineer"));
    }

    #[test]
    fn keep_for_role_reads_metadata() {
        let record = InterviewRecord {
            question: "q".to_string(),
            metadata: Metadata {
                role: "Data Scientist".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(keep_for_role(&record, Some("scientist")));
        assert!(!keep_for_role(&record, Some("Engineer")));
    }
}
