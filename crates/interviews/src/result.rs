// ABOUTME: InterviewRecord and Metadata structs holding one scraped question.
// ABOUTME: Includes markdown/text formatting helpers and a multi-record renderer.

use serde::{Deserialize, Serialize};

use crate::error::ScrapeError;
use crate::options::OutputFormat;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Metadata attached to an interview question.
///
/// Every field is always present; a missing page element is an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Metadata {
    pub date: String,
    pub difficulty: String,
    pub role: String,
    pub process: String,
    pub offer_status: String,
}

/// One scraped interview question with its answer and metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InterviewRecord {
    pub question: String,
    pub answer: String,
    pub metadata: Metadata,
}

impl InterviewRecord {
    /// Returns true if an answer was found for the question.
    pub fn has_answer(&self) -> bool {
        !self.answer.is_empty()
    }

    /// Returns true if the record carries no question text.
    pub fn is_empty(&self) -> bool {
        self.question.is_empty()
    }

    /// Format the record as a markdown section.
    pub fn format_markdown(&self) -> String {
        let mut parts = vec![format!("### {}", self.question)];

        let mut meta = Vec::new();
        let m = &self.metadata;
        for (label, value) in [
            ("Role", &m.role),
            ("Date", &m.date),
            ("Difficulty", &m.difficulty),
            ("Offer", &m.offer_status),
        ] {
            if !value.is_empty() {
                meta.push(format!("{}: {}", label, value));
            }
        }
        if !meta.is_empty() {
            parts.push(format!("*{}*", meta.join(" | ")));
        }

        if !m.process.is_empty() {
            parts.push(format!("> {}", m.process));
        }

        if self.has_answer() {
            parts.push(format!("**Answer:** {}", self.answer));
        }

        parts.join("\n\n")
    }

    /// Format the record as plain text lines.
    pub fn format_text(&self) -> String {
        let m = &self.metadata;
        format!(
            "Question: {}\nAnswer: {}\nDate: {}\nDifficulty: {}\nRole: {}\nProcess: {}\nOffer status: {}",
            self.question, self.answer, m.date, m.difficulty, m.role, m.process, m.offer_status
        )
    }
}

/// Render a list of records in the requested output format.
pub fn format_records(records: &[InterviewRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(records).map_err(|e| {
            ScrapeError::extract("", "FormatRecords", Some(anyhow::anyhow!(e)))
        }),
        OutputFormat::Markdown => Ok(records
            .iter()
            .map(InterviewRecord::format_markdown)
            .collect::<Vec<_>>()
            .join("\n\n---\n\n")),
        OutputFormat::Text => Ok(records
            .iter()
            .map(InterviewRecord::format_text)
            .collect::<Vec<_>>()
            .join("\n\n")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> InterviewRecord {
        InterviewRecord {
            question: "Reverse a linked list.".to_string(),
            answer: "Iterate and flip pointers.".to_string(),
            metadata: Metadata {
                date: "Mar 3, 2024".to_string(),
                difficulty: "Average".to_string(),
                role: "Software Engineer".to_string(),
                process: "Two phone screens then onsite.".to_string(),
                offer_status: "Accepted Offer".to_string(),
            },
        }
    }

    #[test]
    fn json_always_has_every_metadata_key() {
        let record = InterviewRecord {
            question: "Why us?".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        let meta = value["metadata"].as_object().unwrap();
        for key in ["date", "difficulty", "role", "process", "offer_status"] {
            assert_eq!(meta.get(key), Some(&serde_json::Value::String(String::new())));
        }
        assert_eq!(value["answer"], "");
    }

    #[test]
    fn json_roundtrip_preserves_record() {
        let record = sample();
        let json = serde_json::to_string(&record).unwrap();
        let back: InterviewRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn markdown_skips_empty_metadata() {
        let record = InterviewRecord {
            question: "Why us?".to_string(),
            metadata: Metadata {
                role: "Analyst".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(record.format_markdown(), "### Why us?\n\n*Role: Analyst*");
    }

    #[test]
    fn markdown_full_record() {
        let md = sample().format_markdown();
        assert!(md.starts_with("### Reverse a linked list."));
        assert!(md.contains("*Role: Software Engineer | Date: Mar 3, 2024 | Difficulty: Average | Offer: Accepted Offer*"));
        assert!(md.contains("> Two phone screens then onsite."));
        assert!(md.ends_with("**Answer:** Iterate and flip pointers."));
    }

    #[test]
    fn text_lists_all_fields() {
        let text = sample().format_text();
        assert!(text.starts_with("Question: Reverse a linked list.\nAnswer: Iterate"));
        assert!(text.ends_with("Offer status: Accepted Offer"));
    }

    #[test]
    fn format_records_json_is_array() {
        let out = format_records(&[sample(), sample()], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn format_records_empty() {
        assert_eq!(format_records(&[], OutputFormat::Json).unwrap(), "[]");
        assert_eq!(format_records(&[], OutputFormat::Markdown).unwrap(), "");
    }

    #[test]
    fn helpers() {
        assert!(sample().has_answer());
        assert!(!sample().is_empty());
        assert!(InterviewRecord::default().is_empty());
    }
}
