// ABOUTME: Turns question blocks of a rendered page into InterviewRecords.
// ABOUTME: Optional fields default to empty; a block without a question is dropped and logged.

//! Record assembly.
//!
//! Key behaviors:
//! - Blocks come from the `block` selector when the set has one. Otherwise each
//!   question element is widened to its largest ancestor that holds no other
//!   question element, stopping below `<body>`. On a page with a single
//!   question that ancestor is the top-level wrapper, so field elements
//!   anywhere else on the page land in that record. Set `block` when pages
//!   carry stray field elements outside the question cards.
//! - Answer and metadata use [`field_or`] with an empty default.
//! - A missing question, or any other failure while building one record, drops
//!   that record only.

use scraper::{ElementRef, Html};
use tracing::error;

use crate::error::ScrapeError;
use crate::extractors::clean::clean_text;
use crate::extractors::fields::{element_text, field_or, find_within};
use crate::extractors::selectors::{compile, SelectorSet};
use crate::result::{InterviewRecord, Metadata};

/// Builds a record from one block, or `None` when the block is unusable.
pub fn extract_record(block: ElementRef<'_>, selectors: &SelectorSet) -> Option<InterviewRecord> {
    match build_record(block, selectors) {
        Ok(record) => Some(record),
        Err(e) => {
            error!("error extracting question data: {}", e);
            None
        }
    }
}

fn build_record(block: ElementRef<'_>, selectors: &SelectorSet) -> Result<InterviewRecord, ScrapeError> {
    let question_el = find_within(block, &selectors.question)?.ok_or_else(|| {
        ScrapeError::extract(
            "",
            "ExtractRecord",
            Some(anyhow::anyhow!(
                "no element matches question selector {}",
                selectors.question
            )),
        )
    })?;
    let question = clean_text(&element_text(question_el));

    let answer = field_or(block, &selectors.answer, "")?;
    let metadata = Metadata {
        date: field_or(block, &selectors.date, "")?,
        difficulty: field_or(block, &selectors.difficulty, "")?,
        role: field_or(block, &selectors.role, "")?,
        process: field_or(block, &selectors.process, "")?,
        offer_status: field_or(block, &selectors.offer, "")?,
    };

    Ok(InterviewRecord {
        question,
        answer,
        metadata,
    })
}

/// Locates the question blocks of a document in document order.
pub fn question_blocks<'a>(
    doc: &'a Html,
    selectors: &SelectorSet,
) -> Result<Vec<ElementRef<'a>>, ScrapeError> {
    if let Some(block_css) = &selectors.block {
        let block_sel = compile(block_css)?;
        return Ok(doc.select(&block_sel).collect());
    }

    let question_sel = compile(&selectors.question)?;
    let blocks = doc
        .select(&question_sel)
        .map(|question| {
            let mut block = question;
            while let Some(parent) = block.parent().and_then(ElementRef::wrap) {
                let tag = parent.value().name();
                if tag == "body" || tag == "html" {
                    break;
                }
                if parent.select(&question_sel).nth(1).is_some() {
                    break;
                }
                block = parent;
            }
            block
        })
        .collect();
    Ok(blocks)
}

/// Extracts every record from a parsed document, dropping unusable blocks.
pub fn extract_records(doc: &Html, selectors: &SelectorSet) -> Result<Vec<InterviewRecord>, ScrapeError> {
    Ok(question_blocks(doc, selectors)?
        .into_iter()
        .filter_map(|block| extract_record(block, selectors))
        .collect())
}

/// Parses raw HTML and extracts every record.
pub fn extract_records_from_html(
    html: &str,
    selectors: &SelectorSet,
) -> Result<Vec<InterviewRecord>, ScrapeError> {
    let doc = Html::parse_document(html);
    extract_records(&doc, selectors)
}

/// Returns true if any element in the HTML matches `css`.
pub fn html_contains(html: &str, css: &str) -> Result<bool, ScrapeError> {
    let selector = compile(css)?;
    let doc = Html::parse_document(html);
    let found = doc.select(&selector).next().is_some();
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::loader::load_builtin_selectors;
    use pretty_assertions::assert_eq;

    const LIST_HTML: &str = r#"
        <html><body>
        <ul class="questions">
            <li class="card">
                <p data-test="interview-question">Design a URL shortener.</p>
                <div data-test="interview-answer">Hash plus a key-value store.</div>
                <span data-test="interview-date">Feb 1, 2024</span>
                <span data-test="interview-difficulty">Difficult</span>
                <span data-test="interview-role">Senior Software Engineer</span>
                <span data-test="interview-process">Recruiter call, then 4 rounds.</span>
                <span data-test="interview-offer">No Offer</span>
            </li>
            <li class="card">
                <p data-test="interview-question">Why do you want to work here?</p>
                <span data-test="interview-role">Product Manager</span>
            </li>
        </ul>
        </body></html>
    "#;

    #[test]
    fn blocks_are_widened_to_their_cards() {
        let doc = Html::parse_document(LIST_HTML);
        let selectors = load_builtin_selectors();
        let blocks = question_blocks(&doc, &selectors).unwrap();
        assert_eq!(blocks.len(), 2);
        for block in blocks {
            assert_eq!(block.value().name(), "li");
        }
    }

    #[test]
    fn records_keep_document_order_and_default_missing_fields() {
        let records = extract_records_from_html(LIST_HTML, &load_builtin_selectors()).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].question, "Design a URL shortener.");
        assert_eq!(records[0].answer, "Hash plus a key-value store.");
        assert_eq!(records[0].metadata.difficulty, "Difficult");
        assert_eq!(records[0].metadata.offer_status, "No Offer");

        assert_eq!(records[1].question, "Why do you want to work here?");
        assert_eq!(records[1].answer, "");
        assert_eq!(
            records[1].metadata,
            Metadata {
                role: "Product Manager".to_string(),
                ..Default::default()
            }
        );
    }

    const LONE_QUESTION_HTML: &str = r#"
        <html><body>
        <div id="app">
            <aside><span data-test="interview-role">Featured: Data Scientist</span></aside>
            <ul><li class="card"><p data-test="interview-question">Why this team?</p></li></ul>
        </div>
        </body></html>
    "#;

    #[test]
    fn lone_question_widens_to_top_level_wrapper() {
        let doc = Html::parse_document(LONE_QUESTION_HTML);
        let blocks = question_blocks(&doc, &load_builtin_selectors()).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].value().id(), Some("app"));

        let records = extract_records(&doc, &load_builtin_selectors()).unwrap();
        assert_eq!(records[0].metadata.role, "Featured Data Scientist");
    }

    #[test]
    fn block_selector_keeps_stray_fields_out() {
        let mut selectors = load_builtin_selectors();
        selectors.block = Some("li.card".to_string());
        let records = extract_records_from_html(LONE_QUESTION_HTML, &selectors).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "Why this team?");
        assert_eq!(records[0].metadata.role, "");
    }

    #[test]
    fn block_without_question_is_dropped() {
        let html = r#"
            <div class="card"><p data-test="interview-question">Kept?</p></div>
            <div class="card"><div data-test="interview-answer">Orphan answer</div></div>
        "#;
        let mut selectors = load_builtin_selectors();
        selectors.block = Some("div.card".to_string());

        let records = extract_records_from_html(html, &selectors).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "Kept?");
    }

    #[test]
    fn extract_record_returns_none_without_question() {
        let doc = Html::parse_fragment(r#"<div class="card"><span>nothing here</span></div>"#);
        let sel = scraper::Selector::parse("div.card").unwrap();
        let block = doc.select(&sel).next().unwrap();
        assert!(extract_record(block, &load_builtin_selectors()).is_none());
    }

    #[test]
    fn broken_optional_selector_drops_record() {
        let mut selectors = load_builtin_selectors();
        selectors.process = "[[[".to_string();
        let records = extract_records_from_html(LIST_HTML, &selectors).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn bare_question_element_is_its_own_block() {
        let html = r#"<body><p data-test="interview-question">Alone</p><p data-test="interview-question">Also alone</p></body>"#;
        let records = extract_records_from_html(html, &load_builtin_selectors()).unwrap();
        let questions: Vec<&str> = records.iter().map(|r| r.question.as_str()).collect();
        assert_eq!(questions, vec!["Alone", "Also alone"]);
    }

    #[test]
    fn html_contains_checks_presence() {
        assert!(html_contains(LIST_HTML, r#"[data-test="interview-question"]"#).unwrap());
        assert!(!html_contains("<html><body></body></html>", "#onetrust-accept-btn-handler").unwrap());
        assert!(html_contains("<p></p>", "[[[").is_err());
    }
}
