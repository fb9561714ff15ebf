// ABOUTME: Field lookup helpers scoped to a single question block element.
// ABOUTME: One parametrized lookup-with-default replaces per-field locate/clean/fallback code.

//! Field extraction within a question block.
//!
//! Key behaviors:
//! - Lookups cover the block element itself and its descendants; the first
//!   match in document order wins.
//! - Text is the concatenation of all descendant text nodes, then cleaned.
//! - A missing element is not an error. An unparsable selector is.

use scraper::ElementRef;

use crate::error::ScrapeError;
use crate::extractors::clean::clean_text;
use crate::extractors::selectors::compile;

/// Finds the first element matching `css` at or below `container`.
pub fn find_within<'a>(
    container: ElementRef<'a>,
    css: &str,
) -> Result<Option<ElementRef<'a>>, ScrapeError> {
    let selector = compile(css)?;
    if selector.matches(&container) {
        return Ok(Some(container));
    }
    Ok(container.select(&selector).next())
}

/// Raw text content of an element, all descendant text nodes concatenated.
pub fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Cleaned text of the first element matching `css`, or `default` when absent.
pub fn field_or(container: ElementRef<'_>, css: &str, default: &str) -> Result<String, ScrapeError> {
    Ok(match find_within(container, css)? {
        Some(el) => clean_text(&element_text(el)),
        None => default.to_string(),
    })
}
