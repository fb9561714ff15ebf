// ABOUTME: Selector set data model plus a pre-compiled CSS selector cache.
// ABOUTME: Describes where questions, answers, metadata, and popups live in a rendered page.

//! Selector definitions for interview question pages.
//!
//! A [`SelectorSet`] is plain data (deserialized from JSON) naming the CSS
//! selector of every field the extractor reads. Parsing a CSS selector is
//! expensive relative to matching, so compiled selectors are cached by their
//! source string and shared across pages.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::ScrapeError;

/// An optional overlay that may cover the page and should be clicked away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Popup {
    /// Short name used in logs, e.g. "cookie-consent".
    pub name: String,
    /// CSS selector of the element to click.
    pub selector: String,
}

/// CSS selectors for every field of an interview question block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorSet {
    /// Selector for whole question blocks. When absent, blocks are derived
    /// from the question elements themselves.
    #[serde(default)]
    pub block: Option<String>,
    pub question: String,
    pub answer: String,
    pub date: String,
    pub difficulty: String,
    pub role: String,
    pub process: String,
    pub offer: String,
    /// Overlays dismissed, in order, after each page load.
    #[serde(default)]
    pub popups: Vec<Popup>,
}

impl SelectorSet {
    /// All selector strings in the set, popups included.
    pub fn all(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.block.iter().map(String::as_str).collect();
        out.extend([
            self.question.as_str(),
            self.answer.as_str(),
            self.date.as_str(),
            self.difficulty.as_str(),
            self.role.as_str(),
            self.process.as_str(),
            self.offer.as_str(),
        ]);
        out.extend(self.popups.iter().map(|p| p.selector.as_str()));
        out
    }

    /// Compiles every selector, failing on the first one that does not parse.
    ///
    /// Successful compilations stay in the cache, so later lookups are free.
    pub fn validate(&self) -> Result<(), ScrapeError> {
        for css in self.all() {
            compile(css)?;
        }
        Ok(())
    }
}

static SELECTOR_CACHE: Lazy<RwLock<HashMap<String, Option<Selector>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Gets or compiles a CSS selector, caching the result.
///
/// Returns `None` for an invalid selector; invalid selectors are cached too.
pub fn get_or_compile(css: &str) -> Option<Selector> {
    if let Ok(cache) = SELECTOR_CACHE.read() {
        if let Some(cached) = cache.get(css) {
            return cached.clone();
        }
    }

    let compiled = Selector::parse(css).ok();
    if let Ok(mut cache) = SELECTOR_CACHE.write() {
        cache
            .entry(css.to_string())
            .or_insert_with(|| compiled.clone());
    }
    compiled
}

/// Like [`get_or_compile`] but reports an invalid selector as a config error.
pub fn compile(css: &str) -> Result<Selector, ScrapeError> {
    get_or_compile(css).ok_or_else(|| {
        ScrapeError::config(
            "CompileSelector",
            Some(anyhow::anyhow!("invalid CSS selector: {}", css)),
        )
    })
}
