// ABOUTME: PageSource serving a fixed list of HTML documents, one per navigation.
// ABOUTME: Used for offline extraction of saved pages and for driving the scraper in tests.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ScrapeError;
use crate::extractors::record::html_contains;
use crate::extractors::selectors::Popup;
use crate::source::PageSource;

const BLANK_PAGE: &str = "<html><head></head><body></body></html>";

/// Serves `pages[n]` on the n-th call to `open`, then blank pages.
///
/// Popups present in the current page count as dismissed.
#[derive(Debug, Default)]
pub struct FixtureSource {
    pages: Vec<String>,
    cursor: Option<usize>,
    visited: Vec<String>,
    dismissed: Vec<String>,
    closed: bool,
}

impl FixtureSource {
    pub fn new<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// URLs passed to `open`, in order.
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    /// Names of popups dismissed so far.
    pub fn dismissed(&self) -> &[String] {
        &self.dismissed
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn current(&self) -> &str {
        self.cursor
            .and_then(|i| self.pages.get(i))
            .map(String::as_str)
            .unwrap_or(BLANK_PAGE)
    }
}

#[async_trait]
impl PageSource for FixtureSource {
    async fn open(&mut self, url: &str) -> Result<(), ScrapeError> {
        if self.closed {
            return Err(ScrapeError::browser(
                url,
                "Open",
                Some(anyhow::anyhow!("source is closed")),
            ));
        }
        self.cursor = Some(self.cursor.map_or(0, |i| i + 1));
        self.visited.push(url.to_string());
        Ok(())
    }

    async fn dismiss(&mut self, popup: &Popup, _timeout: Duration) -> Result<bool, ScrapeError> {
        let present = html_contains(self.current(), &popup.selector)?;
        if present {
            self.dismissed.push(popup.name.clone());
        }
        Ok(present)
    }

    async fn wait_for(&mut self, selector: &str, _timeout: Duration) -> Result<bool, ScrapeError> {
        html_contains(self.current(), selector)
    }

    async fn html(&mut self) -> Result<String, ScrapeError> {
        Ok(self.current().to_string())
    }

    async fn close(&mut self) {
        self.closed = true;
    }
}
