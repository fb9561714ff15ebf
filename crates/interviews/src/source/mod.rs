// ABOUTME: PageSource trait abstracting where rendered interview pages come from.
// ABOUTME: Implemented by a headless browser, a plain HTTP fetcher, and a fixed-page fixture source.

//! Page sources.
//!
//! The client only needs to navigate, dismiss overlays, wait for content, and
//! read the rendered HTML. Everything browser-specific lives behind
//! [`PageSource`], so extraction can run against saved pages or stubs.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ScrapeError;
use crate::extractors::selectors::Popup;

#[cfg(feature = "browser")]
pub mod browser;
pub mod fixture;
pub mod http;

#[cfg(feature = "browser")]
pub use browser::BrowserSource;
pub use fixture::FixtureSource;
pub use http::HttpSource;

/// A session that can load and expose rendered pages.
#[async_trait]
pub trait PageSource: Send {
    /// Navigate to `url`, replacing the current page.
    async fn open(&mut self, url: &str) -> Result<(), ScrapeError>;

    /// Click `popup` away if it shows up within `timeout`.
    ///
    /// Returns whether it was clicked. A popup that never appears is not an error.
    async fn dismiss(&mut self, popup: &Popup, timeout: Duration) -> Result<bool, ScrapeError>;

    /// Wait until `selector` matches something or `timeout` elapses.
    ///
    /// Returns `Ok(false)` on timeout.
    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<bool, ScrapeError>;

    /// Current rendered document as HTML.
    async fn html(&mut self) -> Result<String, ScrapeError>;

    /// Release the session. Safe to call more than once.
    async fn close(&mut self);
}
