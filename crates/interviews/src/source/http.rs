// ABOUTME: PageSource backed by plain HTTP GET requests without JavaScript.
// ABOUTME: Popups never appear and waits resolve immediately against the fetched document.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::ScrapeError;
use crate::extractors::record::html_contains;
use crate::extractors::selectors::Popup;
use crate::resource::{fetch, FetchOptions};
use crate::source::PageSource;

/// Fetches pages as served, before any client-side rendering.
///
/// Non-200 responses are kept as pages; an error page simply has no questions.
pub struct HttpSource {
    client: reqwest::Client,
    fetch_opts: FetchOptions,
    current: Option<String>,
}

impl HttpSource {
    pub fn new(client: reqwest::Client, fetch_opts: FetchOptions) -> Self {
        Self {
            client,
            fetch_opts: FetchOptions {
                parse_non_200: true,
                ..fetch_opts
            },
            current: None,
        }
    }

    fn current(&self, op: &str) -> Result<&str, ScrapeError> {
        self.current.as_deref().ok_or_else(|| {
            ScrapeError::fetch("", op, Some(anyhow::anyhow!("no page has been opened")))
        })
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn open(&mut self, url: &str) -> Result<(), ScrapeError> {
        let result = fetch(&self.client, url, &self.fetch_opts).await?;
        debug!(
            url,
            final_url = %result.final_url,
            status = result.status,
            bytes = result.body.len(),
            "fetched page"
        );
        self.current = Some(result.text_utf8());
        Ok(())
    }

    async fn dismiss(&mut self, _popup: &Popup, _timeout: Duration) -> Result<bool, ScrapeError> {
        Ok(false)
    }

    async fn wait_for(&mut self, selector: &str, _timeout: Duration) -> Result<bool, ScrapeError> {
        html_contains(self.current("WaitFor")?, selector)
    }

    async fn html(&mut self) -> Result<String, ScrapeError> {
        self.current("Html").map(str::to_string)
    }

    async fn close(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn source() -> HttpSource {
        HttpSource::new(reqwest::Client::new(), FetchOptions::default())
    }

    #[tokio::test]
    async fn open_then_wait_and_read() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/page");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body(r#"<html><body><p data-test="interview-question">Q</p></body></html>"#);
        });

        let mut src = source();
        src.open(&server.url("/page")).await.unwrap();
        mock.assert();

        let sel = r#"[data-test="interview-question"]"#;
        assert!(src.wait_for(sel, Duration::from_secs(1)).await.unwrap());
        assert!(!src.wait_for("#missing", Duration::from_secs(1)).await.unwrap());
        assert!(src.html().await.unwrap().contains("interview-question"));
    }

    #[tokio::test]
    async fn error_status_is_still_a_page() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/gone");
            then.status(404).body("<html><body>Not found</body></html>");
        });

        let mut src = source();
        src.open(&server.url("/gone")).await.unwrap();
        assert!(!src.wait_for("p", Duration::ZERO).await.unwrap());
    }

    #[tokio::test]
    async fn popups_are_never_clicked() {
        let popup = Popup {
            name: "cookie-consent".to_string(),
            selector: "#onetrust-accept-btn-handler".to_string(),
        };
        assert!(!source().dismiss(&popup, Duration::ZERO).await.unwrap());
    }

    #[tokio::test]
    async fn reading_before_open_fails() {
        let mut src = source();
        assert!(src.html().await.unwrap_err().is_fetch());
        src.close().await;
        src.close().await;
    }
}
