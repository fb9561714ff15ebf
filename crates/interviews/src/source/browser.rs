// ABOUTME: PageSource driving headless Chromium over CDP via chromiumoxide.
// ABOUTME: Launches with fixed flags, polls for selectors until a deadline, and clicks popups away.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::error::ScrapeError;
use crate::extractors::selectors::Popup;
use crate::source::PageSource;

/// Interval between selector probes while waiting.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Settings for launching the browser.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    pub user_agent: String,
    pub window: (u32, u32),
}

/// One headless Chromium process with a single tab.
pub struct BrowserSource {
    browser: Option<Browser>,
    page: Option<Page>,
    handler_task: Option<JoinHandle<()>>,
    current_url: String,
}

impl BrowserSource {
    /// Launch Chromium and open a blank tab.
    pub async fn launch(opts: &BrowserOptions) -> Result<Self, ScrapeError> {
        let (width, height) = opts.window;
        let config = BrowserConfig::builder()
            .no_sandbox()
            .args(vec![
                "--disable-dev-shm-usage".to_string(),
                "--disable-gpu".to_string(),
                format!("--user-agent={}", opts.user_agent),
            ])
            .window_size(width, height)
            .build()
            .map_err(|e| ScrapeError::browser("", "Launch", Some(anyhow::anyhow!(e))))?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScrapeError::browser("", "Launch", Some(anyhow::anyhow!("{}", e))))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!("browser handler event error: {}", e);
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                handler_task.abort();
                return Err(ScrapeError::browser(
                    "about:blank",
                    "NewPage",
                    Some(anyhow::anyhow!("{}", e)),
                ));
            }
        };
        debug!("launched headless browser");

        Ok(Self {
            browser: Some(browser),
            page: Some(page),
            handler_task: Some(handler_task),
            current_url: String::new(),
        })
    }

    fn page(&self, op: &str) -> Result<&Page, ScrapeError> {
        self.page.as_ref().ok_or_else(|| {
            ScrapeError::browser(
                self.current_url.clone(),
                op,
                Some(anyhow::anyhow!("browser session is closed")),
            )
        })
    }
}

/// Re-runs `probe` every `interval` until it finds something or `timeout` passes.
///
/// A probe error ends the wait immediately; only `Ok(None)` means "not yet".
async fn poll_until<T, E, F, Fut>(timeout: Duration, interval: Duration, mut probe: F) -> Result<Option<T>, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(found) = probe().await? {
            return Ok(Some(found));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        tokio::time::sleep(interval).await;
    }
}

/// Waits for the first element matching `css`. CDP failures are returned, not retried.
async fn poll_element(page: &Page, css: &str, timeout: Duration) -> Result<Option<Element>, CdpError> {
    poll_until(timeout, POLL_INTERVAL, move || async move {
        Ok(page.find_elements(css).await?.into_iter().next())
    })
    .await
}

#[async_trait]
impl PageSource for BrowserSource {
    async fn open(&mut self, url: &str) -> Result<(), ScrapeError> {
        self.current_url = url.to_string();
        let page = self.page("Open")?;
        page.goto(url)
            .await
            .map_err(|e| ScrapeError::browser(url, "Open", Some(anyhow::anyhow!("{}", e))))?;
        Ok(())
    }

    async fn dismiss(&mut self, popup: &Popup, timeout: Duration) -> Result<bool, ScrapeError> {
        let page = self.page("Dismiss")?;
        let found = poll_element(page, &popup.selector, timeout).await.map_err(|e| {
            ScrapeError::browser(
                self.current_url.clone(),
                "Dismiss",
                Some(anyhow::anyhow!("looking for {}: {}", popup.name, e)),
            )
        })?;
        let Some(el) = found else {
            return Ok(false);
        };
        el.click().await.map_err(|e| {
            ScrapeError::browser(
                self.current_url.clone(),
                "Dismiss",
                Some(anyhow::anyhow!("clicking {}: {}", popup.name, e)),
            )
        })?;
        Ok(true)
    }

    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<bool, ScrapeError> {
        let page = self.page("WaitFor")?;
        let found = poll_element(page, selector, timeout).await.map_err(|e| {
            ScrapeError::browser(self.current_url.clone(), "WaitFor", Some(anyhow::anyhow!("{}", e)))
        })?;
        Ok(found.is_some())
    }

    async fn html(&mut self) -> Result<String, ScrapeError> {
        let page = self.page("Html")?;
        page.content().await.map_err(|e| {
            ScrapeError::browser(self.current_url.clone(), "Html", Some(anyhow::anyhow!("{}", e)))
        })
    }

    async fn close(&mut self) {
        self.page = None;
        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                debug!("closing browser: {}", e);
            }
            let _ = browser.wait().await;
        }
        if let Some(task) = self.handler_task.take() {
            task.abort();
        }
    }
}
