// ABOUTME: The main Client struct that paginates interview-question pages and extracts records.
// ABOUTME: Provides never-failing questions() entry points plus fallible try_ variants and offline extraction.

use tracing::{debug, error, info, warn};

use crate::error::ScrapeError;
use crate::extractors::loader::load_builtin_selectors;
use crate::extractors::record::extract_records_from_html;
use crate::extractors::selectors::SelectorSet;
use crate::filter::keep_for_role;
use crate::options::{ClientBuilder, Options, SourceKind};
use crate::resource::FetchOptions;
use crate::result::InterviewRecord;
use crate::search::{build_url, page_url};
#[cfg(feature = "browser")]
use crate::source::browser::{BrowserOptions, BrowserSource};
use crate::source::{HttpSource, PageSource};

/// Browser window size used for rendering.
#[cfg(feature = "browser")]
const WINDOW_SIZE: (u32, u32) = (1920, 1080);

/// The interview-question scraper client.
pub struct Client {
    opts: Options,
    http_client: reqwest::Client,
    selectors: SelectorSet,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Self {
        let http_client = opts.http_client.clone().unwrap_or_else(|| {
            reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.request_timeout)
                .cookie_store(true)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .unwrap_or_else(|e| {
                    warn!("falling back to default HTTP client: {}", e);
                    reqwest::Client::new()
                })
        });

        let selectors = opts.selectors.clone().unwrap_or_else(load_builtin_selectors);

        Self {
            opts,
            http_client,
            selectors,
        }
    }

    /// The options this client was built with.
    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// The selector set used for extraction.
    pub fn selectors(&self) -> &SelectorSet {
        &self.selectors
    }

    /// Opens the configured default page source.
    pub async fn open_source(&self) -> Result<Box<dyn PageSource>, ScrapeError> {
        match self.opts.source {
            SourceKind::Http => Ok(Box::new(HttpSource::new(
                self.http_client.clone(),
                FetchOptions {
                    headers: self.opts.headers.clone(),
                    parse_non_200: true,
                },
            ))),
            #[cfg(feature = "browser")]
            SourceKind::Browser => {
                let source = BrowserSource::launch(&BrowserOptions {
                    user_agent: self.opts.user_agent.clone(),
                    window: WINDOW_SIZE,
                })
                .await?;
                Ok(Box::new(source))
            }
            #[cfg(not(feature = "browser"))]
            SourceKind::Browser => Err(ScrapeError::config(
                "OpenSource",
                Some(anyhow::anyhow!("built without the `browser` feature")),
            )),
        }
    }

    /// Scrape interview questions for a company, optionally narrowed to a role.
    ///
    /// Opens the default source and always releases it. Any failure other than
    /// a page without questions yields an empty list.
    pub async fn questions(&self, company: &str, role: Option<&str>) -> Vec<InterviewRecord> {
        match self.try_questions(company, role).await {
            Ok(records) => records,
            Err(e) => {
                error!("error scraping interview questions: {}", e);
                Vec::new()
            }
        }
    }

    /// Fallible variant of [`Client::questions`].
    pub async fn try_questions(
        &self,
        company: &str,
        role: Option<&str>,
    ) -> Result<Vec<InterviewRecord>, ScrapeError> {
        let mut source = self.open_source().await?;
        self.try_questions_with(source.as_mut(), company, role).await
    }

    /// Like [`Client::questions`] over a caller-supplied source, which is closed before returning.
    pub async fn questions_with<S>(
        &self,
        source: &mut S,
        company: &str,
        role: Option<&str>,
    ) -> Vec<InterviewRecord>
    where
        S: PageSource + ?Sized,
    {
        match self.try_questions_with(source, company, role).await {
            Ok(records) => records,
            Err(e) => {
                error!("error scraping interview questions: {}", e);
                Vec::new()
            }
        }
    }

    /// Fallible variant of [`Client::questions_with`]. The source is closed on every path.
    pub async fn try_questions_with<S>(
        &self,
        source: &mut S,
        company: &str,
        role: Option<&str>,
    ) -> Result<Vec<InterviewRecord>, ScrapeError>
    where
        S: PageSource + ?Sized,
    {
        let result = self.scrape_pages(source, company, role).await;
        source.close().await;
        result
    }

    async fn scrape_pages<S>(
        &self,
        source: &mut S,
        company: &str,
        role: Option<&str>,
    ) -> Result<Vec<InterviewRecord>, ScrapeError>
    where
        S: PageSource + ?Sized,
    {
        let role = role.map(str::trim).filter(|r| !r.is_empty());
        let first_page = build_url(&self.opts.base_url, company, role)?;
        info!(company, role = role.unwrap_or(""), "scraping interview questions");

        let max_pages = self.opts.max_pages;
        let mut records = Vec::new();
        for page in 1..=max_pages {
            let url = page_url(&first_page, page);
            source.open(&url).await?;

            for popup in &self.selectors.popups {
                match source.dismiss(popup, self.opts.popup_timeout).await {
                    Ok(true) => debug!(popup = %popup.name, "dismissed popup"),
                    Ok(false) => {}
                    Err(e) => warn!(popup = %popup.name, "popup dismissal failed: {}", e),
                }
            }

            if !source
                .wait_for(&self.selectors.question, self.opts.wait_timeout)
                .await?
            {
                warn!(page, "no questions found on page");
                break;
            }

            let html = source.html().await?;
            let page_records = extract_records_from_html(&html, &self.selectors)?;
            let found = page_records.len();
            records.extend(page_records.into_iter().filter(|r| keep_for_role(r, role)));
            debug!(page, found, total = records.len(), "extracted page");

            if page < max_pages && !self.opts.page_delay.is_zero() {
                tokio::time::sleep(self.opts.page_delay).await;
            }
        }

        info!(company, count = records.len(), "successfully scraped interview questions");
        Ok(records)
    }

    /// Extract records from one saved page without navigation or role filtering.
    pub fn extract_page(&self, html: &str) -> Result<Vec<InterviewRecord>, ScrapeError> {
        extract_records_from_html(html, &self.selectors)
    }
}

/// Scrape interview questions for a company with default settings and `max_pages` pages.
pub async fn get_company_interview_questions(
    company: &str,
    role: Option<&str>,
    max_pages: usize,
) -> Vec<InterviewRecord> {
    Client::builder()
        .max_pages(max_pages)
        .build()
        .questions(company, role)
        .await
}
