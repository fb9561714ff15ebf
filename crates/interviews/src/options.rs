// ABOUTME: Configuration options for the scraper including SourceKind, OutputFormat, Options, and ClientBuilder.
// ABOUTME: ClientBuilder provides a fluent API for constructing Client instances with custom settings.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::client::Client;
use crate::extractors::selectors::SelectorSet;
use crate::search::DEFAULT_BASE_URL;

/// Desktop Chrome user agent sent by both page sources.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Which page source the client opens when none is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Headless Chromium; needs the `browser` feature.
    Browser,
    /// Plain HTTP GET without JavaScript.
    Http,
}

impl Default for SourceKind {
    fn default() -> Self {
        if cfg!(feature = "browser") {
            SourceKind::Browser
        } else {
            SourceKind::Http
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SourceKind::Browser => "browser",
            SourceKind::Http => "http",
        };
        write!(f, "{}", s)
    }
}

impl From<&str> for SourceKind {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "http" | "fetch" => SourceKind::Http,
            _ => SourceKind::Browser,
        }
    }
}

/// Output format for rendered records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Markdown,
    Text,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Text => "text",
        };
        write!(f, "{}", s)
    }
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => OutputFormat::Markdown,
            "text" | "txt" => OutputFormat::Text,
            _ => OutputFormat::Json,
        }
    }
}

/// Configuration options for the scraper client.
#[derive(Debug, Clone)]
pub struct Options {
    /// Upper bound on result pages visited.
    pub max_pages: usize,
    /// How long to wait for question elements on each page.
    pub wait_timeout: Duration,
    /// How long to wait for each optional popup to appear.
    pub popup_timeout: Duration,
    /// Pause between consecutive pages.
    pub page_delay: Duration,
    /// Per-request timeout of the HTTP source.
    pub request_timeout: Duration,
    pub user_agent: String,
    pub headers: HashMap<String, String>,
    pub base_url: String,
    pub source: SourceKind,
    pub selectors: Option<SelectorSet>,
    pub http_client: Option<reqwest::Client>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_pages: 3,
            wait_timeout: Duration::from_secs(10),
            popup_timeout: Duration::from_secs(2),
            page_delay: Duration::from_secs(2),
            request_timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: HashMap::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            source: SourceKind::default(),
            selectors: None,
            http_client: None,
        }
    }
}

/// Builder for constructing Client instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the maximum number of pages to scrape.
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.opts.max_pages = max_pages;
        self
    }

    /// Set how long to wait for question elements on each page.
    pub fn wait_timeout(mut self, timeout: Duration) -> Self {
        self.opts.wait_timeout = timeout;
        self
    }

    /// Set how long to wait for each popup.
    pub fn popup_timeout(mut self, timeout: Duration) -> Self {
        self.opts.popup_timeout = timeout;
        self
    }

    /// Set the pause between pages.
    pub fn page_delay(mut self, delay: Duration) -> Self {
        self.opts.page_delay = delay;
        self
    }

    /// Set the HTTP request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.opts.request_timeout = timeout;
        self
    }

    /// Set the User-Agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Add a custom header to all HTTP requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Point the client at a different site root.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.opts.base_url = base_url.into();
        self
    }

    /// Choose the default page source.
    pub fn source(mut self, source: SourceKind) -> Self {
        self.opts.source = source;
        self
    }

    /// Replace the builtin selector set.
    pub fn selectors(mut self, selectors: SelectorSet) -> Self {
        self.opts.selectors = Some(selectors);
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Build the Client with the configured options.
    pub fn build(self) -> Client {
        Client::new(self.opts)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
