// ABOUTME: Main library entry point for the Glassdoor interview-question scraper.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, InterviewRecord, ScrapeError, PageSource, and helpers.

//! Scrape interview questions, answers, and metadata from Glassdoor.
//!
//! A [`Client`] walks a fixed number of result pages through a [`PageSource`]
//! (headless browser by default), dismisses known popups, and turns every
//! question block into an [`InterviewRecord`].
//!
//! # Example
//!
//! ```no_run
//! use glassdoor_interviews::Client;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Client::builder().max_pages(2).build();
//!     let records = client.questions("Google", Some("Software Engineer")).await;
//!     for r in records.iter().take(3) {
//!         println!("{}\n", r.format_text());
//!     }
//! }
//! ```

pub mod client;
pub mod error;
pub mod extractors;
pub mod filter;
pub mod options;
pub mod resource;
pub mod result;
pub mod search;
pub mod source;

pub use crate::client::{get_company_interview_questions, Client};
pub use crate::error::{ErrorCode, ScrapeError};
pub use crate::extractors::clean::{clean_opt, clean_text};
pub use crate::extractors::loader::{load_builtin_selectors, load_selectors_file, parse_selectors};
pub use crate::extractors::selectors::{Popup, SelectorSet};
pub use crate::filter::role_matches;
pub use crate::options::{ClientBuilder, Options, OutputFormat, SourceKind};
pub use crate::result::{format_records, InterviewRecord, Metadata, Result};
pub use crate::search::build_url;
pub use crate::source::{FixtureSource, HttpSource, PageSource};
#[cfg(feature = "browser")]
pub use crate::source::BrowserSource;
