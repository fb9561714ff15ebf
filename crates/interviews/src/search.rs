// ABOUTME: Builds Glassdoor interview-question search URLs for a company and optional role.
// ABOUTME: Page 1 is the bare search URL; later pages add a `p` query parameter.

use url::Url;

use crate::error::ScrapeError;

/// Default site root.
pub const DEFAULT_BASE_URL: &str = "https://www.glassdoor.com";

fn slug(s: &str) -> String {
    s.to_lowercase().replace(' ', "-")
}

/// Builds the first-page search URL.
///
/// The `IL.0,N` range counts the characters of the company name as given,
/// not of its slug.
pub fn build_url(base: &str, company: &str, role: Option<&str>) -> Result<String, ScrapeError> {
    if company.trim().is_empty() {
        return Err(ScrapeError::invalid_url(
            "",
            "BuildUrl",
            Some(anyhow::anyhow!("company name is empty")),
        ));
    }

    let base = base.trim_end_matches('/');
    let company_slug = slug(company);
    let name_len = company.chars().count();
    let prefix = match role.map(str::trim).filter(|r| !r.is_empty()) {
        Some(role) => format!("{}-{}", company_slug, slug(role)),
        None => company_slug.clone(),
    };
    let raw = format!(
        "{}/Interview/{}-interview-questions-SRCH_IL.0,{}_{}.htm",
        base, prefix, name_len, company_slug
    );

    let parsed = Url::parse(&raw).map_err(|e| {
        ScrapeError::invalid_url(
            raw.clone(),
            "BuildUrl",
            Some(anyhow::anyhow!("invalid URL: {}", e)),
        )
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed.to_string()),
        _ => Err(ScrapeError::invalid_url(
            raw,
            "BuildUrl",
            Some(anyhow::anyhow!("scheme must be http or https")),
        )),
    }
}

/// URL of the given 1-based page.
pub fn page_url(first_page: &str, page: usize) -> String {
    if page > 1 {
        format!("{}?p={}", first_page, page)
    } else {
        first_page.to_string()
    }
}
