use thiserror::Error;

/// Errors that can occur while importing a recipe
#[derive(Error, Debug)]
pub enum ImportError {
    /// Network failure or timeout while fetching the page
    #[error("Failed to fetch URL: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Server responded with HTTP status {0}")]
    HttpStatus(u16),

    /// The URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The URL's host is not in the configured allow-list
    #[error("Recipes from {0} are not supported")]
    UnsupportedSite(String),

    /// A JSON-LD block could not be parsed
    #[error("Failed to parse structured data: {0}")]
    Parse(String),

    /// The generic scraper could not make sense of the page
    #[error("Generic scraper failed: {0}")]
    Scrape(String),

    /// The upload form cannot become a recipe
    #[error("Invalid recipe draft: {0}")]
    InvalidDraft(String),

    /// Error parsing HTTP headers
    #[error("Header parse error: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
