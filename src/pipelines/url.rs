use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::extractors::{
    Extractor, GenericScraper, HtmlClassScraper, JsonLdExtractor, ParsingContext, ScraperFallback,
};
use crate::fetchers::{Fetcher, RequestFetcher};
use crate::model::{ImportOutcome, NormalizedRecipe, NotFound};
use log::{debug, info, warn};
use reqwest::Url;

/// Imports recipes from URLs.
///
/// This pipeline:
/// 1. Rejects hosts outside the configured allow-list
/// 2. Fetches the page once, bounded by the configured timeout
/// 3. Tries JSON-LD structured data
/// 4. Falls back to the generic scraper (unless disabled)
///
/// Every failure ends as [`ImportOutcome::NotFound`].
pub struct RecipeImporter {
    config: ImportConfig,
    fetcher: Box<dyn Fetcher>,
    extractors: Vec<Box<dyn Extractor>>,
}

impl RecipeImporter {
    pub fn new(config: ImportConfig) -> Result<Self, ImportError> {
        let fetcher = RequestFetcher::from_config(&config)?;
        Ok(Self::with_parts(
            config,
            Box::new(fetcher),
            Box::new(HtmlClassScraper),
        ))
    }

    pub fn with_parts(
        config: ImportConfig,
        fetcher: Box<dyn Fetcher>,
        scraper: Box<dyn GenericScraper>,
    ) -> Self {
        let mut extractors: Vec<Box<dyn Extractor>> = vec![Box::new(JsonLdExtractor)];
        if config.fallback_enabled {
            extractors.push(Box::new(ScraperFallback::new(scraper)));
        }

        Self {
            config,
            fetcher,
            extractors,
        }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    fn check_host(&self, url: &str) -> Result<(), NotFound> {
        if self.config.allowed_hosts.is_empty() {
            return Ok(());
        }

        let parsed = Url::parse(url).map_err(|e| {
            NotFound::FetchFailed(ImportError::InvalidUrl(format!("{url}: {e}")).to_string())
        })?;
        let host = parsed.host_str().unwrap_or_default();
        if self.config.allows_host(host) {
            Ok(())
        } else {
            Err(NotFound::UnsupportedSite(host.to_string()))
        }
    }

    pub async fn import(&self, url: &str) -> ImportOutcome {
        let url = url.trim();

        if let Err(not_found) = self.check_host(url) {
            info!("Import of {} rejected: {}", url, not_found);
            return ImportOutcome::NotFound(not_found);
        }

        let html = match self.fetcher.fetch(url).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Import of {} failed to fetch: {}", url, e);
                return ImportOutcome::NotFound(NotFound::FetchFailed(e.to_string()));
            }
        };

        match self.extract(url, &html) {
            Some(recipe) => ImportOutcome::Found(recipe),
            None => ImportOutcome::NotFound(NotFound::NoRecipeData),
        }
    }

    /// Run the extraction strategies in order on already-fetched HTML.
    pub fn extract(&self, url: &str, html: &str) -> Option<NormalizedRecipe> {
        let context = ParsingContext::new(url, html);

        for extractor in &self.extractors {
            match extractor.extract(&context) {
                Ok(Some(recipe)) => {
                    info!("Imported {} using {}", url, extractor.name());
                    return Some(recipe);
                }
                Ok(None) => debug!("{}: no recipe on {}", extractor.name(), url),
                Err(e) => debug!("{}: failed on {}: {}", extractor.name(), url, e),
            }
        }

        info!("No recipe data found on {}", url);
        None
    }
}
