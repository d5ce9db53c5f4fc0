use crate::error::ImportError;
use crate::model::NormalizedRecipe;
use scraper::{Html, Selector};

mod fallback;
mod html_class;
mod json_ld;

pub use fallback::ScraperFallback;
pub use html_class::HtmlClassScraper;
pub use json_ld::JsonLdExtractor;

pub struct ParsingContext {
    pub url: String,
    pub document: Html,
}

impl ParsingContext {
    pub fn new(url: impl Into<String>, html: &str) -> Self {
        Self {
            url: url.into(),
            document: Html::parse_document(html),
        }
    }
}

/// One extraction strategy.
///
/// `Ok(None)` means the strategy found nothing on the page; `Err` means it
/// could not run. Both send the importer on to the next strategy.
pub trait Extractor: Send + Sync {
    fn name(&self) -> &'static str;

    fn extract(&self, context: &ParsingContext) -> Result<Option<NormalizedRecipe>, ImportError>;
}

/// Recipe content located by a generic scraper, before normalization.
pub trait ScrapedRecipe {
    fn title(&self) -> String;
    fn ingredients(&self) -> Vec<String>;
    /// All instructions as one block, one step per line.
    fn instructions(&self) -> String;

    fn image(&self) -> Option<String> {
        None
    }

    fn recipe_yield(&self) -> Option<String> {
        None
    }
}

/// Site-agnostic scraper used when a page carries no structured data.
pub trait GenericScraper: Send + Sync {
    fn scrape(&self, context: &ParsingContext) -> Result<Box<dyn ScrapedRecipe>, ImportError>;
}

pub(crate) fn selector(css: &str) -> Result<Selector, ImportError> {
    Selector::parse(css).map_err(|e| ImportError::Parse(format!("bad selector {css}: {e}")))
}

/// `content` of the `<meta property=...>` tag, if present and non-blank.
pub(crate) fn meta_property(document: &Html, property: &str) -> Option<String> {
    let selector = selector(&format!(r#"meta[property="{property}"]"#)).ok()?;
    document
        .select(&selector)
        .filter_map(|meta| meta.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(str::to_string)
}
