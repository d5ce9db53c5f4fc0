use super::{Extractor, GenericScraper, ParsingContext};
use crate::error::ImportError;
use crate::model::NormalizedRecipe;
use log::debug;

/// Runs a [`GenericScraper`] and normalizes what it finds.
pub struct ScraperFallback {
    scraper: Box<dyn GenericScraper>,
}

impl ScraperFallback {
    pub fn new(scraper: Box<dyn GenericScraper>) -> Self {
        Self { scraper }
    }
}

/// One step per non-blank line.
fn split_lines(block: &str) -> Vec<String> {
    block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

impl Extractor for ScraperFallback {
    fn name(&self) -> &'static str {
        "generic_scraper"
    }

    fn extract(&self, context: &ParsingContext) -> Result<Option<NormalizedRecipe>, ImportError> {
        let page = self.scraper.scrape(context)?;

        let ingredients: Vec<String> = page
            .ingredients()
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        let instructions = split_lines(&page.instructions());

        if ingredients.is_empty() && instructions.is_empty() {
            debug!("ScraperFallback: scraper returned no content for {}", context.url);
            return Ok(None);
        }

        Ok(Some(NormalizedRecipe {
            title: page.title().trim().to_string(),
            image: page.image().filter(|image| !image.trim().is_empty()),
            ingredients,
            instructions,
            recipe_yield: page.recipe_yield(),
            source_url: context.url.clone(),
        }))
    }
}
