use super::{meta_property, selector, GenericScraper, ParsingContext, ScrapedRecipe};
use crate::error::ImportError;
use log::debug;
use scraper::{ElementRef, Html};

/// Finds recipe content by the class names recipe-card plugins put on it.
pub struct HtmlClassScraper;

const TITLE_CLASSES: &[&str] = &[
    "wprm-recipe-name",
    "tasty-recipes-title",
    "mv-create-title",
    "recipe-name",
    "recipe-title",
    "recipe-card-title",
    "recipe-header-title",
    "wprp-recipe-title",
    "recipe_name",
    "wpzoom-recipe-card-title",
    "recipe-card__title",
    "wpupg-recipe-name",
];

const INGREDIENT_CLASSES: &[&str] = &[
    "wprm-recipe-ingredients-container",
    "wprm-recipe-ingredient",
    "tasty-recipes-ingredients",
    "mv-create-ingredients",
    "recipe-ingredients",
    "recipe-ingredient-list",
    "recipe-card-ingredients",
    "wpzoom-recipe-ingredients",
    "simple-recipe-pro-recipe-ingredients",
    "wpupg-recipe-ingredients",
    "recipe_ingredients",
    "structured-ingredients",
    "mpprecipe-ingredients",
];

const INSTRUCTION_CLASSES: &[&str] = &[
    "wprm-recipe-instructions-container",
    "wprm-recipe-instruction",
    "tasty-recipes-instructions",
    "mv-create-instructions",
    "recipe-instructions",
    "recipe-instruction-list",
    "recipe-card-instructions",
    "wpzoom-recipe-instructions",
    "simple-recipe-pro-recipe-instructions",
    "wpupg-recipe-instructions",
    "recipe_instructions",
    "structured-instructions",
    "mpprecipe-instructions",
    "recipe-directions",
    "directions",
];

const SERVINGS_CLASSES: &[&str] = &[
    "wprm-recipe-servings",
    "recipe-yield",
    "recipe-servings",
    "tasty-recipes-yield",
    "mv-create-yield",
    "recipe-card-servings",
    "recipeyield",
];

// Fuzzy patterns for when no plugin class matched
const INGREDIENT_PATTERNS: &[&str] = &["ingredient"];
const INSTRUCTION_PATTERNS: &[&str] = &["instruction", "direction", "method"];

// Avoid grabbing the entire page through a fuzzy match
const MAX_FUZZY_TEXT: usize = 5000;

/// Page content found through class matching.
#[derive(Debug, Default)]
struct HtmlClassPage {
    title: String,
    image: Option<String>,
    ingredients: Vec<String>,
    instructions: Vec<String>,
    servings: Option<String>,
}

impl ScrapedRecipe for HtmlClassPage {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn ingredients(&self) -> Vec<String> {
        self.ingredients.clone()
    }

    fn instructions(&self) -> String {
        self.instructions.join("\n")
    }

    fn image(&self) -> Option<String> {
        self.image.clone()
    }

    fn recipe_yield(&self) -> Option<String> {
        self.servings.clone()
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn element_text(element: ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// Items inside one matched container: its `li` entries, else its `p`
/// entries, else one item per text node.
fn container_items(container: ElementRef) -> Result<Vec<String>, ImportError> {
    for tag in ["li", "p"] {
        let items: Vec<String> = container
            .select(&selector(tag)?)
            .map(element_text)
            .filter(|text| !text.is_empty())
            .collect();
        if !items.is_empty() {
            return Ok(items);
        }
    }

    Ok(container
        .text()
        .map(collapse_whitespace)
        .filter(|text| !text.is_empty())
        .collect())
}

fn first_text_by_class(document: &Html, classes: &[&str]) -> Result<Option<String>, ImportError> {
    for class_name in classes {
        let found = document
            .select(&selector(&format!(".{class_name}"))?)
            .map(element_text)
            .find(|text| !text.is_empty());
        if let Some(text) = found {
            debug!("HtmlClassScraper: matched .{}", class_name);
            return Ok(Some(text));
        }
    }
    Ok(None)
}

fn list_items(
    document: &Html,
    classes: &[&str],
    patterns: &[&str],
) -> Result<Vec<String>, ImportError> {
    for class_name in classes {
        let mut items = Vec::new();
        for container in document.select(&selector(&format!(".{class_name}"))?) {
            items.extend(container_items(container)?);
        }
        if !items.is_empty() {
            debug!(
                "HtmlClassScraper: found {} items using class {}",
                items.len(),
                class_name
            );
            return Ok(items);
        }
    }

    for pattern in patterns {
        let fuzzy = selector(&format!("[class*='{pattern}']"))?;
        // Outermost match only, nested matches would repeat its items
        let container = document.select(&fuzzy).find(|el| {
            let length: usize = el.text().map(str::len).sum();
            length > 0 && length < MAX_FUZZY_TEXT
        });
        if let Some(container) = container {
            let items = container_items(container)?;
            if !items.is_empty() {
                debug!("HtmlClassScraper: found items using fuzzy pattern {}", pattern);
                return Ok(items);
            }
        }
    }

    Ok(Vec::new())
}

fn heading(document: &Html) -> Result<Option<String>, ImportError> {
    Ok(document
        .select(&selector("h1, h2")?)
        .map(element_text)
        .find(|text| !text.is_empty()))
}

impl GenericScraper for HtmlClassScraper {
    fn scrape(&self, context: &ParsingContext) -> Result<Box<dyn ScrapedRecipe>, ImportError> {
        debug!("HtmlClassScraper: scraping {}", context.url);
        let document = &context.document;

        let title = match first_text_by_class(document, TITLE_CLASSES)? {
            Some(title) => Some(title),
            None => meta_property(document, "og:title").or(heading(document)?),
        }
        .ok_or_else(|| ImportError::Scrape("Could not extract recipe title from HTML".into()))?;

        let ingredients = list_items(document, INGREDIENT_CLASSES, INGREDIENT_PATTERNS)?;
        let instructions = list_items(document, INSTRUCTION_CLASSES, INSTRUCTION_PATTERNS)?;

        if ingredients.is_empty() && instructions.is_empty() {
            return Err(ImportError::Scrape(
                "Could not extract recipe content from HTML".into(),
            ));
        }

        debug!(
            "HtmlClassScraper: {} with {} ingredients and {} instructions",
            title,
            ingredients.len(),
            instructions.len()
        );

        Ok(Box::new(HtmlClassPage {
            title,
            image: meta_property(document, "og:image"),
            ingredients,
            instructions,
            servings: first_text_by_class(document, SERVINGS_CLASSES)?,
        }))
    }
}
