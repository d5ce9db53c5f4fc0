use serde::Serialize;
use std::fmt;

/// Canonical recipe record produced by an import.
///
/// `ingredients` and `instructions` are always flat lists of trimmed lines,
/// whatever shape the source page used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedRecipe {
    pub title: String,
    pub image: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(rename = "yield", skip_serializing_if = "Option::is_none")]
    pub recipe_yield: Option<String>,
    pub source_url: String,
}

/// Why an import produced no recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum NotFound {
    /// The page could not be fetched (network, timeout or HTTP status).
    FetchFailed(String),
    /// The host is outside the configured allow-list.
    UnsupportedSite(String),
    /// Neither structured data nor the generic scraper found a recipe.
    NoRecipeData,
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFound::FetchFailed(detail) => write!(f, "could not load that page ({detail})"),
            NotFound::UnsupportedSite(host) => {
                write!(f, "recipes from {host} are not supported yet")
            }
            NotFound::NoRecipeData => write!(f, "could not find recipe data on that page"),
        }
    }
}

/// Result of [`crate::import_recipe`]. Every failure collapses into `NotFound`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Found(NormalizedRecipe),
    NotFound(NotFound),
}

impl ImportOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, ImportOutcome::Found(_))
    }

    pub fn into_recipe(self) -> Option<NormalizedRecipe> {
        match self {
            ImportOutcome::Found(recipe) => Some(recipe),
            ImportOutcome::NotFound(_) => None,
        }
    }
}

/// OpenGraph summary of a page, used for link previews.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkPreview {
    pub title: String,
    pub image: String,
    pub description: String,
    pub url: String,
}
