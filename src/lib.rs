pub mod config;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod model;
pub mod pipelines;
pub mod prefill;
pub mod preview;

pub use config::ImportConfig;
pub use error::ImportError;
pub use model::{ImportOutcome, LinkPreview, NormalizedRecipe, NotFound};
pub use pipelines::RecipeImporter;
pub use prefill::{Prefill, PrefillSlot, RecipeDraft, UploadForm};
pub use preview::fetch_link_preview;

use log::warn;

/// Import a recipe from `url` with the default configuration.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() {
/// use recipe_club_import::{import_recipe, ImportOutcome};
///
/// match import_recipe("https://example.com/recipe").await {
///     ImportOutcome::Found(recipe) => println!("{}", recipe.title),
///     ImportOutcome::NotFound(reason) => eprintln!("{reason}"),
/// }
/// # }
/// ```
pub async fn import_recipe(url: &str) -> ImportOutcome {
    import_recipe_with_config(url, &ImportConfig::default()).await
}

/// Import a recipe from `url`. Never fails; see [`ImportOutcome`].
pub async fn import_recipe_with_config(url: &str, config: &ImportConfig) -> ImportOutcome {
    match RecipeImporter::new(config.clone()) {
        Ok(importer) => importer.import(url).await,
        Err(e) => {
            warn!("Could not set up importer: {}", e);
            ImportOutcome::NotFound(NotFound::FetchFailed(e.to_string()))
        }
    }
}
