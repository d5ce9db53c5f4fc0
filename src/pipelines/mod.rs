pub mod url;

pub use url::RecipeImporter;
