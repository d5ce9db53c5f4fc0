//! Hand-off from an import to the recipe upload form.
//!
//! An import produces a [`Prefill`]. The workflow keeps it in a
//! [`PrefillSlot`] until the upload form is rendered, which takes it exactly
//! once. The rendered [`UploadForm`] carries the imported image along so the
//! submitted form alone is enough to build the [`RecipeDraft`].

use crate::error::ImportError;
use crate::model::NormalizedRecipe;
use serde::{Deserialize, Serialize};

/// Initial values for the upload form, taken from an imported recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefill {
    pub title: String,
    pub image: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub recipe_yield: Option<String>,
    pub source_url: String,
}

impl From<NormalizedRecipe> for Prefill {
    fn from(recipe: NormalizedRecipe) -> Self {
        Self {
            title: recipe.title,
            image: recipe.image,
            ingredients: recipe.ingredients,
            instructions: recipe.instructions,
            recipe_yield: recipe.recipe_yield,
            source_url: recipe.source_url,
        }
    }
}

/// Holds at most one pending prefill. Reading it empties the slot.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PrefillSlot {
    pending: Option<Prefill>,
}

impl PrefillSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a prefill, replacing any that was never consumed.
    pub fn store(&mut self, prefill: Prefill) {
        self.pending = Some(prefill);
    }

    pub fn take(&mut self) -> Option<Prefill> {
        self.pending.take()
    }

    pub fn peek(&self) -> Option<&Prefill> {
        self.pending.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}

/// The upload form as rendered and as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadForm {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub is_public: bool,
    /// Hidden field, set only when the form was prefilled from an import.
    pub image: Option<String>,
}

impl UploadForm {
    /// Blank form, public by default.
    pub fn blank() -> Self {
        Self {
            is_public: true,
            ..Default::default()
        }
    }

    /// Form initialised from a consumed prefill.
    pub fn from_prefill(prefill: Prefill) -> Self {
        Self {
            title: prefill.title,
            ingredients: prefill.ingredients,
            instructions: prefill.instructions,
            is_public: true,
            image: prefill.image,
        }
    }

    /// Render-time form: prefilled when the slot holds an import, blank
    /// otherwise. Either way the slot is empty afterwards.
    pub fn render(slot: &mut PrefillSlot) -> Self {
        slot.take().map(Self::from_prefill).unwrap_or_else(Self::blank)
    }
}

/// Field values for a new recipe owned by the submitting user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeDraft {
    pub title: String,
    /// One ingredient per line.
    pub ingredients: String,
    /// One step per line.
    pub instructions: String,
    pub is_public: bool,
    pub image: Option<String>,
}

fn join_lines(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

impl RecipeDraft {
    pub fn from_form(form: UploadForm) -> Result<Self, ImportError> {
        let title = form.title.trim();
        if title.is_empty() {
            return Err(ImportError::InvalidDraft("title is required".to_string()));
        }

        Ok(Self {
            title: title.to_string(),
            ingredients: join_lines(&form.ingredients),
            instructions: join_lines(&form.instructions),
            is_public: form.is_public,
            image: form.image.filter(|image| !image.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn imported() -> NormalizedRecipe {
        NormalizedRecipe {
            title: "Pasta".to_string(),
            image: Some("https://example.com/pasta.jpg".to_string()),
            ingredients: vec!["pasta".to_string(), "salt".to_string()],
            instructions: vec!["Boil water.".to_string(), "Add pasta.".to_string()],
            recipe_yield: Some("2".to_string()),
            source_url: "https://example.com/pasta".to_string(),
        }
    }

    #[test]
    fn test_prefill_is_read_once() {
        let mut slot = PrefillSlot::new();
        slot.store(imported().into());

        assert_eq!(slot.peek().map(|p| p.title.as_str()), Some("Pasta"));
        assert!(slot.take().is_some());
        assert!(slot.take().is_none());
        assert!(slot.is_empty());
    }

    #[test]
    fn test_store_replaces_pending_prefill() {
        let mut slot = PrefillSlot::new();
        slot.store(imported().into());
        let mut second: Prefill = imported().into();
        second.title = "Risotto".to_string();
        slot.store(second);

        assert_eq!(slot.take().unwrap().title, "Risotto");
        assert!(slot.take().is_none());
    }

    #[test]
    fn test_render_consumes_slot() {
        let mut slot = PrefillSlot::new();
        slot.store(imported().into());

        let form = UploadForm::render(&mut slot);
        assert_eq!(form.title, "Pasta");
        assert_eq!(form.image.as_deref(), Some("https://example.com/pasta.jpg"));
        assert!(slot.is_empty());

        let again = UploadForm::render(&mut slot);
        assert_eq!(again, UploadForm::blank());
    }

    #[test]
    fn test_draft_from_prefilled_form_keeps_image() {
        let mut form = UploadForm::from_prefill(imported().into());
        form.ingredients.push("   ".to_string());
        form.is_public = false;

        let draft = RecipeDraft::from_form(form).unwrap();
        assert_eq!(draft.title, "Pasta");
        assert_eq!(draft.ingredients, "pasta\nsalt");
        assert_eq!(draft.instructions, "Boil water.\nAdd pasta.");
        assert!(!draft.is_public);
        assert_eq!(draft.image.as_deref(), Some("https://example.com/pasta.jpg"));
    }

    #[test]
    fn test_draft_requires_title() {
        let form = UploadForm {
            title: "  ".to_string(),
            ..UploadForm::blank()
        };
        assert!(matches!(
            RecipeDraft::from_form(form),
            Err(ImportError::InvalidDraft(_))
        ));
    }
}
