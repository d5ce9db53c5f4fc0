use recipe_club_import::{ImportConfig, NormalizedRecipe, RecipeImporter};

fn extract(json_ld: &str) -> Option<NormalizedRecipe> {
    let html = format!(
        r#"
        <html>
        <head>
            <script type="application/ld+json">
                {json_ld}
            </script>
        </head>
        <body></body>
        </html>
        "#
    );
    RecipeImporter::new(ImportConfig::default())
        .unwrap()
        .extract("https://example.com/pasta", &html)
}

fn instructions_for(raw: &str) -> Vec<String> {
    let json_ld = format!(
        r#"{{"@type": "Recipe", "name": "Pasta", "recipeInstructions": {raw}}}"#
    );
    extract(&json_ld).unwrap().instructions
}

#[test]
fn test_list_of_strings_is_unchanged() {
    assert_eq!(
        instructions_for(r#"["Boil water.", "Add pasta."]"#),
        vec!["Boil water.", "Add pasta."]
    );
}

#[test]
fn test_list_of_text_objects() {
    assert_eq!(
        instructions_for(r#"[{"text": "Boil water."}, {"text": "Add pasta."}]"#),
        vec!["Boil water.", "Add pasta."]
    );
}

#[test]
fn test_single_string_is_split_into_sentences() {
    assert_eq!(
        instructions_for(r#""Boil water. Add pasta""#),
        vec!["Boil water.", "Add pasta."]
    );
}

#[test]
fn test_single_how_to_step_object() {
    assert_eq!(
        instructions_for(r#"{"@type": "HowToStep", "text": "Stir well."}"#),
        vec!["Stir well."]
    );
}

#[test]
fn test_nested_section_lists() {
    let raw = r#"[
        [{"@type": "HowToStep", "text": "Chop onions."}],
        [{"@type": "HowToSection", "name": "Finish", "itemListElement": [
            {"@type": "HowToStep", "text": "Plate up."}
        ]}]
    ]"#;
    assert_eq!(instructions_for(raw), vec!["Chop onions.", "Plate up."]);
}

#[test]
fn test_missing_fields_default_to_empty() {
    let recipe = extract(r#"{"@type": "Recipe"}"#).unwrap();

    assert_eq!(recipe.title, "");
    assert_eq!(recipe.image, None);
    assert!(recipe.ingredients.is_empty());
    assert!(recipe.instructions.is_empty());
    assert_eq!(recipe.recipe_yield, None);
}

#[test]
fn test_ingredients_keep_order_and_duplicates() {
    let recipe = extract(
        r#"{"@type": "Recipe", "name": "Salty", "recipeIngredient": ["salt", "pepper", "salt"]}"#,
    )
    .unwrap();
    assert_eq!(recipe.ingredients, vec!["salt", "pepper", "salt"]);
}

#[test]
fn test_extraction_is_idempotent() {
    let json_ld = r#"{"@type": "Recipe", "name": "Twice", "image": {"url": "t.jpg"}, "recipeInstructions": "A. B"}"#;
    assert_eq!(extract(json_ld), extract(json_ld));
}

#[test]
fn test_non_recipe_types_are_ignored() {
    // No recipe-card markup either, so the fallback finds nothing
    assert!(extract(r#"{"@type": "Article", "name": "News"}"#).is_none());
}

#[test]
fn test_mixed_instruction_list_keeps_every_entry() {
    let steps = instructions_for(
        r#"["Boil water.", {"@type": "HowToStep", "url": "https://e/#s2"}, true]"#,
    );
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0], "Boil water.");
    assert!(steps[1].contains("https://e/#s2"));
    assert_eq!(steps[2], "true");
}

#[test]
fn test_mixed_field_lists_keep_valid_entries() {
    let recipe = extract(
        r#"{
            "@type": "Recipe",
            "name": "Pancakes",
            "image": ["https://a.jpg", {"@type": "ImageObject", "contentUrl": "https://b.jpg"}],
            "recipeIngredient": ["2 eggs", "1 cup milk", null],
            "recipeYield": ["8", "8 pancakes"]
        }"#,
    )
    .unwrap();

    assert_eq!(recipe.image.as_deref(), Some("https://a.jpg"));
    assert_eq!(recipe.ingredients, vec!["2 eggs", "1 cup milk"]);
    assert_eq!(recipe.recipe_yield.as_deref(), Some("8 pancakes"));
}
