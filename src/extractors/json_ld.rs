use super::{selector, Extractor, ParsingContext};
use crate::error::ImportError;
use crate::model::NormalizedRecipe;
use html_escape::decode_html_entities;
use log::debug;
use serde_json::Value;

/// Reads Schema.org `Recipe` objects out of `application/ld+json` scripts.
pub struct JsonLdExtractor;

fn decode_html_symbols(text: &str) -> String {
    decode_html_entities(text).into_owned()
}

fn is_recipe_type(value: &Value) -> bool {
    let is_recipe = |t: &Value| t.as_str().is_some_and(|t| t.eq_ignore_ascii_case("recipe"));
    match value.get("@type") {
        Some(Value::Array(types)) => types.iter().any(is_recipe),
        Some(other) => is_recipe(other),
        None => false,
    }
}

/// First recipe object in a parsed block, searching arrays element by element
/// and descending into `@graph`.
fn find_recipe(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.iter().find_map(find_recipe),
        Value::Object(map) => {
            if is_recipe_type(value) {
                Some(value)
            } else {
                map.get("@graph").and_then(find_recipe)
            }
        }
        _ => None,
    }
}

/// Image URL from a string, an `ImageObject`, or the first entry of a list.
fn image_url(image: &Value) -> Option<String> {
    let url = match image {
        Value::String(url) => url.as_str(),
        Value::Object(map) => map
            .get("url")
            .or_else(|| map.get("contentUrl"))
            .and_then(Value::as_str)?,
        Value::Array(images) => return images.first().and_then(image_url),
        _ => return None,
    };
    let url = decode_html_symbols(url).trim().to_string();
    (!url.is_empty()).then_some(url)
}

fn push_line(lines: &mut Vec<String>, text: &str) {
    let line = decode_html_symbols(text).trim().to_string();
    if !line.is_empty() {
        lines.push(line);
    }
}

fn collect_ingredient(entry: &Value, lines: &mut Vec<String>) {
    match entry {
        Value::String(text) => push_line(lines, text),
        Value::Number(n) => push_line(lines, &n.to_string()),
        Value::Object(map) => {
            let Some(name) = map.get("name").and_then(Value::as_str) else {
                return;
            };
            match map.get("amount").and_then(Value::as_str).map(str::trim) {
                Some(amount) if !amount.is_empty() => {
                    push_line(lines, &format!("{amount} {}", name.trim()))
                }
                _ => push_line(lines, name),
            }
        }
        Value::Array(_) | Value::Bool(_) | Value::Null => {}
    }
}

/// Ingredient lines, each list entry normalized on its own. A single string
/// gives one line per non-blank line.
fn ingredient_lines(raw: &Value) -> Vec<String> {
    let mut lines = Vec::new();
    match raw {
        Value::Array(entries) => entries
            .iter()
            .for_each(|entry| collect_ingredient(entry, &mut lines)),
        Value::String(text) => text.lines().for_each(|line| push_line(&mut lines, line)),
        other => collect_ingredient(other, &mut lines),
    }
    lines
}

fn yield_text(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => {
            let s = decode_html_symbols(s);
            (!s.trim().is_empty()).then_some(s)
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Array(entries) => {
            let texts: Vec<String> = entries.iter().filter_map(yield_text).collect();
            // Prefer the descriptive entry ("4 servings") over the bare number
            texts
                .iter()
                .find(|s| s.contains(char::is_alphabetic))
                .or_else(|| texts.first())
                .cloned()
        }
        Value::Object(_) | Value::Bool(_) | Value::Null => None,
    }
}

fn collect_step(step: &Value, steps: &mut Vec<String>) {
    match step {
        Value::String(text) => push_line(steps, text),
        Value::Number(n) => push_line(steps, &n.to_string()),
        Value::Bool(b) => push_line(steps, &b.to_string()),
        Value::Array(items) => items.iter().for_each(|item| collect_step(item, steps)),
        Value::Object(map) => {
            let text = map
                .get("text")
                .and_then(Value::as_str)
                .filter(|text| !text.trim().is_empty());
            if let Some(text) = text {
                push_line(steps, text);
            } else if let Some(Value::Array(items)) = map.get("itemListElement") {
                // HowToSection
                items.iter().for_each(|item| collect_step(item, steps));
            } else if let Some(name) = map.get("name").and_then(Value::as_str) {
                push_line(steps, name);
            } else if map.contains_key("text") {
                // Blank step
            } else {
                // No readable field, keep the entry as its JSON text
                push_line(steps, &step.to_string());
            }
        }
        Value::Null => {}
    }
}

/// Split a single block of instructions on ". " into sentences, restoring the
/// period the split removed.
pub(crate) fn split_sentences(text: &str) -> Vec<String> {
    text.split(". ")
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .map(|sentence| {
            if sentence.ends_with('.') {
                sentence.to_string()
            } else {
                format!("{sentence}.")
            }
        })
        .collect()
}

fn normalize_instructions(raw: &Value) -> Vec<String> {
    match raw {
        Value::String(text) => split_sentences(&decode_html_symbols(text)),
        Value::Array(_) | Value::Object(_) => {
            let mut steps = Vec::new();
            collect_step(raw, &mut steps);
            steps
        }
        Value::Number(n) => split_sentences(&n.to_string()),
        Value::Bool(b) => split_sentences(&b.to_string()),
        Value::Null => Vec::new(),
    }
}

fn convert_to_recipe(recipe: &Value, url: &str) -> NormalizedRecipe {
    let title = recipe
        .get("name")
        .and_then(Value::as_str)
        .map(|name| decode_html_symbols(name).trim().to_string())
        .unwrap_or_default();

    NormalizedRecipe {
        title,
        image: recipe.get("image").and_then(image_url),
        ingredients: recipe
            .get("recipeIngredient")
            .map(ingredient_lines)
            .unwrap_or_default(),
        instructions: recipe
            .get("recipeInstructions")
            .map(normalize_instructions)
            .unwrap_or_default(),
        recipe_yield: recipe.get("recipeYield").and_then(yield_text),
        source_url: url.to_string(),
    }
}

/// Strip the wrappers and trailing commas some publishers leave in their
/// JSON-LD, and replace raw control characters inside strings.
fn sanitize_json(json_str: &str) -> String {
    let trimmed = json_str
        .trim()
        .trim_start_matches("<!--")
        .trim_end_matches("-->")
        .trim()
        .trim_start_matches("//<![CDATA[")
        .trim_end_matches("//]]>")
        .trim();

    let mut cleaned = String::with_capacity(trimmed.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in trimmed.chars() {
        if in_string {
            match c {
                _ if escaped => {
                    escaped = false;
                    cleaned.push(c);
                }
                '\\' => {
                    escaped = true;
                    cleaned.push(c);
                }
                '"' => {
                    in_string = false;
                    cleaned.push(c);
                }
                '\n' | '\r' | '\t' => cleaned.push(' '),
                _ => cleaned.push(c),
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                cleaned.push(c);
            }
            ']' | '}' => {
                let kept = cleaned.trim_end().len();
                if cleaned[..kept].ends_with(',') {
                    cleaned.truncate(kept - 1);
                }
                cleaned.push(c);
            }
            _ => cleaned.push(c),
        }
    }

    cleaned
}

fn parse_block(raw: &str) -> Result<Value, ImportError> {
    serde_json::from_str::<Value>(raw)
        .or_else(|_| serde_json::from_str::<Value>(&sanitize_json(raw)))
        .map_err(|e| ImportError::Parse(e.to_string()))
}

impl Extractor for JsonLdExtractor {
    fn name(&self) -> &'static str {
        "json_ld"
    }

    fn extract(&self, context: &ParsingContext) -> Result<Option<NormalizedRecipe>, ImportError> {
        debug!("JsonLdExtractor: Starting parse for URL: {}", context.url);
        let scripts = selector(r#"script[type="application/ld+json"]"#)?;

        for (index, script) in context.document.select(&scripts).enumerate() {
            let raw_json: String = script.text().collect();

            let json_ld = match parse_block(&raw_json) {
                Ok(json_ld) => json_ld,
                Err(e) => {
                    debug!("JsonLdExtractor: skipping script {}: {}", index, e);
                    continue;
                }
            };

            if let Some(recipe) = find_recipe(&json_ld) {
                debug!("JsonLdExtractor: Found recipe in script {}", index);
                return Ok(Some(convert_to_recipe(recipe, &context.url)));
            }
            debug!("JsonLdExtractor: No recipe found in script {}", index);
        }

        Ok(None)
    }
}
