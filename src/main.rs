use log::error;
use recipe_club_import::{fetch_link_preview, ImportConfig, ImportOutcome, RecipeImporter};
use std::env;
use std::process::ExitCode;

const USAGE: &str = "Usage: recipe-club-import <url> [--preview]";

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let preview = args.iter().any(|arg| arg == "--preview");
    let url = args
        .iter()
        .find(|arg| !arg.starts_with("--"))
        .ok_or(USAGE)?;

    let config = ImportConfig::load()?;

    if preview {
        let preview = fetch_link_preview(url, &config).await;
        println!("{}", serde_json::to_string_pretty(&preview)?);
        return Ok(ExitCode::SUCCESS);
    }

    let importer = RecipeImporter::new(config)?;
    match importer.import(url).await {
        ImportOutcome::Found(recipe) => {
            println!("{}", serde_json::to_string_pretty(&recipe)?);
            Ok(ExitCode::SUCCESS)
        }
        ImportOutcome::NotFound(reason) => {
            error!("{}: {}", url, reason);
            eprintln!("{reason}");
            Ok(ExitCode::FAILURE)
        }
    }
}
