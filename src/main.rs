use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use page_annotator::{AnnotatorConfig, PageAnnotator, telemetry};
use tracing::{Level, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Annotates DocFX page-model JSON with "view source" and "improve this doc"
/// links and prints the result.
#[derive(Parser)]
#[command(name = "docfx-helper", version)]
struct Cli {
    /// Page-model JSON files (a single object or an array). Reads stdin when
    /// omitted.
    files: Vec<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // A .env file is optional here; the variables may come from the CI job.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("warn", Level::INFO))
        .with(telemetry::layer())
        .init();

    let config = AnnotatorConfig::from_env()?;
    let annotator = PageAnnotator::new(&config);

    if cli.files.is_empty() {
        let mut raw = String::new();
        io::stdin().read_to_string(&mut raw)?;
        match annotator.annotate_json(&raw) {
            Ok(annotated) => println!("{annotated}"),
            Err(err) => warn!(error = %err, "skipping page model from stdin"),
        }
        return Ok(());
    }

    for file in &cli.files {
        if let Some(annotated) = annotate_file(&annotator, file) {
            println!("{annotated}");
        }
    }

    Ok(())
}

/// Annotated JSON for one file, or `None` after logging why it was skipped.
fn annotate_file(annotator: &PageAnnotator, file: &Path) -> Option<String> {
    let raw = match fs::read_to_string(file) {
        Ok(raw) => raw,
        Err(error) => {
            warn!(file = %file.display(), %error, "cannot read page model, skipping");
            return None;
        }
    };

    match annotator.annotate_json(&raw) {
        Ok(annotated) => {
            info!(file = %file.display(), "annotated page model");
            Some(annotated)
        }
        Err(error) => {
            warn!(file = %file.display(), %error, "malformed page model, skipping");
            None
        }
    }
}
