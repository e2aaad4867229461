use std::path::PathBuf;

use walkdir::WalkDir;

use crate::{error::Result, files::try_delete, logger::Logger, prompt::Prompt};

use super::{confirm, StepContext, StepOutcome};

const PUBLIC_DIR: &str = "public";

/// Placeholder assets shipped by create-next-app.
const DEFAULT_ASSETS: [&str; 5] = ["file.svg", "globe.svg", "next.svg", "vercel.svg", "window.svg"];

pub async fn clean_public_assets<P: Prompt, R>(ctx: &StepContext<'_, P, R>, logger: &Logger) -> Result<StepOutcome> {
    let public_dir = ctx.root().join(PUBLIC_DIR);

    if !public_dir.is_dir() {
        logger.info(format!("no {PUBLIC_DIR}/ directory, nothing to clean"));
        return Ok(StepOutcome::Skipped)
    }

    let mut defaults: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(&public_dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;

        if entry.file_type().is_file() && DEFAULT_ASSETS.iter().any(|a| entry.file_name() == *a) {
            defaults.push(entry.into_path());
        }
    }

    if defaults.is_empty() {
        logger.info("No default assets left");
        return Ok(StepOutcome::Skipped)
    }

    let names: Vec<String> = defaults.iter()
        .filter_map(|p| p.file_name())
        .map(|f| f.to_string_lossy().into_owned())
        .collect();

    if !confirm(ctx.prompt, &format!("Remove default assets from {PUBLIC_DIR}/ ({})?", names.join(", ")), logger)? {
        return Ok(StepOutcome::Skipped)
    }

    let mut removed = 0;
    for path in &defaults {
        if try_delete(path).await? {
            removed += 1;
        }
    }

    logger.success(format!("Removed {removed} default asset(s) from {PUBLIC_DIR}/"));

    Ok(StepOutcome::Applied)
}
