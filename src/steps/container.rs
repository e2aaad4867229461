use std::path::Path;

use crate::{error::Result, files::find_file, logger::Logger};

use super::StepOutcome;

pub const STYLESHEET_CANDIDATES: [&str; 2] = ["src/app/globals.css", "app/globals.css"];

const UTILITY_MARKER: &str = "@utility container";

const CONTAINER_UTILITY: &str = "
@utility container {
    @apply max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 h-full;
}
";

/// Appends a `container` utility (max width, centering, responsive padding) to globals.css.
pub async fn add_container_utility(root: &Path, logger: &Logger) -> Result<StepOutcome> {
    let Some(path) = find_file(root, &STYLESHEET_CANDIDATES, "globals.css", logger).await else {
        return Ok(StepOutcome::Warning("globals.css not found".into()))
    };

    let existing = match tokio::fs::read_to_string(&path).await {
        Ok(v) => v,
        Err(e) => {
            logger.error(format!("failed to read {}, please add the container utility manually: {e}", path.display()));
            return Ok(StepOutcome::Warning(e.to_string()))
        },
    };

    if existing.contains(UTILITY_MARKER) {
        logger.info("Container utility already exists in globals.css");
        return Ok(StepOutcome::Skipped)
    }

    let contents = format!("{}\n{CONTAINER_UTILITY}", existing.trim_end());

    match tokio::fs::write(&path, contents).await {
        Ok(()) => {
            logger.success("Container utility added to globals.css");
            Ok(StepOutcome::Applied)
        },
        Err(e) => {
            logger.error(format!("failed to update {}, please add the container utility manually: {e}", path.display()));
            Ok(StepOutcome::Warning(e.to_string()))
        },
    }
}
