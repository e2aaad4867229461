use rand::seq::IndexedRandom;

use crate::{error::Result, files::find_file, logger::Logger, prompt::Prompt};

use super::{confirm, StepContext, StepOutcome};

const CANDIDATES: [&str; 2] = ["src/app/page.tsx", "app/page.tsx"];

const GREETINGS: [&str; 5] = [
    "Hello, handsome!",
    "This project is going to be a killer!",
    "Let's ship something great!",
    "Ready to build something legendary?",
    "Time to create some magic! ✨",
];

const COMPONENT_SIGNATURE: &str = "export default function HomePage()";

fn home_page_contents(greeting: &str) -> String {
    format!(r#"{COMPONENT_SIGNATURE} {{
    return (
        <div className="container py-10">
            <h1 className="text-4xl font-bold tracking-tight">
                {greeting}
            </h1>
        </div>
    )
}}
"#)
}

/// Replaces the create-next-app landing page with a minimal one.
pub async fn update_home_page<P: Prompt, R>(ctx: &StepContext<'_, P, R>, logger: &Logger) -> Result<StepOutcome> {
    let Some(path) = find_file(ctx.root(), &CANDIDATES, "home page", logger).await else {
        return Ok(StepOutcome::Warning("home page not found".into()))
    };

    match tokio::fs::read_to_string(&path).await {
        Ok(current) if current.contains(COMPONENT_SIGNATURE) => {
            logger.info("Home page already updated");
            return Ok(StepOutcome::Skipped)
        },
        Ok(_) => (),
        Err(e) => {
            logger.warn(format!("unable to read {}, leaving it as is: {e}", path.display()));
            return Ok(StepOutcome::Warning(e.to_string()))
        },
    }

    if !confirm(ctx.prompt, "Replace the default home page?", logger)? {
        return Ok(StepOutcome::Skipped)
    }

    let greeting = GREETINGS.choose(&mut rand::rng()).copied().unwrap_or(GREETINGS[0]);

    match tokio::fs::write(&path, home_page_contents(greeting)).await {
        Ok(()) => {
            logger.success("Home page updated");
            Ok(StepOutcome::Applied)
        },
        Err(e) => {
            logger.error(format!("failed to update home page, please update it manually: {e}"));
            Ok(StepOutcome::Warning(e.to_string()))
        },
    }
}
