use std::{path::PathBuf, process::exit};

use clap::Parser;
use config::SetupOptions;
use error::SetupError;
use logger::Logger;
use package_manager::InheritedStdio;
use pipeline::run_steps;
use prompt::{AssumeYes, Prompt, TermPrompt};
use steps::{Step, StepContext};

mod config;
mod error;
mod files;
mod logger;
mod metadata;
mod package_manager;
mod pipeline;
mod prompt;
mod steps;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv::dotenv().ok();

    let opts = CliOpts::parse();
    let logger = Logger::new(opts.verbose);

    let result = if opts.yes {
        setup(&opts, &logger, &AssumeYes).await
    } else {
        setup(&opts, &logger, &TermPrompt::new()).await
    };

    match result {
        Ok(res) => {
            logger.success(format!("Setup completed: {res}"));
            exit(0)
        },
        Err(e) => {
            logger.error(format!("Setup failed: {e}"));
            exit(1)
        }
    }
}

async fn setup<P: Prompt>(opts: &CliOpts, logger: &Logger, prompt: &P) -> Result<pipeline::SetupResult, SetupError> {
    let options = SetupOptions::from_cli(opts).map_err(SetupError::Options)?;

    logger.info(format!("Working in directory: {}", options.root.display()));

    let ctx = StepContext {
        options: &options,
        logger,
        prompt,
        runner: &InheritedStdio,
    };

    run_steps(&ctx, &Step::enabled(&options)).await
}

#[derive(Parser, Clone)]
#[command(author, version, about)]
pub struct CliOpts {
    #[arg(env = "NEXTJS_PROJECT_PATH", default_value = ".",
        help = "The Next.js project directory to set up")]
    path: PathBuf,

    #[arg(long, env = "NEXTPREP_PRETTIER_CONFIG", value_name = "FILE",
        help = "Use this Prettier config instead of the bundled one")]
    prettier_config: Option<PathBuf>,

    #[arg(long, default_value_t = false,
        help = "Don't set up Prettier")]
    skip_prettier: bool,

    #[arg(long, default_value_t = false,
        help = "Don't set up ESLint")]
    skip_eslint: bool,

    #[arg(long, default_value_t = false,
        help = "Don't rewrite the home page")]
    skip_home_page: bool,

    #[arg(long, default_value_t = false,
        help = "Don't remove the default assets from public/")]
    skip_assets: bool,

    #[arg(long, default_value_t = false,
        help = "Don't swap the Geist font for Inter")]
    skip_font: bool,

    #[arg(long, default_value_t = false,
        help = "Don't add the container utility to globals.css")]
    skip_container: bool,

    #[arg(short, long, default_value_t = false,
        help = "Answer yes to every confirmation prompt")]
    yes: bool,

    #[arg(short, long, env = "NEXTPREP_VERBOSE", default_value_t = false,
        help = "Verbose logging")]
    verbose: bool,
}
