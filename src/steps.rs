use std::{fmt::Display, path::Path};

use crate::{
    config::SetupOptions,
    error::Result,
    logger::Logger,
    metadata::manifest::{self, has_package},
    package_manager::{CommandRunner, PackageManager},
    prompt::Prompt,
};

pub mod assets;
pub mod container;
pub mod eslint;
pub mod font;
pub mod home_page;
pub mod prettier;
pub mod validate;

/// Everything a step may touch.
pub struct StepContext<'a, P, R> {
    pub options: &'a SetupOptions,
    pub logger: &'a Logger,
    pub prompt: &'a P,
    pub runner: &'a R,
}

impl<P, R> StepContext<'_, P, R> {
    pub fn root(&self) -> &Path {
        &self.options.root
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Applied,
    /// Declined by the user or nothing left to do.
    Skipped,
    /// Recoverable failure, already logged.
    Warning(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    ValidateProject,
    Prettier,
    Eslint,
    HomePage,
    AssetCleanup,
    FontSwap,
    ContainerUtility,
}

impl Step {
    pub const ALL: [Step; 7] = [
        Step::ValidateProject,
        Step::Prettier,
        Step::Eslint,
        Step::HomePage,
        Step::AssetCleanup,
        Step::FontSwap,
        Step::ContainerUtility,
    ];

    /// Steps to run for `options`, in execution order.
    pub fn enabled(options: &SetupOptions) -> Vec<Step> {
        Self::ALL.into_iter().filter(|s| !s.is_skipped(options)).collect()
    }

    pub fn name(self) -> &'static str {
        match self {
            Step::ValidateProject => "validate-project",
            Step::Prettier => "prettier",
            Step::Eslint => "eslint",
            Step::HomePage => "home-page",
            Step::AssetCleanup => "asset-cleanup",
            Step::FontSwap => "font-swap",
            Step::ContainerUtility => "container-utility",
        }
    }

    /// A failing critical step aborts the run whatever the error kind.
    pub fn is_critical(self) -> bool {
        matches!(self, Step::ValidateProject)
    }

    fn is_skipped(self, options: &SetupOptions) -> bool {
        match self {
            Step::ValidateProject => false,
            Step::Prettier => options.skip_prettier,
            Step::Eslint => options.skip_eslint,
            Step::HomePage => options.skip_home_page,
            Step::AssetCleanup => options.skip_assets,
            Step::FontSwap => options.skip_font,
            Step::ContainerUtility => options.skip_container,
        }
    }

    pub async fn run<P: Prompt, R: CommandRunner>(self, ctx: &StepContext<'_, P, R>) -> Result<StepOutcome> {
        let logger = ctx.logger.with_tag(self.name());

        match self {
            Step::ValidateProject => validate::ensure_nextjs_project(ctx.root(), &logger).await,
            Step::Prettier => prettier::setup_prettier(ctx, &logger).await,
            Step::Eslint => eslint::setup_eslint(ctx, &logger).await,
            Step::HomePage => home_page::update_home_page(ctx, &logger).await,
            Step::AssetCleanup => assets::clean_public_assets(ctx, &logger).await,
            Step::FontSwap => font::swap_font(ctx, &logger).await,
            Step::ContainerUtility => container::add_container_utility(ctx.root(), &logger).await,
        }
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Asks `question`, logging a skip message when declined.
pub(crate) fn confirm<P: Prompt>(prompt: &P, question: &str, logger: &Logger) -> Result<bool> {
    let confirmed = prompt.confirm(question)?;

    if !confirmed {
        logger.info("Skipped by user");
    }

    Ok(confirmed)
}

/// Installs whichever of `packages` the manifest does not list yet, as dev dependencies.
pub(crate) async fn install_missing<P, R: CommandRunner>(ctx: &StepContext<'_, P, R>, pm: PackageManager, packages: &[&str], logger: &Logger) -> Result<()> {
    let manifest = manifest::load(ctx.root()).await?;

    let missing: Vec<&str> = packages.iter()
        .copied()
        .filter(|p| !has_package(&manifest, p))
        .collect();

    if missing.is_empty() {
        logger.info(format!("{} already installed", packages.join(", ")));
        return Ok(())
    }

    logger.info(format!("Installing {} with {pm}", missing.join(", ")));
    ctx.runner.run(ctx.root(), pm.program(), &pm.add_dev_args(&missing)).await?;
    logger.success(format!("Installed {}", missing.join(", ")));

    Ok(())
}

/// Runs a package.json script; a failing script only warns.
pub(crate) async fn run_script<P, R: CommandRunner>(ctx: &StepContext<'_, P, R>, pm: PackageManager, script: &str, logger: &Logger) -> Result<StepOutcome> {
    logger.info(format!("Running \"{script}\""));

    match ctx.runner.run(ctx.root(), pm.program(), &pm.run_script_args(script)).await {
        Ok(()) => Ok(StepOutcome::Applied),
        Err(e) if !e.is_critical() => {
            logger.warn(format!("{e}, run it manually once the issues are fixed"));
            Ok(StepOutcome::Warning(e.to_string()))
        },
        Err(e) => Err(e),
    }
}
