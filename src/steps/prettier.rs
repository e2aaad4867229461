use crate::{
    error::{ErrorKind, Result},
    files::write_new,
    logger::Logger,
    metadata::merge::merge_script,
    package_manager::{CommandRunner, PackageManager},
    prompt::Prompt,
};

use super::{confirm, install_missing, run_script, StepContext, StepOutcome};

const BUNDLED_CONFIG: &str = include_str!("../../templates/prettierrc.json");
const EDITOR_SETTINGS: &str = include_str!("../../templates/vscode-settings.json");

const CONFIG_FILE: &str = ".prettierrc";
const EDITOR_SETTINGS_FILE: &str = ".vscode/settings.json";
const FORMAT_SCRIPT: (&str, &str) = ("format", "prettier . --write");

pub async fn setup_prettier<P: Prompt, R: CommandRunner>(ctx: &StepContext<'_, P, R>, logger: &Logger) -> Result<StepOutcome> {
    if !confirm(ctx.prompt, "Set up Prettier?", logger)? {
        return Ok(StepOutcome::Skipped)
    }

    let pm = PackageManager::detect(ctx.root()).await;
    logger.debug(format!("using {pm}"));

    install_missing(ctx, pm, &["prettier"], logger).await?;

    write_config(ctx, logger).await?;

    let (name, command) = FORMAT_SCRIPT;
    merge_script(ctx.root(), name, command, logger).await?;

    let settings_path = ctx.root().join(EDITOR_SETTINGS_FILE);
    if write_new(&settings_path, EDITOR_SETTINGS.as_bytes()).await? {
        logger.success(format!("Created {EDITOR_SETTINGS_FILE}"));
    } else {
        logger.info(format!("{EDITOR_SETTINGS_FILE} already exists"));
    }

    run_script(ctx, pm, name, logger).await
}

async fn write_config<P, R>(ctx: &StepContext<'_, P, R>, logger: &Logger) -> Result<()> {
    let config_path = ctx.root().join(CONFIG_FILE);
    logger.debug(format!("prettier config path: {}", config_path.display()));

    let contents = match &ctx.options.prettier_config {
        Some(custom) => {
            logger.info(format!("Using custom Prettier config {}", custom.display()));
            tokio::fs::read(custom).await.map_err(ErrorKind::io(custom))?
        },
        None => BUNDLED_CONFIG.as_bytes().to_vec(),
    };

    if write_new(&config_path, &contents).await? {
        logger.success("Prettier config file created");
    } else {
        logger.info("Prettier config file already exists");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SetupOptions, metadata::manifest, steps::test_support::{next_project, Answers, RecordingRunner}};

    fn options(root: &std::path::Path) -> SetupOptions {
        SetupOptions { root: root.to_path_buf(), ..Default::default() }
    }

    #[tokio::test]
    async fn sets_up_prettier_in_a_fresh_project() {
        let dir = next_project();
        let opts = options(dir.path());
        let runner = RecordingRunner::default();
        let ctx = StepContext { options: &opts, logger: &Logger::default(), prompt: &Answers::always(true), runner: &runner };

        let outcome = setup_prettier(&ctx, ctx.logger).await.unwrap();

        assert_eq!(outcome, StepOutcome::Applied);
        assert_eq!(runner.commands(), ["npm install -D prettier", "npm run format"]);
        assert_eq!(std::fs::read_to_string(dir.path().join(".prettierrc")).unwrap(), BUNDLED_CONFIG);
        assert_eq!(std::fs::read_to_string(dir.path().join(".vscode/settings.json")).unwrap(), EDITOR_SETTINGS);
        let m = manifest::load(dir.path()).await.unwrap();
        assert_eq!(m.script("format"), Some("prettier . --write"));
        assert_eq!(m.script("dev"), Some("next dev"));
    }

    #[tokio::test]
    async fn skips_install_when_prettier_is_present_and_keeps_existing_files() {
        let dir = next_project();
        std::fs::write(dir.path().join("package.json"), r#"{"devDependencies":{"prettier":"^3"},"scripts":{"format":"prettier -w src"}}"#).unwrap();
        std::fs::write(dir.path().join(".prettierrc"), "{}").unwrap();
        std::fs::write(dir.path().join("pnpm-lock.yaml"), "").unwrap();
        let opts = options(dir.path());
        let runner = RecordingRunner::default();
        let ctx = StepContext { options: &opts, logger: &Logger::default(), prompt: &Answers::always(true), runner: &runner };

        setup_prettier(&ctx, ctx.logger).await.unwrap();

        assert_eq!(runner.commands(), ["pnpm run format"]);
        assert_eq!(std::fs::read_to_string(dir.path().join(".prettierrc")).unwrap(), "{}");
        assert_eq!(manifest::load(dir.path()).await.unwrap().script("format"), Some("prettier -w src"));
    }

    #[tokio::test]
    async fn running_twice_changes_nothing_the_second_time() {
        let dir = next_project();
        let opts = options(dir.path());
        let runner = RecordingRunner::default();
        let ctx = StepContext { options: &opts, logger: &Logger::default(), prompt: &Answers::always(true), runner: &runner };

        setup_prettier(&ctx, ctx.logger).await.unwrap();
        let manifest_after_first = std::fs::read_to_string(dir.path().join("package.json")).unwrap();
        setup_prettier(&ctx, ctx.logger).await.unwrap();

        assert_eq!(std::fs::read_to_string(dir.path().join("package.json")).unwrap(), manifest_after_first);
    }

    #[tokio::test]
    async fn uses_custom_config() {
        let dir = next_project();
        let custom = dir.path().join("my-prettier.json");
        std::fs::write(&custom, r#"{"semi":true}"#).unwrap();
        let opts = SetupOptions { prettier_config: Some(custom), ..options(dir.path()) };
        let runner = RecordingRunner::default();
        let ctx = StepContext { options: &opts, logger: &Logger::default(), prompt: &Answers::always(true), runner: &runner };

        setup_prettier(&ctx, ctx.logger).await.unwrap();

        assert_eq!(std::fs::read_to_string(dir.path().join(".prettierrc")).unwrap(), r#"{"semi":true}"#);
    }

    #[tokio::test]
    async fn declining_touches_nothing() {
        let dir = next_project();
        let opts = options(dir.path());
        let runner = RecordingRunner::default();
        let ctx = StepContext { options: &opts, logger: &Logger::default(), prompt: &Answers::always(false), runner: &runner };

        assert_eq!(setup_prettier(&ctx, ctx.logger).await.unwrap(), StepOutcome::Skipped);
        assert!(runner.commands().is_empty());
        assert!(!dir.path().join(".prettierrc").exists());
    }

    #[tokio::test]
    async fn failed_install_stops_the_step() {
        let dir = next_project();
        let opts = options(dir.path());
        let runner = RecordingRunner::failing(&["npm install"]);
        let ctx = StepContext { options: &opts, logger: &Logger::default(), prompt: &Answers::always(true), runner: &runner };

        let err = setup_prettier(&ctx, ctx.logger).await.unwrap_err();

        assert!(matches!(err, ErrorKind::ExternalTool { .. }));
        assert!(!dir.path().join(".prettierrc").exists());
    }

    #[tokio::test]
    async fn failed_format_run_is_a_warning() {
        let dir = next_project();
        let opts = options(dir.path());
        let runner = RecordingRunner::failing(&["npm run format"]);
        let ctx = StepContext { options: &opts, logger: &Logger::default(), prompt: &Answers::always(true), runner: &runner };

        let outcome = setup_prettier(&ctx, ctx.logger).await.unwrap();

        assert!(matches!(outcome, StepOutcome::Warning(msg) if msg.contains("npm run format")));
        assert!(dir.path().join(".prettierrc").exists());
    }
}
