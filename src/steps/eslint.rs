use std::path::PathBuf;

use crate::{
    error::{ErrorKind, Result},
    files::{find_file, try_delete},
    logger::Logger,
    metadata::merge::merge_script,
    package_manager::{CommandRunner, PackageManager},
    prompt::Prompt,
};

use super::{confirm, install_missing, run_script, StepContext, StepOutcome};

const BUNDLED_CONFIG: &str = include_str!("../../templates/eslint.config.mjs");

// https://github.com/antfu/eslint-config#nextjs
const REQUIRED_PACKAGES: [&str; 3] = ["eslint", "@antfu/eslint-config", "@next/eslint-plugin-next"];

/// create-next-app writes the mjs flavour, so it is probed first and used when none exists.
const CONFIG_FILES: [&str; 6] = [
    "eslint.config.mjs",
    "eslint.config.js",
    "eslint.config.cjs",
    "eslint.config.ts",
    "eslint.config.mts",
    "eslint.config.cts",
];

const LINT_FIX_SCRIPT: (&str, &str) = ("lint:fix", "eslint --fix");

pub async fn setup_eslint<P: Prompt, R: CommandRunner>(ctx: &StepContext<'_, P, R>, logger: &Logger) -> Result<StepOutcome> {
    if !confirm(ctx.prompt, "Set up ESLint?", logger)? {
        return Ok(StepOutcome::Skipped)
    }

    let pm = PackageManager::detect(ctx.root()).await;

    install_missing(ctx, pm, &REQUIRED_PACKAGES, logger).await?;

    write_config(ctx, logger).await?;

    let (name, command) = LINT_FIX_SCRIPT;
    merge_script(ctx.root(), name, command, logger).await?;

    run_script(ctx, pm, name, logger).await
}

async fn write_config<P: Prompt, R>(ctx: &StepContext<'_, P, R>, logger: &Logger) -> Result<()> {
    let target = ctx.root().join(CONFIG_FILES[0]);
    let existing = find_file(ctx.root(), &CONFIG_FILES, "ESLint config", logger).await;

    let replaced: Option<PathBuf> = match existing {
        Some(path) => {
            let current = tokio::fs::read_to_string(&path).await.map_err(ErrorKind::io(&path))?;

            if current == BUNDLED_CONFIG {
                logger.info("ESLint config already set up");
                return Ok(())
            }

            let file_name = path.file_name().map(|f| f.to_string_lossy().into_owned()).unwrap_or_default();
            if !ctx.prompt.confirm(&format!("Replace existing {file_name}?"))? {
                logger.info(format!("Keeping existing {file_name}"));
                return Ok(())
            }

            Some(path)
        },
        None => None,
    };

    // the bundled config is ESM, so it always lands in the .mjs file
    tokio::fs::write(&target, BUNDLED_CONFIG).await.map_err(ErrorKind::io(&target))?;
    logger.success(format!("Wrote {}", target.display()));

    if let Some(old) = replaced.filter(|p| *p != target) {
        try_delete(&old).await?;
        logger.info(format!("Removed {}", old.display()));
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
    async fn sets_up_eslint_in_a_fresh_project() {
        let dir = next_project();
        std::fs::write(dir.path().join("yarn.lock"), "").unwrap();
        let opts = options(dir.path());
        let runner = RecordingRunner::default();
        let ctx = StepContext { options: &opts, logger: &Logger::default(), prompt: &Answers::always(true), runner: &runner };

        assert_eq!(setup_eslint(&ctx, ctx.logger).await.unwrap(), StepOutcome::Applied);

        assert_eq!(runner.commands(), [
            "yarn add -D eslint @antfu/eslint-config @next/eslint-plugin-next",
            "yarn run lint:fix",
        ]);
        assert_eq!(std::fs::read_to_string(dir.path().join("eslint.config.mjs")).unwrap(), BUNDLED_CONFIG);
        assert_eq!(manifest::load(dir.path()).await.unwrap().script("lint:fix"), Some("eslint --fix"));
    }

    #[tokio::test]
    async fn installs_only_missing_packages() {
        let dir = next_project();
        std::fs::write(dir.path().join("package.json"), r#"{"dependencies":{"next":"15"},"devDependencies":{"eslint":"^9"}}"#).unwrap();
        let opts = options(dir.path());
        let runner = RecordingRunner::default();
        let ctx = StepContext { options: &opts, logger: &Logger::default(), prompt: &Answers::always(true), runner: &runner };

        setup_eslint(&ctx, ctx.logger).await.unwrap();

        assert_eq!(runner.commands()[0], "npm install -D @antfu/eslint-config @next/eslint-plugin-next");
    }

    #[tokio::test]
    async fn replaces_existing_config_only_when_confirmed() {
        let dir = next_project();
        std::fs::write(dir.path().join("eslint.config.js"), "export default []\n").unwrap();
        let opts = options(dir.path());
        let runner = RecordingRunner::default();

        let declined = Answers::scripted(&[true, false], true);
        let ctx = StepContext { options: &opts, logger: &Logger::default(), prompt: &declined, runner: &runner };
        setup_eslint(&ctx, ctx.logger).await.unwrap();
        assert_eq!(std::fs::read_to_string(dir.path().join("eslint.config.js")).unwrap(), "export default []\n");
        assert_eq!(declined.asked.borrow()[1], "Replace existing eslint.config.js?");

        let accepted = Answers::always(true);
        let ctx = StepContext { options: &opts, logger: &Logger::default(), prompt: &accepted, runner: &runner };
        setup_eslint(&ctx, ctx.logger).await.unwrap();
        assert_eq!(std::fs::read_to_string(dir.path().join("eslint.config.mjs")).unwrap(), BUNDLED_CONFIG);
        assert!(!dir.path().join("eslint.config.js").exists());
    }

    #[tokio::test]
    async fn replacing_commonjs_config_writes_an_mjs_file() {
        let dir = next_project();
        std::fs::write(dir.path().join("eslint.config.cjs"), "module.exports = []\n").unwrap();
        let opts = options(dir.path());
        let runner = RecordingRunner::default();
        let ctx = StepContext { options: &opts, logger: &Logger::default(), prompt: &Answers::always(true), runner: &runner };

        setup_eslint(&ctx, ctx.logger).await.unwrap();

        assert!(!dir.path().join("eslint.config.cjs").exists());
        assert_eq!(std::fs::read_to_string(dir.path().join("eslint.config.mjs")).unwrap(), BUNDLED_CONFIG);

        let prompt = Answers::always(true);
        let ctx = StepContext { options: &opts, logger: &Logger::default(), prompt: &prompt, runner: &runner };
        setup_eslint(&ctx, ctx.logger).await.unwrap();
        assert_eq!(prompt.asked.borrow().len(), 1);
    }

    #[tokio::test]
    async fn bundled_config_is_not_asked_about_again() {
        let dir = next_project();
        std::fs::write(dir.path().join("eslint.config.mjs"), BUNDLED_CONFIG).unwrap();
        let opts = options(dir.path());
        let runner = RecordingRunner::default();
        let prompt = Answers::always(true);
        let ctx = StepContext { options: &opts, logger: &Logger::default(), prompt: &prompt, runner: &runner };

        setup_eslint(&ctx, ctx.logger).await.unwrap();

        assert_eq!(prompt.asked.borrow().len(), 1);
    }

    #[tokio::test]
    async fn lint_failures_are_warnings() {
        let dir = next_project();
        let opts = options(dir.path());
        let runner = RecordingRunner::failing(&["npm run lint:fix"]);
        let ctx = StepContext { options: &opts, logger: &Logger::default(), prompt: &Answers::always(true), runner: &runner };

        assert!(matches!(setup_eslint(&ctx, ctx.logger).await.unwrap(), StepOutcome::Warning(_)));
    }
}
