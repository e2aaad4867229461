use std::path::Path;

use crate::{error::{ErrorKind, Result}, logger::Logger, metadata::{manifest::{self, has_package}, manifest_path}};

use super::StepOutcome;

const NEXT_CONFIG_FILES: [&str; 4] = ["next.config.js", "next.config.mjs", "next.config.ts", "next.config.cjs"];

/// Fails unless `root` holds a package.json depending on `next` and a next.config file.
pub async fn ensure_nextjs_project(root: &Path, logger: &Logger) -> Result<StepOutcome> {
    logger.debug(format!("checking for {}", manifest_path(root).display()));

    let manifest = manifest::load(root).await?;

    let has_next = has_package(&manifest, "next");
    logger.debug(format!("'next' dependency present: {has_next}"));

    if !has_next {
        return Err(ErrorKind::Validation("this doesn't appear to be a Next.js project: missing 'next' dependency".into()))
    }

    let mut has_config = false;
    for file in NEXT_CONFIG_FILES {
        let path = root.join(file);
        if tokio::fs::try_exists(&path).await.map_err(ErrorKind::io(&path))? {
            has_config = true;
            break
        }
    }
    logger.debug(format!("next config present: {has_config}"));

    if !has_config {
        return Err(ErrorKind::Validation("this doesn't appear to be a Next.js project: missing next.config.* file".into()))
    }

    match (manifest.name(), manifest.version()) {
        (Some(name), Some(version)) => logger.success(format!("Next.js project detected: {name}@{version}")),
        (Some(name), None) => logger.success(format!("Next.js project detected: {name}")),
        _ => logger.success("Next.js project detected"),
    }

    Ok(StepOutcome::Applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::test_support::next_project;

    #[tokio::test]
    async fn accepts_next_project() {
        let dir = next_project();

        assert_eq!(ensure_nextjs_project(dir.path(), &Logger::default()).await.unwrap(), StepOutcome::Applied);
    }

    #[tokio::test]
    async fn accepts_next_as_dev_dependency_and_mjs_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), r#"{"devDependencies":{"next":"15"}}"#).unwrap();
        std::fs::write(dir.path().join("next.config.mjs"), "").unwrap();

        assert!(ensure_nextjs_project(dir.path(), &Logger::default()).await.is_ok());
    }

    #[tokio::test]
    async fn missing_manifest_is_not_found() {
        let dir = tempfile::tempdir().unwrap();

        let err = ensure_nextjs_project(dir.path(), &Logger::default()).await.unwrap_err();

        assert!(matches!(err, ErrorKind::NotFound(_)));
    }

    #[tokio::test]
    async fn rejects_project_without_next() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), r#"{"dependencies":{"react":"19"}}"#).unwrap();
        std::fs::write(dir.path().join("next.config.js"), "").unwrap();

        let err = ensure_nextjs_project(dir.path(), &Logger::default()).await.unwrap_err();

        assert!(matches!(err, ErrorKind::Validation(msg) if msg.contains("'next' dependency")));
    }

    #[tokio::test]
    async fn rejects_project_without_next_config() {
        let dir = next_project();
        std::fs::remove_file(dir.path().join("next.config.ts")).unwrap();

        let err = ensure_nextjs_project(dir.path(), &Logger::default()).await.unwrap_err();

        assert!(matches!(err, ErrorKind::Validation(msg) if msg.contains("next.config")));
    }
}
