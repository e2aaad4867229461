use std::path::{Path, PathBuf};

use tokio::{fs::OpenOptions, io::AsyncWriteExt};

use crate::{error::{ErrorKind, Result}, logger::Logger};

/// Returns the first of `candidates` (relative to `root`) that exists.
///
/// Probing errors other than "not found" are logged and the candidate is
/// skipped.
pub async fn find_file(root: &Path, candidates: &[&str], description: &str, logger: &Logger) -> Option<PathBuf> {
    for candidate in candidates {
        let path = root.join(candidate);

        match tokio::fs::try_exists(&path).await {
            Ok(true) => {
                logger.debug(format!("found {description} at {candidate}"));
                return Some(path)
            },
            Ok(false) => (),
            Err(e) => logger.error(format!("unable to access {candidate}: {e}")),
        }
    }

    logger.warn(format!("could not find {description} ({})", candidates.join(", ")));

    None
}

/// Writes `contents` to `path` unless it already exists. Returns whether the file was created.
pub async fn write_new(path: &Path, contents: &[u8]) -> Result<bool> {
    create_dirs(path).await?;

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path).await {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(ErrorKind::io(path)(e)),
    };

    file.write_all(contents).await.map_err(ErrorKind::io(path))?;
    file.flush().await.map_err(ErrorKind::io(path))?;

    Ok(true)
}

/// Removes `path`. Returns `false` when there was nothing to remove.
pub async fn try_delete(path: &Path) -> Result<bool> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(ErrorKind::io(path)(e)),
    }
}

pub async fn create_dirs<P: AsRef<Path>>(path: P) -> Result<()> {
    if let Some(parent_dir) = path.as_ref().parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            tokio::fs::create_dir_all(parent_dir).await.map_err(ErrorKind::io(parent_dir))?;
        }
    }

    Ok(())
}
