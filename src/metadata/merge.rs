use std::{fmt::Display, path::Path};

use serde_json::Value;

use crate::{error::Result, logger::Logger};

use super::manifest::{self, Collection, Manifest};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MergeResult {
    Added,
    AlreadyCorrect,
    /// The key holds a value the tool did not write. Carries that value.
    SkippedDivergent { current: String },
}

impl Display for MergeResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeResult::Added => f.write_str("added"),
            MergeResult::AlreadyCorrect => f.write_str("already correct"),
            MergeResult::SkippedDivergent { current } => write!(f, "kept existing value {current}"),
        }
    }
}

/// Sets `collection[key] = desired` unless the key already holds something.
///
/// An existing different value is never replaced; it is reported back as
/// [`MergeResult::SkippedDivergent`] with the manifest returned unchanged.
pub fn merge_field(manifest: Manifest, collection: Collection, key: &str, desired: &str) -> (Manifest, MergeResult) {
    match manifest.field(collection, key).cloned() {
        None => (manifest.with_field(collection, key, desired), MergeResult::Added),
        Some(Value::String(s)) if s == desired => (manifest, MergeResult::AlreadyCorrect),
        Some(Value::String(current)) => (manifest, MergeResult::SkippedDivergent { current }),
        Some(other) => (manifest, MergeResult::SkippedDivergent { current: other.to_string() }),
    }
}

/// Load, merge a script entry, save when something was added.
pub async fn merge_script(root: &Path, name: &str, command: &str, logger: &Logger) -> Result<MergeResult> {
    let manifest = manifest::load(root).await?;

    let (manifest, result) = merge_field(manifest, Collection::Scripts, name, command);
    logger.debug(format!("script \"{name}\": {result}"));

    match &result {
        MergeResult::Added => {
            manifest::save(root, &manifest).await?;
            logger.success(format!("Added \"{name}\" script: {command}"));
        },
        MergeResult::AlreadyCorrect => logger.info(format!("\"{name}\" script already set up")),
        MergeResult::SkippedDivergent { current } => {
            logger.warn(format!("\"{name}\" script already exists with a different command ({current}), leaving it as is"));
        },
    }

    Ok(result)
}
