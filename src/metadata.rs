use std::path::{Path, PathBuf};

pub mod manifest;
pub mod merge;

pub const MANIFEST_FILE: &str = "package.json";

pub fn manifest_path(root: &Path) -> PathBuf {
    root.join(MANIFEST_FILE)
}
