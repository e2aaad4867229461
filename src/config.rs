use std::path::PathBuf;

use crate::{error::{ErrorKind, Result}, CliOpts};

/// Resolved run configuration, built from the command line.
#[derive(Clone, Debug, Default)]
pub struct SetupOptions {
    pub root: PathBuf,
    pub prettier_config: Option<PathBuf>,
    pub skip_prettier: bool,
    pub skip_eslint: bool,
    pub skip_home_page: bool,
    pub skip_assets: bool,
    pub skip_font: bool,
    pub skip_container: bool,
}

impl SetupOptions {
    pub fn from_cli(opts: &CliOpts) -> Result<Self> {
        let root = std::path::absolute(&opts.path).map_err(ErrorKind::io(&opts.path))?;

        let prettier_config = match &opts.prettier_config {
            Some(path) if path.is_file() => Some(std::path::absolute(path).map_err(ErrorKind::io(path))?),
            Some(path) => return Err(ErrorKind::Validation(format!("custom prettier config not found: {}", path.display()))),
            None => None,
        };

        Ok(Self {
            root,
            prettier_config,
            skip_prettier: opts.skip_prettier,
            skip_eslint: opts.skip_eslint,
            skip_home_page: opts.skip_home_page,
            skip_assets: opts.skip_assets,
            skip_font: opts.skip_font,
            skip_container: opts.skip_container,
        })
    }
}
