use std::{fmt::Display, path::Path, process::Stdio};

use tokio::process::Command;

use crate::error::{ErrorKind, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

/// Lockfiles in the order they are checked.
const LOCKFILES: [(&str, PackageManager); 5] = [
    ("bun.lockb", PackageManager::Bun),
    ("bun.lock", PackageManager::Bun),
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("package-lock.json", PackageManager::Npm),
];

impl PackageManager {
    /// Picks the package manager whose lockfile is present in `root`, npm otherwise.
    pub async fn detect(root: &Path) -> Self {
        for (lockfile, pm) in LOCKFILES {
            if tokio::fs::try_exists(root.join(lockfile)).await.unwrap_or(false) {
                return pm
            }
        }

        PackageManager::Npm
    }

    pub fn program(self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
        }
    }

    /// Arguments installing `packages` as dev dependencies.
    pub fn add_dev_args(self, packages: &[&str]) -> Vec<String> {
        let action = match self {
            PackageManager::Npm => "install",
            _ => "add",
        };

        [action, "-D"].into_iter()
            .chain(packages.iter().copied())
            .map(String::from)
            .collect()
    }

    pub fn run_script_args(self, script: &str) -> Vec<String> {
        vec!["run".to_string(), script.to_string()]
    }
}

impl Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.program())
    }
}

/// Runs an external program to completion inside a project directory.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&self, cwd: &Path, program: &str, args: &[String]) -> Result<()>;
}

/// Spawns the program with the terminal's stdio so its output stays visible.
pub struct InheritedStdio;

impl CommandRunner for InheritedStdio {
    async fn run(&self, cwd: &Path, program: &str, args: &[String]) -> Result<()> {
        let command = command_line(program, args);

        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| ErrorKind::ExternalTool { command: command.clone(), reason: e.to_string() })?;

        if !status.success() {
            return Err(ErrorKind::ExternalTool { command, reason: status.to_string() })
        }

        Ok(())
    }
}

pub fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
