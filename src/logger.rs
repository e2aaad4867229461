use std::fmt::Display;

use console::{style, StyledObject};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Level {
    Debug,
    Info,
    Success,
    Warn,
    Error,
}

impl Level {
    fn label(self) -> StyledObject<&'static str> {
        match self {
            Level::Debug => style("debug").dim(),
            Level::Info => style("info").cyan(),
            Level::Success => style("ok").green().bold(),
            Level::Warn => style("warn").yellow().bold(),
            Level::Error => style("error").red().bold(),
        }
    }
}

/// Timestamped console logger. Built once in `main` and handed down; steps
/// derive a tagged copy with [`Logger::with_tag`].
#[derive(Clone, Debug, Default)]
pub struct Logger {
    tag: Option<&'static str>,
    verbose: bool,
}

impl Logger {
    pub fn new(verbose: bool) -> Self {
        Self { tag: None, verbose }
    }

    pub fn with_tag(&self, tag: &'static str) -> Self {
        Self { tag: Some(tag), verbose: self.verbose }
    }

    pub fn debug<M: Display>(&self, msg: M) {
        if self.verbose {
            println!("{}", self.line(Level::Debug, msg));
        }
    }

    pub fn info<M: Display>(&self, msg: M) {
        println!("{}", self.line(Level::Info, msg));
    }

    pub fn success<M: Display>(&self, msg: M) {
        println!("{}", self.line(Level::Success, msg));
    }

    pub fn warn<M: Display>(&self, msg: M) {
        eprintln!("{}", self.line(Level::Warn, msg));
    }

    pub fn error<M: Display>(&self, msg: M) {
        eprintln!("{}", self.line(Level::Error, msg));
    }

    fn line<M: Display>(&self, level: Level, msg: M) -> String {
        match self.tag {
            Some(tag) => format!("{} {} {} {msg}", now(), level.label(), style(format!("[{tag}]")).dim()),
            None => format!("{} {} {msg}", now(), level.label()),
        }
    }
}

fn now() -> String {
    chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
