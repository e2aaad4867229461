use console::{style, Term};

use crate::error::{ErrorKind, Result};

/// Yes/no confirmation used to gate optional or destructive edits.
pub trait Prompt {
    fn confirm(&self, question: &str) -> Result<bool>;
}

/// Asks on the terminal. An empty answer counts as yes.
#[derive(Debug)]
pub struct TermPrompt {
    term: Term,
}

impl TermPrompt {
    pub fn new() -> Self {
        Self { term: Term::stderr() }
    }
}

impl Default for TermPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for TermPrompt {
    fn confirm(&self, question: &str) -> Result<bool> {
        loop {
            self.term.write_str(&format!("{} {question} {} ", style("?").cyan().bold(), style("(Y/n)").dim())).map_err(ErrorKind::Terminal)?;

            let answer = if self.term.is_term() {
                self.term.read_line().map_err(ErrorKind::Terminal)?
            } else {
                let mut line = String::new();
                std::io::stdin().read_line(&mut line).map_err(ErrorKind::Terminal)?;
                line
            };

            match parse_answer(&answer) {
                Some(v) => return Ok(v),
                None => self.term.write_line(&format!("{}", style("please answer y or n").yellow())).map_err(ErrorKind::Terminal)?,
            }
        }
    }
}

/// Answers yes to everything (`--yes`).
pub struct AssumeYes;

impl Prompt for AssumeYes {
    fn confirm(&self, _question: &str) -> Result<bool> {
        Ok(true)
    }
}

fn parse_answer(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "" | "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
