use crate::{error::{ErrorKind, Result}, files::find_file, logger::Logger, prompt::Prompt};

use super::{confirm, container::STYLESHEET_CANDIDATES, StepContext, StepOutcome};

const LAYOUT_CANDIDATES: [&str; 2] = ["src/app/layout.tsx", "app/layout.tsx"];

const FONT_MODULE: &str = "next/font/google";

const MONO_VARIABLE: &str = "--font-geist-mono";

const REFERENCE_SWAPS: [(&str, &str); 5] = [
    ("${geistSans.variable} ${geistMono.variable}", "${inter.variable}"),
    ("geistSans.variable", "inter.variable"),
    ("geistMono.variable", "inter.variable"),
    ("geistSans.className", "inter.className"),
    ("geistMono.className", "inter.className"),
];

#[derive(Debug, PartialEq, Eq)]
enum LayoutSwap {
    AlreadyInter,
    NotGeist,
    Rewritten(String),
}

/// Swaps the Geist fonts of a create-next-app root layout for Inter.
pub async fn swap_font<P: Prompt, R>(ctx: &StepContext<'_, P, R>, logger: &Logger) -> Result<StepOutcome> {
    let Some(layout_path) = find_file(ctx.root(), &LAYOUT_CANDIDATES, "root layout", logger).await else {
        return Ok(StepOutcome::Warning("root layout not found".into()))
    };

    let layout = tokio::fs::read_to_string(&layout_path).await.map_err(ErrorKind::io(&layout_path))?;

    let rewritten = match swap_layout_font(&layout) {
        LayoutSwap::AlreadyInter => {
            logger.info("Layout already uses Inter");
            return Ok(StepOutcome::Skipped)
        },
        LayoutSwap::NotGeist => {
            logger.warn("Layout does not load Geist from next/font/google, swap the font manually");
            return Ok(StepOutcome::Warning("unrecognized layout font setup".into()))
        },
        LayoutSwap::Rewritten(v) => v,
    };

    if !confirm(ctx.prompt, "Replace the Geist font with Inter?", logger)? {
        return Ok(StepOutcome::Skipped)
    }

    tokio::fs::write(&layout_path, rewritten).await.map_err(ErrorKind::io(&layout_path))?;
    logger.success(format!("Switched {} to Inter", layout_path.display()));

    if let Some(css_path) = find_file(ctx.root(), &STYLESHEET_CANDIDATES, "globals.css", logger).await {
        let css = tokio::fs::read_to_string(&css_path).await.map_err(ErrorKind::io(&css_path))?;

        if let Some(updated) = swap_css_variable(&css) {
            tokio::fs::write(&css_path, updated).await.map_err(ErrorKind::io(&css_path))?;
            logger.success(format!("Pointed {} at --font-inter", css_path.display()));
        }
    }

    Ok(StepOutcome::Applied)
}

fn is_font_import(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with("import") && line.contains(FONT_MODULE)
}

fn is_geist_declaration(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with("const ") && (line.contains("= Geist(") || line.contains("= Geist_Mono("))
}

/// Net count of opened `(`, `{` and `[` on a line.
fn bracket_depth(line: &str) -> i32 {
    line.chars().fold(0, |depth, c| match c {
        '(' | '{' | '[' => depth + 1,
        ')' | '}' | ']' => depth - 1,
        _ => depth,
    })
}

/// Inter declaration in the quote and semicolon style of the file it goes into.
fn inter_declaration(quote: char, semi: &str) -> String {
    format!("const inter = Inter({{\n  variable: {quote}--font-inter{quote},\n  subsets: [{quote}latin{quote}],\n}}){semi}")
}

fn swap_layout_font(source: &str) -> LayoutSwap {
    let imports: Vec<&str> = source.lines().filter(|l| is_font_import(l)).collect();

    let Some(geist_import) = imports.iter().find(|l| l.contains("Geist")) else {
        if imports.iter().any(|l| l.contains("Inter")) {
            return LayoutSwap::AlreadyInter
        }

        return LayoutSwap::NotGeist
    };

    let quote = if geist_import.contains('\'') { '\'' } else { '"' };
    let semi = if geist_import.trim_end().ends_with(';') { ";" } else { "" };

    let mut out: Vec<String> = Vec::new();
    let mut depth = 0;
    let mut declared = false;
    let mut drop_blank = false;

    for line in source.lines() {
        if depth > 0 {
            depth += bracket_depth(line);
            continue
        }

        if drop_blank {
            drop_blank = false;
            if line.trim().is_empty() {
                continue
            }
        }

        if is_font_import(line) && line.contains("Geist") {
            out.push(format!("import {{ Inter }} from {quote}{FONT_MODULE}{quote}{semi}"));
            continue
        }

        if is_geist_declaration(line) {
            depth = bracket_depth(line);

            if declared {
                drop_blank = true;
            } else {
                out.extend(inter_declaration(quote, semi).lines().map(String::from));
                declared = true;
            }
            continue
        }

        let swapped = REFERENCE_SWAPS.iter()
            .fold(line.to_string(), |acc, (from, to)| acc.replace(from, to));
        out.push(swapped);
    }

    // an unterminated declaration means the layout is not what we think it is
    if depth > 0 {
        return LayoutSwap::NotGeist
    }

    let mut rewritten = out.join("\n");
    if source.ends_with('\n') {
        rewritten.push('\n');
    }

    LayoutSwap::Rewritten(rewritten)
}

/// Points the sans font at Inter and drops references to the removed Geist Mono
/// variable so Tailwind falls back to its default monospace stack.
fn swap_css_variable(css: &str) -> Option<String> {
    if !css.contains("--font-geist-sans") && !css.contains(MONO_VARIABLE) {
        return None
    }

    let mut updated = css.lines()
        .filter(|l| !l.contains(MONO_VARIABLE))
        .map(|l| l.replace("--font-geist-sans", "--font-inter"))
        .collect::<Vec<_>>()
        .join("\n");

    if css.ends_with('\n') {
        updated.push('\n');
    }

    Some(updated)
}
