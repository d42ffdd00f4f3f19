use crate::{AlignmentToken, ComparisonResult, EditOp};
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const STYLE: &str = ".g{background-color:#0080004d}.r{background-color:#ff00004d}.y{background-color:#ffa50099}";

/// Self-contained HTML page with the alignment in a single paragraph.
///
/// Insertions are green (`g`), deletions red (`r`), substitutions yellow (`y`)
/// and show the reference word in parentheses.
pub fn render_html(result: &ComparisonResult) -> String {
    let body = result
        .tokens
        .iter()
        .map(render_token)
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><style>{}</style></head><body><p>{}</p></body></html>\n",
        STYLE, body
    )
}

fn render_token(token: &AlignmentToken) -> String {
    let hyp = escape(token.hypothesis_word().unwrap_or_default());
    let reference = escape(token.reference_word().unwrap_or_default());

    match token.op {
        EditOp::Match => hyp,
        EditOp::Substitution => format!("<span class=\"y\">{}({})</span>", hyp, reference),
        EditOp::Deletion => format!("<span class=\"r\">{}</span>", reference),
        EditOp::Insertion => format!("<span class=\"g\">{}</span>", hyp),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn report_path(dir: &Path, tag: &str) -> PathBuf {
    dir.join(format!("comparison_{}.html", tag))
}

/// The tag becomes part of a file name, so it must not escape `dir`.
pub fn validate_tag(tag: &str) -> Result<()> {
    if tag.is_empty() || tag.contains(['/', '\\']) || tag == "." || tag == ".." {
        bail!("Invalid tag '{}': must be a plain file name component", tag);
    }
    Ok(())
}

/// Write the HTML report for `result` under `dir` and return its path.
pub fn write_report(result: &ComparisonResult, dir: &Path, tag: &str) -> Result<PathBuf> {
    validate_tag(tag)?;
    let path = report_path(dir, tag);
    fs::write(&path, render_html(result))
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(path)
}
