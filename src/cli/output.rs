use crate::{ComparisonResult, EditCounts, EditOp};
use colored::*;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    tag: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<String>,
    complete: bool,
    #[serde(flatten)]
    result: &'a ComparisonResult,
}

pub fn print_result(
    tag: &str,
    result: &ComparisonResult,
    report: Option<&Path>,
    colored_output: bool,
    format: &OutputFormat,
) {
    match format {
        OutputFormat::Text => print_text_result(tag, result, report, colored_output),
        OutputFormat::Json => print_json_result(tag, result, report),
    }
}

fn print_text_result(tag: &str, result: &ComparisonResult, report: Option<&Path>, colored_output: bool) {
    if colored_output {
        println!("{} wer: {}", tag.bold(), result.wer.to_string().cyan().bold());
        println!("  {}", format_counts(&result.counts, colored_output));
    } else {
        println!("{} wer: {}", tag, result.wer);
        println!("  {}", format_counts(&result.counts, colored_output));
    }

    if let Some(path) = report {
        if colored_output {
            println!("Printed comparison to: {}", path.display().to_string().underline());
        } else {
            println!("Printed comparison to: {}", path.display());
        }
    }
}

fn print_json_result(tag: &str, result: &ComparisonResult, report: Option<&Path>) {
    let output = JsonOutput {
        tag,
        report: report.map(|p| p.display().to_string()),
        complete: result.inconsistency.is_none(),
        result,
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: failed to serialize result: {}", e),
    }
}

fn format_counts(counts: &EditCounts, colored: bool) -> String {
    let parts = [
        (counts.substitutions, "substituted"),
        (counts.deletions, "deleted"),
        (counts.insertions, "inserted"),
    ];

    let text = parts
        .iter()
        .map(|(n, label)| format!("{} {}", n, label))
        .collect::<Vec<_>>()
        .join(", ");

    if colored {
        text.dimmed().to_string()
    } else {
        text
    }
}

/// Print the alignment as one line, color-coded like the HTML report.
pub fn print_alignment(result: &ComparisonResult, colored_output: bool) {
    let line = result
        .tokens
        .iter()
        .map(|token| {
            let hyp = token.hypothesis_word().unwrap_or_default();
            let reference = token.reference_word().unwrap_or_default();
            match (token.op, colored_output) {
                (EditOp::Match, _) => hyp.to_string(),
                (EditOp::Substitution, true) => format!("{}({})", hyp, reference).yellow().to_string(),
                (EditOp::Substitution, false) => format!("~{}({})", hyp, reference),
                (EditOp::Deletion, true) => reference.red().strikethrough().to_string(),
                (EditOp::Deletion, false) => format!("-{}", reference),
                (EditOp::Insertion, true) => hyp.green().to_string(),
                (EditOp::Insertion, false) => format!("+{}", hyp),
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    println!("{}", line);
}

pub fn print_warning(message: &str, colored: bool) {
    if colored {
        eprintln!("{} {}", "Warning:".yellow().bold(), message);
    } else {
        eprintln!("Warning: {}", message);
    }
}

pub fn print_threshold_exceeded(wer: f64, max_wer: f64, colored: bool) {
    if colored {
        eprintln!(
            "{} wer {} exceeds maximum {}",
            "✗".red().bold(),
            wer.to_string().red().bold(),
            max_wer
        );
    } else {
        eprintln!("✗ wer {} exceeds maximum {}", wer, max_wer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_format_counts_plain() {
        let counts = EditCounts {
            matches: 4,
            substitutions: 1,
            deletions: 2,
            insertions: 0,
        };
        assert_eq!(
            format_counts(&counts, false),
            "1 substituted, 2 deleted, 0 inserted"
        );
    }

    #[test]
    fn test_json_output_flattens_result() {
        let result = crate::compare(&["a"], &["b"]).unwrap();
        let output = JsonOutput {
            tag: "x",
            report: None,
            complete: true,
            result: &result,
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["tag"], "x");
        assert_eq!(json["wer"], 100.0);
        assert_eq!(json["counts"]["substitutions"], 1);
        assert!(json.get("report").is_none());
    }
}
