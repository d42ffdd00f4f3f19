use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io;
use std::path::{Path, PathBuf};
use werdiff::cli::output::{self, OutputFormat};
use werdiff::cli::html;
use werdiff::config::ConfigLayer;
use werdiff::text::{TextLoader, TextOptions};
use werdiff::{compare, Config};

#[derive(Parser, Debug)]
#[command(name = "werdiff")]
#[command(version, about = "Word error rate with a color-coded HTML alignment", long_about = None)]
struct Cli {
    /// Reference (ground truth) transcript
    #[arg(value_name = "REFERENCE", required_unless_present = "completion")]
    reference: Option<PathBuf>,

    /// Hypothesis (candidate) transcript
    #[arg(value_name = "HYPOTHESIS", required_unless_present = "completion")]
    hypothesis: Option<PathBuf>,

    /// Tag used in the status line and report file name, without path separators
    /// (defaults to the hypothesis file stem)
    #[arg(short, long)]
    tag: Option<String>,

    /// Lowercase and strip punctuation before comparing
    #[arg(short = 'p', long, overrides_with = "no_strip_punctuation")]
    strip_punctuation: bool,

    /// Keep case and punctuation, even if a config file strips them
    #[arg(long, overrides_with = "strip_punctuation")]
    no_strip_punctuation: bool,

    /// Drop filler words (uh, um, ...) before comparing
    #[arg(short = 'd', long, overrides_with = "no_drop_fillers")]
    drop_fillers: bool,

    /// Keep filler words, even if a config file drops them
    #[arg(long, overrides_with = "drop_fillers")]
    no_drop_fillers: bool,

    /// Directory the HTML report is written to
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Don't write the HTML report
    #[arg(long)]
    no_html: bool,

    /// Print the color-coded alignment to the terminal
    #[arg(long)]
    show: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Exit non-zero when WER (percent) is above this value
    #[arg(long, value_name = "PERCENT")]
    max_wer: Option<f64>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "werdiff", &mut io::stdout());
        return Ok(());
    }

    let (Some(reference_path), Some(hypothesis_path)) = (&cli.reference, &cli.hypothesis) else {
        anyhow::bail!("Both REFERENCE and HYPOTHESIS are required. Use --help for usage information.");
    };

    let config = Config::load(ConfigLayer {
        strip_punctuation: flag(cli.strip_punctuation, cli.no_strip_punctuation),
        drop_fillers: flag(cli.drop_fillers, cli.no_drop_fillers),
        output_dir: cli.output_dir.clone(),
        max_wer: cli.max_wer,
        ..Default::default()
    })?;

    let colored = !cli.no_color;
    let loader = TextLoader::new(&TextOptions::from(&config))?;
    let reference = loader.load(reference_path)?;
    let hypothesis = loader.load(hypothesis_path)?;

    let result = compare(&reference, &hypothesis)
        .with_context(|| format!("Cannot score against {}", reference_path.display()))?;

    if let Some(err) = &result.inconsistency {
        output::print_warning(&format!("{}; alignment is partial", err), colored);
    }

    let tag = cli.tag.clone().unwrap_or_else(|| default_tag(hypothesis_path));

    let report = if cli.no_html {
        None
    } else {
        Some(html::write_report(&result, &config.output_dir, &tag)?)
    };

    output::print_result(&tag, &result, report.as_deref(), colored, &cli.format);

    if cli.show && cli.format == OutputFormat::Text {
        output::print_alignment(&result, colored);
    }

    if let Some(max_wer) = config.max_wer {
        if result.wer > max_wer {
            output::print_threshold_exceeded(result.wer, max_wer, colored);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// `Some` only when one of a `--x` / `--no-x` pair was given.
fn flag(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn default_tag(hypothesis: &Path) -> String {
    hypothesis
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("hypothesis")
        .to_string()
}
