//! Process command - extract coverages from a single policy document.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use policy_core::extraction::{AddonCoverageParser, CoverageParser, ExtractionResult};
use policy_core::models::config::PolicyConfig;
use policy_core::models::report::PolicyReport;
use policy_core::pdf::{PdfExtractor, PdfProcessor, TextBackend};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show processing time and warnings
    #[arg(long)]
    show_timing: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per field
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Reading document...");
    pb.set_position(10);
    let text = load_text(&args.input, &config)?;

    pb.set_message("Extracting coverages...");
    pb.set_position(60);
    let result = parse_text(&text, &config);

    pb.finish_with_message("Done");

    let output = format_report(&result.report, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_timing {
        println!();
        println!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            result.processing_time_ms
        );
        if !result.warnings.is_empty() {
            eprintln!("{}", style("Extraction warnings:").yellow());
            for warning in &result.warnings {
                eprintln!("  - {}", warning);
            }
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Load the config file if one was given, otherwise defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PolicyConfig> {
    Ok(match config_path {
        Some(path) => PolicyConfig::from_file(Path::new(path))?,
        None => PolicyConfig::default(),
    })
}

/// Read document text from a PDF or plain text file.
pub fn load_text(path: &Path, config: &PolicyConfig) -> anyhow::Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let text = match extension.as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            let mut extractor = PdfExtractor::with_config(config.pdf.clone());
            extractor.load(&data)?;
            debug!("PDF has {} pages", extractor.page_count());

            let (text, backend) = extractor.extract_text_with_backend()?;
            if backend == TextBackend::Lopdf {
                warn!("Using lopdf text for {}", path.display());
            }
            text
        }
        "txt" => fs::read_to_string(path)?,
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    };

    if text.trim().is_empty() {
        anyhow::bail!("No text could be extracted from {}", path.display());
    }

    Ok(text)
}

/// Run the coverage parser configured from `config`.
pub fn parse_text(text: &str, config: &PolicyConfig) -> ExtractionResult {
    AddonCoverageParser::from_config(&config.extraction).parse(text)
}

pub fn format_report(report: &PolicyReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => format_csv(report),
        OutputFormat::Text => Ok(format_text(report)),
    }
}

fn format_csv(report: &PolicyReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    for row in report.rows() {
        wtr.serialize(row)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(report: &PolicyReport) -> String {
    let mut output = String::new();

    let present: Vec<&str> = report
        .addon_covers
        .iter()
        .filter(|(_, presence)| presence.is_yes())
        .map(|(name, _)| name.as_str())
        .collect();

    output.push_str("Addon covers:\n");
    if present.is_empty() {
        output.push_str("  (none)\n");
    }
    for name in &present {
        output.push_str(&format!("  {}\n", name));
    }
    output.push('\n');

    output.push_str("Addon coverages:\n");
    for (category, result) in &report.addon_coverages {
        if !result.is_detected() {
            output.push_str(&format!("  {}: not found\n", category));
            continue;
        }

        for (index, record) in result.records().iter().enumerate() {
            output.push_str(&format!("  {} #{}\n", category, index + 1));
            for (field, value) in record.iter().filter(|(_, v)| !v.is_empty()) {
                output.push_str(&format!("    {}: {}\n", field, value));
            }
        }
    }

    if !report.endorsements.is_empty() {
        output.push_str(&format!("\nEndorsements: {}\n", report.endorsements.join(", ")));
    }

    if !report.special_conditions.is_empty() {
        output.push_str("\nSpecial conditions:\n");
        for condition in &report.special_conditions {
            output.push_str(&format!("  {}\n", condition));
        }
    }

    output
}
