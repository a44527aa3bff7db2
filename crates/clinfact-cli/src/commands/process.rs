//! Process command - extract billable events from a single document.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use clinfact_core::models::config::ExportConfig;
use clinfact_core::source::DocumentLoader;
use clinfact_core::{ExtractionEngine, ExtractionReport};

use crate::render;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (txt, PDF or image)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Skip OCR and use only text layers
    #[arg(long)]
    text_only: bool,

    /// Also write the combined CSV export into this directory
    #[arg(long, value_name = "DIR")]
    export: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Combined CSV of every table
    Csv,
    /// Plain text review
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::config::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Loading document...");
    let mut loader = DocumentLoader::new(&config);
    if args.text_only {
        loader = loader.without_ocr();
    }
    let document = loader.load(&args.input)?;
    debug!("Loaded {} as {}", document.describe(), document.kind.as_str());

    pb.set_message("Extracting records...");
    let engine = ExtractionEngine::from_config(&config.extraction);
    let report = engine.extract_document(&document);

    pb.finish_and_clear();

    print_warnings(&report);

    let output = render::format_report(&report, args.format, &config.export)?;

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

    if let Some(dir) = &args.export {
        let path = export_csv(dir, [(None, &report)], &config.export)?;
        println!("{} Export written to {}", style("✓").green(), path.display());
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn print_warnings(report: &ExtractionReport) {
    if report.metadata.warnings.is_empty() {
        return;
    }
    eprintln!("{}", style("Warnings:").yellow());
    for warning in &report.metadata.warnings {
        eprintln!("  - {}", warning);
    }
}

/// Default export file name, e.g. `facturacion_20240101_101500.csv`.
pub fn export_file_name(export: &ExportConfig) -> String {
    format!(
        "{}_{}.csv",
        export.file_prefix,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    )
}

/// Write the combined CSV of the given reports into `dir`.
pub fn export_csv<'a, I>(dir: &Path, reports: I, export: &ExportConfig) -> anyhow::Result<PathBuf>
where
    I: IntoIterator<Item = (Option<&'a str>, &'a ExtractionReport)>,
{
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(export));
    let content = render::combined_csv(reports, export.delimiter_byte()?)?;
    fs::write(&path, content)?;
    debug!("Wrote export to {}", path.display());
    Ok(path)
}
