//! Batch processing command for multiple clinical documents.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use clinfact_core::source::{DocumentLoader, InputFormat};
use clinfact_core::{ExtractionEngine, ExtractionReport};

use super::process::{OutputFormat, export_csv};
use crate::render;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Also write one combined CSV export of every document
    #[arg(long)]
    export: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Skip OCR and use only text layers
    #[arg(long)]
    text_only: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    report: Option<ExtractionReport>,
    error: Option<String>,
    processing_time_ms: u64,
}

impl ProcessResult {
    fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::config::load_config(config_path)?;

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file() && InputFormat::is_supported(p))
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut loader = DocumentLoader::new(&config);
    if args.text_only {
        loader = loader.without_ocr();
    }
    let engine = ExtractionEngine::from_config(&config.extraction);

    // Sequential: OCR runs in an external process per file
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = process_single_file(&path, &loader, &engine);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(report) => {
                results.push(ProcessResult {
                    path,
                    report: Some(report),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        report: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    pb.abandon();
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    let successful: Vec<&ProcessResult> = results.iter().filter(|r| r.report.is_some()).collect();
    let failed: Vec<&ProcessResult> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            let Some(report) = &result.report else { continue };

            let output_path = output_dir.join(output_file_name(&result.path, args.format));

            let content = render::format_report(report, args.format, &config.export)?;
            fs::write(&output_path, content)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    let target_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    if args.summary {
        let summary_path = target_dir.join("summary.csv");
        write_summary(&summary_path, &results, config.export.delimiter_byte()?)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    if args.export && !successful.is_empty() {
        let reports = successful
            .iter()
            .copied()
            .filter_map(|r| r.report.as_ref().map(|report| (Some(r.file_name()), report)));
        let path = export_csv(&target_dir, reports, &config.export)?;
        println!("{} Export written to {}", style("✓").green(), path.display());
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(
    path: &Path,
    loader: &DocumentLoader,
    engine: &ExtractionEngine,
) -> anyhow::Result<ExtractionReport> {
    let document = loader.load(path)?;
    Ok(engine.extract_document(&document))
}

/// Output name keeping the input extension, so `hc.pdf` and `hc.txt` in
/// one batch do not overwrite each other.
fn output_file_name(input: &Path, format: OutputFormat) -> String {
    let name = input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("documento");
    format!("{}.{}", name, format.extension())
}

fn write_summary(path: &Path, results: &[ProcessResult], delimiter: u8) -> anyhow::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)?;

    let categories: Vec<&str> = ExtractionReport::default()
        .counts()
        .into_iter()
        .map(|(name, _)| name)
        .collect();

    let mut header = vec!["filename", "status", "source_kind"];
    header.extend(&categories);
    header.extend(["warnings", "processing_time_ms", "error"]);
    wtr.write_record(&header)?;

    for result in results {
        let mut record: Vec<String> = vec![result.file_name().to_string()];

        if let Some(report) = &result.report {
            record.push("success".to_string());
            record.push(report.metadata.source_kind.as_str().to_string());
            record.extend(report.counts().into_iter().map(|(_, n)| n.to_string()));
            record.push(report.metadata.warnings.join("; "));
            record.push(result.processing_time_ms.to_string());
            record.push(String::new());
        } else {
            record.push("error".to_string());
            record.push(String::new());
            record.extend(categories.iter().map(|_| String::new()));
            record.push(String::new());
            record.push(result.processing_time_ms.to_string());
            record.push(result.error.clone().unwrap_or_default());
        }

        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
