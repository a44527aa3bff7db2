//! External OCR command runner.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::SourceError;
use crate::models::config::OcrConfig;

const INPUT_PLACEHOLDER: &str = "{input}";

/// An OCR program invoked once per file, printing the text on stdout.
#[derive(Debug, Clone)]
pub struct OcrCommand {
    program: String,
    args: Vec<String>,
}

impl OcrCommand {
    /// Image OCR command; `None` when OCR is disabled or unset.
    pub fn from_config(config: &OcrConfig) -> Option<Self> {
        Self::from_argv(config, &config.command)
    }

    /// PDF OCR command; `None` when OCR is disabled or unset.
    pub fn pdf_from_config(config: &OcrConfig) -> Option<Self> {
        Self::from_argv(config, &config.pdf_command)
    }

    fn from_argv(config: &OcrConfig, argv: &[String]) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        let (program, args) = argv.split_first()?;
        if program.trim().is_empty() {
            return None;
        }

        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// Arguments for one input file. The path replaces every `{input}`
    /// placeholder, or is appended when there is none.
    fn args_for(&self, input: &Path) -> Vec<String> {
        let path = input.display().to_string();
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|a| a.replace(INPUT_PLACEHOLDER, &path))
            .collect();

        if !self.args.iter().any(|a| a.contains(INPUT_PLACEHOLDER)) {
            args.push(path);
        }
        args
    }

    /// Run OCR on one file and return its text.
    pub fn run(&self, input: &Path) -> Result<String, SourceError> {
        let args = self.args_for(input);
        debug!("Running OCR: {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| SourceError::OcrFailed(format!("{}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SourceError::OcrFailed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout).map_err(|e| SourceError::Encoding(e.to_string()))
    }
}
