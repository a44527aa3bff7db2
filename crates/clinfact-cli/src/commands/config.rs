//! Config command - manage configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use tracing::debug;

use clinfact_core::models::config::ClinfactConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "pdf.min_text_length")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value (JSON, or a plain string)
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(),
        ConfigCommand::Init(init_args) => init_config(init_args),
        ConfigCommand::Get { key } => get_config(&key),
        ConfigCommand::Set { key, value } => set_config(&key, &value),
        ConfigCommand::Path => show_path(),
    }
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("clinfact")
        .join("config.json")
}

/// Configuration for the process and batch commands.
///
/// An explicit `--config` path must exist; otherwise the user config file is
/// used when present, and built-in defaults when not.
pub fn load_config(path: Option<&str>) -> anyhow::Result<ClinfactConfig> {
    if let Some(path) = path {
        debug!("Loading configuration from {}", path);
        return Ok(ClinfactConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading configuration from {}", default_path.display());
        Ok(ClinfactConfig::from_file(&default_path)?)
    } else {
        Ok(ClinfactConfig::default())
    }
}

fn show_config() -> anyhow::Result<()> {
    let config_path = default_config_path();

    let config = if config_path.exists() {
        ClinfactConfig::from_file(&config_path)?
    } else {
        println!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
        ClinfactConfig::default()
    };

    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(default_config_path);

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    ClinfactConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn get_config(key: &str) -> anyhow::Result<()> {
    let config = load_config(None)?;
    let value = lookup(&serde_json::to_value(&config)?, key)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn set_config(key: &str, value: &str) -> anyhow::Result<()> {
    let config_path = default_config_path();
    let config = load_config(None)?;

    let updated = assign(config, key, value)?;

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    updated.save(&config_path)?;

    println!("{} Set {} = {}", style("✓").green(), key, value);

    Ok(())
}

/// Value at a dotted key path.
fn lookup(json: &serde_json::Value, key: &str) -> anyhow::Result<serde_json::Value> {
    let mut current = json;
    for part in key.split('.') {
        current = current
            .get(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    }
    Ok(current.clone())
}

/// Config with the dotted key replaced; values not parsing as JSON are strings.
fn assign(config: ClinfactConfig, key: &str, value: &str) -> anyhow::Result<ClinfactConfig> {
    let parsed_value: serde_json::Value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));

    let mut json = serde_json::to_value(&config)?;

    let parts: Vec<&str> = key.split('.').collect();
    let (last, parents) = parts
        .split_last()
        .ok_or_else(|| anyhow::anyhow!("Empty configuration key"))?;

    let mut current = &mut json;
    for part in parents {
        current = current
            .get_mut(*part)
            .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;
    }

    let obj = current
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Cannot set value at non-object path"))?;
    if !obj.contains_key(*last) {
        anyhow::bail!("Configuration key not found: {}", key);
    }
    obj.insert((*last).to_string(), parsed_value);

    serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))
}

fn show_path() -> anyhow::Result<()> {
    let config_path = default_config_path();

    println!("Configuration file: {}", config_path.display());

    if config_path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'clinfact config init' to create a configuration file.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lookup_nested_key() {
        let json = serde_json::to_value(ClinfactConfig::default()).unwrap();
        assert_eq!(lookup(&json, "pdf.min_text_length").unwrap(), serde_json::json!(50));
        assert!(lookup(&json, "pdf.nope").is_err());
    }

    #[test]
    fn test_assign_typed_and_string_values() {
        let config = assign(ClinfactConfig::default(), "pdf.min_text_length", "120").unwrap();
        assert_eq!(config.pdf.min_text_length, 120);

        let config = assign(config, "export.file_prefix", "cuentas").unwrap();
        assert_eq!(config.export.file_prefix, "cuentas");

        let config = assign(
            config,
            "extraction.procedure_keywords",
            r#"["PARACENTESIS"]"#,
        )
        .unwrap();
        assert_eq!(config.extraction.procedure_keywords, vec!["PARACENTESIS".to_string()]);
    }

    #[test]
    fn test_assign_rejects_unknown_or_mistyped() {
        assert!(assign(ClinfactConfig::default(), "pdf.unknown", "1").is_err());
        assert!(assign(ClinfactConfig::default(), "pdf.min_text_length", "many").is_err());
    }

    #[test]
    fn test_load_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "export": { "delimiter": ";" } }"#).unwrap();

        let config = load_config(path.to_str()).unwrap();
        assert_eq!(config.export.delimiter, ';');
        assert!(load_config(Some("/no/such/config.json")).is_err());
    }
}
