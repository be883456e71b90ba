use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;
use tka_core::config::{Config, DocumentFormat, WarnLevel};
use tka_core::options::InvalidOptionPolicy;
use tka_core::paths;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Write a default .tka/config.yaml if none exists
    Init,

    /// Show the effective configuration
    Show,

    /// Validate the config for common mistakes
    Validate,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Init => init(root, json),
        ConfigSubcommand::Show => show(root, json),
        ConfigSubcommand::Validate => validate(root, json),
    }
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

fn init(root: &Path, json: bool) -> anyhow::Result<()> {
    let written = Config::init(root).context("failed to write config")?;
    let path = paths::config_path(root);

    if json {
        let value = serde_json::json!({
            "path": path.display().to_string(),
            "created": written,
        });
        print_json(&value)?;
    } else if written {
        println!("Created {}", path.display());
    } else {
        println!("{} already exists.", path.display());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;

    if json {
        print_json(&config)?;
        return Ok(());
    }

    println!("Version:         {}", config.version);
    println!("Auto repair:     {}", config.continuity.auto_repair);
    println!(
        "Invalid options: {}",
        match config.options.on_invalid {
            InvalidOptionPolicy::Fail => "fail",
            InvalidOptionPolicy::Skip => "skip",
        }
    );
    println!(
        "Document format: {}",
        match config.documents.format {
            DocumentFormat::Typed => "typed",
            DocumentFormat::Legacy => "legacy",
        }
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let warnings = config.validate();

    if json {
        let value = serde_json::json!({
            "warnings": warnings,
        });
        print_json(&value)?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    let has_errors = warnings.iter().any(|w| w.level == WarnLevel::Error);
    if has_errors {
        anyhow::bail!("config validation found errors");
    }

    Ok(())
}
