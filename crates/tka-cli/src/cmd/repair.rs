use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use tka_core::config::{Config, DocumentFormat};
use tka_core::continuity::repair_in_place;
use tka_core::document::{is_yaml, load_sequence, render_sequence, save_sequence};

// ---------------------------------------------------------------------------
// repair
// ---------------------------------------------------------------------------

pub fn run(
    root: &Path,
    file: &Path,
    output: Option<&Path>,
    format: Option<DocumentFormat>,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let format = format.unwrap_or(config.documents.format);

    let mut sequence = load_sequence(file)
        .with_context(|| format!("failed to load sequence {}", file.display()))?;
    let rewritten = repair_in_place(&mut sequence).context("failed to repair sequence")?;

    let Some(output) = output else {
        let yaml = !json && format == DocumentFormat::Typed && is_yaml(file);
        print!("{}", render_sequence(&sequence, format, yaml)?);
        if !yaml {
            println!();
        }
        return Ok(());
    };

    save_sequence(output, &sequence, format)
        .with_context(|| format!("failed to write {}", output.display()))?;

    if json {
        let value = serde_json::json!({
            "sequence": sequence.name,
            "rewritten": rewritten,
            "output": output.display().to_string(),
        });
        print_json(&value)?;
    } else {
        println!(
            "Repaired '{}': rewrote {} start orientation(s), wrote {}",
            sequence.name,
            rewritten,
            output.display()
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// convert
// ---------------------------------------------------------------------------

pub fn convert(
    root: &Path,
    file: &Path,
    output: &Path,
    format: Option<DocumentFormat>,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let format = format.unwrap_or(config.documents.format);

    let mut sequence = load_sequence(file)
        .with_context(|| format!("failed to load sequence {}", file.display()))?;
    let rewritten = if config.continuity.auto_repair {
        repair_in_place(&mut sequence).context("failed to repair sequence")?
    } else {
        0
    };

    save_sequence(output, &sequence, format)
        .with_context(|| format!("failed to write {}", output.display()))?;

    if json {
        let value = serde_json::json!({
            "sequence": sequence.name,
            "format": format,
            "rewritten": rewritten,
            "output": output.display().to_string(),
        });
        print_json(&value)?;
    } else {
        println!(
            "Converted '{}' to {} ({} beats) at {}",
            sequence.name,
            match format {
                DocumentFormat::Typed => "typed",
                DocumentFormat::Legacy => "legacy",
            },
            sequence.len(),
            output.display()
        );
    }
    Ok(())
}
