use crate::output::{print_json, print_table};
use anyhow::Context;
use std::path::Path;
use tka_core::config::Config;
use tka_core::document::{load_candidates, load_sequence};
use tka_core::options::{options_for, InvalidOptionPolicy};

pub fn run(
    root: &Path,
    file: &Path,
    candidates: &Path,
    skip_invalid: bool,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let policy = if skip_invalid {
        InvalidOptionPolicy::Skip
    } else {
        config.options.on_invalid
    };

    let sequence = load_sequence(file)
        .with_context(|| format!("failed to load sequence {}", file.display()))?;
    let candidates = load_candidates(candidates)
        .with_context(|| format!("failed to load candidates {}", candidates.display()))?;
    let options = options_for(&sequence, &candidates, policy)
        .context("could not compute options for the sequence")?;

    if json {
        print_json(&options)?;
        return Ok(());
    }

    if options.is_empty() {
        println!("No options available.");
        return Ok(());
    }

    let rows = options
        .iter()
        .map(|o| {
            vec![
                o.letter.clone(),
                o.start_position.to_string(),
                o.end_position.to_string(),
                format!("{} -> {}", o.blue.start_ori, o.blue.end_ori),
                format!("{} -> {}", o.red.start_ori, o.red.end_ori),
            ]
        })
        .collect();
    print_table(&["LETTER", "START", "END", "BLUE", "RED"], rows);
    Ok(())
}
