use crate::output::{print_json, print_table};
use anyhow::Context;
use std::path::Path;
use tka_core::continuity::validate;
use tka_core::document::load_sequence;

pub fn run(file: &Path, json: bool) -> anyhow::Result<()> {
    let sequence = load_sequence(file)
        .with_context(|| format!("failed to load sequence {}", file.display()))?;
    let report = validate(&sequence);

    if json {
        let value = serde_json::json!({
            "sequence": sequence.name,
            "beats": sequence.len(),
            "continuous": report.is_continuous(),
            "checked_joins": report.checked_joins,
            "discontinuities": report.discontinuities,
        });
        print_json(&value)?;
        return Ok(());
    }

    if report.is_continuous() {
        println!(
            "Sequence '{}' is continuous ({} beats).",
            sequence.name,
            sequence.len()
        );
        return Ok(());
    }

    println!(
        "Sequence '{}' has {} discontinuit{}:",
        sequence.name,
        report.discontinuities.len(),
        if report.discontinuities.len() == 1 { "y" } else { "ies" }
    );
    let rows = report
        .discontinuities
        .iter()
        .map(|d| {
            vec![
                d.beat_index.to_string(),
                sequence.beats[d.beat_index].letter.clone(),
                d.actor.to_string(),
                d.expected_orientation.to_string(),
                d.found_orientation.to_string(),
            ]
        })
        .collect();
    print_table(&["BEAT", "LETTER", "ACTOR", "EXPECTED", "FOUND"], rows);
    Ok(())
}
