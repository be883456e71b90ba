use crate::beat::Beat;
use crate::config::DocumentFormat;
use crate::error::{Result, TkaError};
use crate::legacy;
use crate::sequence::Sequence;
use crate::types::Actor;
use serde_json::Value;
use std::path::Path;

/// True for `.yaml` / `.yml` paths.
pub fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Load a sequence from a typed YAML/JSON document or a legacy JSON array.
///
/// Stored end orientations are re-derived in both formats.
pub fn load_sequence(path: &Path) -> Result<Sequence> {
    let data = std::fs::read_to_string(path)?;
    let mut sequence = if is_yaml(path) {
        serde_yaml::from_str(&data)?
    } else {
        let value: Value = serde_json::from_str(&data)?;
        if legacy::is_legacy_document(&value) {
            legacy::sequence_from_legacy(&value)?
        } else {
            serde_json::from_value(value)?
        }
    };
    refresh_end_orientations(&mut sequence);
    warn_on_position_mismatch(&sequence);
    Ok(sequence)
}

/// Replace stale `end_ori` values. Underivable motions keep what is stored;
/// `validate` reports on them later.
fn refresh_end_orientations(sequence: &mut Sequence) {
    for (index, beat) in sequence.beats.iter_mut().enumerate() {
        for &actor in Actor::all() {
            let motion = beat.motion_mut(actor);
            let stored = motion.end_ori;
            if let Ok(true) = motion.refresh_end_orientation() {
                tracing::warn!(
                    beat = index,
                    actor = %actor,
                    stored = %stored,
                    derived = %motion.end_ori,
                    "stored end orientation replaced"
                );
            }
        }
    }
}

fn warn_on_position_mismatch(sequence: &Sequence) {
    for (index, beat) in sequence.beats.iter().enumerate() {
        if !beat.positions_agree() {
            tracing::warn!(
                beat = index,
                start = %beat.start_position,
                end = %beat.end_position,
                "position keys disagree with motion locations"
            );
        }
    }
}

/// Load candidate beats: a YAML/JSON array of typed beats, or of legacy
/// beat entries.
pub fn load_candidates(path: &Path) -> Result<Vec<Beat>> {
    let data = std::fs::read_to_string(path)?;
    if is_yaml(path) {
        return Ok(serde_yaml::from_str(&data)?);
    }
    let value: Value = serde_json::from_str(&data)?;
    let Some(entries) = value.as_array() else {
        return Err(TkaError::Document(
            "candidate file must hold an array of beats".to_string(),
        ));
    };
    let is_legacy = entries
        .first()
        .is_some_and(|e| e.get("blue_attributes").is_some());
    if is_legacy {
        legacy::beats_from_legacy(&value)
    } else {
        Ok(serde_json::from_value(value)?)
    }
}

/// Render a sequence as text. Typed documents are YAML when `yaml` is set,
/// JSON otherwise; legacy documents are always JSON.
pub fn render_sequence(sequence: &Sequence, format: DocumentFormat, yaml: bool) -> Result<String> {
    match format {
        DocumentFormat::Typed if yaml => Ok(serde_yaml::to_string(sequence)?),
        DocumentFormat::Typed => Ok(serde_json::to_string_pretty(sequence)?),
        DocumentFormat::Legacy => {
            let value = legacy::sequence_to_legacy(sequence)?;
            Ok(serde_json::to_string_pretty(&value)?)
        }
    }
}

/// Atomically save a sequence, choosing YAML or JSON by file extension.
pub fn save_sequence(path: &Path, sequence: &Sequence, format: DocumentFormat) -> Result<()> {
    if format == DocumentFormat::Legacy && is_yaml(path) {
        return Err(TkaError::Document(format!(
            "legacy documents are JSON; cannot write {}",
            path.display()
        )));
    }
    let text = render_sequence(sequence, format, is_yaml(path))?;
    crate::io::atomic_write(path, text.as_bytes())?;
    tracing::debug!(path = %path.display(), beats = sequence.len(), "saved sequence");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
