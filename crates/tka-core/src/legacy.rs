//! Adapter for the legacy JSON sequence document.
//!
//! The legacy document is an array: a metadata object, an optional start
//! position entry (`beat: 0`), then one entry per beat, each with loosely
//! typed `blue_attributes` / `red_attributes` maps. This module is the only
//! place those maps are read or written; everything else works on the typed
//! [`Sequence`].

use crate::beat::{Beat, LocationPair, StartPosition};
use crate::error::{Result, TkaError};
use crate::motion::Motion;
use crate::sequence::Sequence;
use crate::types::{ByActor, Location, MotionType, Orientation, RotationDirection, Turns};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LegacyMetadata {
    #[serde(default)]
    word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    #[serde(default)]
    level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date_added: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum LegacyTurns {
    Number(f64),
    Text(String),
}

impl Default for LegacyTurns {
    fn default() -> Self {
        LegacyTurns::Number(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LegacyAttributes {
    motion_type: String,
    start_loc: String,
    end_loc: String,
    start_ori: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_ori: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prop_rot_dir: Option<String>,
    #[serde(default)]
    turns: LegacyTurns,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LegacyEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    beat: Option<u32>,
    #[serde(default)]
    letter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sequence_start_position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_pos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_pos: Option<String>,
    blue_attributes: LegacyAttributes,
    red_attributes: LegacyAttributes,
}

// ---------------------------------------------------------------------------
// Legacy -> typed
// ---------------------------------------------------------------------------

/// True if `value` looks like a legacy sequence document.
pub fn is_legacy_document(value: &Value) -> bool {
    value.is_array()
}

/// Convert a legacy document to a typed sequence.
///
/// Motion end orientations are re-derived; stored `end_ori` values that
/// disagree are logged and replaced.
pub fn sequence_from_legacy(value: &Value) -> Result<Sequence> {
    let entries = value
        .as_array()
        .ok_or_else(|| TkaError::Document("expected a JSON array".to_string()))?;

    let mut sequence = Sequence::new("");
    let mut rest = entries.as_slice();

    if let Some((first, tail)) = rest.split_first() {
        if first.get("blue_attributes").is_none() {
            let meta: LegacyMetadata = serde_json::from_value(first.clone())?;
            sequence.name = meta.word;
            sequence.author = meta.author;
            if let Some(created) = meta.date_added.as_deref().and_then(parse_date) {
                sequence.created_at = created;
            }
            rest = tail;
        }
    }

    for (offset, raw) in rest.iter().enumerate() {
        let entry: LegacyEntry = serde_json::from_value(raw.clone())?;
        let is_start = entry.beat == Some(0) || entry.sequence_start_position.is_some();
        if is_start {
            if !sequence.beats.is_empty() {
                return Err(TkaError::Document(format!(
                    "start position after beat {}",
                    sequence.beats.len()
                )));
            }
            let start = start_from_entry(&entry).map_err(|e| TkaError::at_beat(0, e))?;
            sequence.start_position = Some(start);
            continue;
        }
        let index = sequence.beats.len();
        let beat = beat_from_entry(&entry).map_err(|e| TkaError::at_beat(index, e))?;
        if let Some(number) = entry.beat.filter(|n| *n as usize != index + 1) {
            tracing::warn!(entry = offset, beat = number, expected = index + 1, "beat numbering gap");
        }
        sequence.beats.push(beat);
    }

    if sequence.name.is_empty() {
        sequence.name = sequence.word();
    }
    Ok(sequence)
}

/// Convert a list of legacy beat entries (e.g. a pictograph dataset
/// export) into beats.
pub fn beats_from_legacy(value: &Value) -> Result<Vec<Beat>> {
    let entries = value
        .as_array()
        .ok_or_else(|| TkaError::Document("expected a JSON array of beats".to_string()))?;
    entries
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let entry: LegacyEntry = serde_json::from_value(raw.clone())?;
            beat_from_entry(&entry).map_err(|e| TkaError::at_option(index, e))
        })
        .collect()
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

fn start_from_entry(entry: &LegacyEntry) -> Result<StartPosition> {
    let blue = motion_from_attributes(&entry.blue_attributes)?;
    let red = motion_from_attributes(&entry.red_attributes)?;
    Ok(StartPosition {
        letter: entry.letter.clone(),
        position: LocationPair::new(blue.start_loc, red.start_loc),
        orientation: ByActor::new(blue.start_ori, red.start_ori),
    })
}

fn beat_from_entry(entry: &LegacyEntry) -> Result<Beat> {
    let blue = motion_from_attributes(&entry.blue_attributes)?;
    let red = motion_from_attributes(&entry.red_attributes)?;
    let beat = Beat::new(entry.letter.clone(), blue, red);

    for (label, stored, derived) in [
        ("start_pos", entry.start_pos.as_deref(), beat.start_position),
        ("end_pos", entry.end_pos.as_deref(), beat.end_position),
    ] {
        if let Some(stored) = stored {
            match stored.parse::<LocationPair>() {
                Ok(pair) if pair == derived => {}
                _ => tracing::warn!(
                    letter = %entry.letter,
                    field = label,
                    stored,
                    derived = %derived,
                    "position key disagrees with motion locations"
                ),
            }
        }
    }
    Ok(beat)
}

fn motion_from_attributes(attrs: &LegacyAttributes) -> Result<Motion> {
    let motion_type: MotionType = attrs.motion_type.parse()?;
    let start_loc: Location = attrs.start_loc.parse()?;
    let end_loc: Location = attrs.end_loc.parse()?;
    let start_ori: Orientation = attrs.start_ori.parse()?;
    let prop_rot_dir: RotationDirection = match attrs.prop_rot_dir.as_deref() {
        Some(raw) => raw.parse()?,
        None => RotationDirection::None,
    };
    let turns = match &attrs.turns {
        LegacyTurns::Number(n) => Turns::try_from(*n)?,
        LegacyTurns::Text(t) if t == "fl" => Turns::ZERO,
        LegacyTurns::Text(t) => t.parse()?,
    };

    let motion = Motion::new(motion_type, turns, prop_rot_dir, start_loc, end_loc, start_ori)?;
    if let Some(stored) = attrs.end_ori.as_deref() {
        let stored: Orientation = stored.parse()?;
        if stored != motion.end_ori {
            tracing::warn!(
                motion_type = %motion_type,
                stored = %stored,
                derived = %motion.end_ori,
                "stored end orientation replaced"
            );
        }
    }
    Ok(motion)
}

// ---------------------------------------------------------------------------
// Typed -> legacy
// ---------------------------------------------------------------------------

/// Render a typed sequence as a legacy document.
pub fn sequence_to_legacy(sequence: &Sequence) -> Result<Value> {
    let mut entries = Vec::with_capacity(sequence.beats.len() + 2);

    let meta = LegacyMetadata {
        word: if sequence.name.is_empty() {
            sequence.word()
        } else {
            sequence.name.clone()
        },
        author: sequence.author.clone(),
        level: 0,
        date_added: Some(sequence.created_at.to_rfc3339()),
    };
    entries.push(serde_json::to_value(meta)?);

    if let Some(start) = &sequence.start_position {
        let held = start.as_beat();
        let entry = LegacyEntry {
            beat: Some(0),
            letter: start.letter.clone(),
            sequence_start_position: Some(position_family(start.position)),
            start_pos: None,
            end_pos: Some(position_name(start.position)),
            blue_attributes: attributes_from_motion(&held.blue),
            red_attributes: attributes_from_motion(&held.red),
        };
        entries.push(serde_json::to_value(entry)?);
    }

    for (index, beat) in sequence.beats.iter().enumerate() {
        let entry = LegacyEntry {
            beat: Some(index as u32 + 1),
            letter: beat.letter.clone(),
            sequence_start_position: None,
            start_pos: Some(position_name(beat.start_position)),
            end_pos: Some(position_name(beat.end_position)),
            blue_attributes: attributes_from_motion(&beat.blue),
            red_attributes: attributes_from_motion(&beat.red),
        };
        entries.push(serde_json::to_value(entry)?);
    }

    Ok(Value::Array(entries))
}

fn position_name(pair: LocationPair) -> String {
    pair.grid_position().unwrap_or_else(|| pair.to_string())
}

fn position_family(pair: LocationPair) -> String {
    position_name(pair)
        .trim_end_matches(|c: char| c.is_ascii_digit())
        .to_string()
}

fn attributes_from_motion(motion: &Motion) -> LegacyAttributes {
    let turns = match motion.motion_type {
        MotionType::Float => LegacyTurns::Text("fl".to_string()),
        _ => LegacyTurns::Number(motion.turns.as_f64()),
    };
    LegacyAttributes {
        motion_type: motion.motion_type.to_string(),
        start_loc: motion.start_loc.to_string(),
        end_loc: motion.end_loc.to_string(),
        start_ori: motion.start_ori.to_string(),
        end_ori: Some(motion.end_ori.to_string()),
        prop_rot_dir: Some(motion.prop_rot_dir.to_string()),
        turns,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(motion_type: &str, start: &str, end: &str, ori: &str, rot: &str, turns: Value) -> Value {
        json!({
            "motion_type": motion_type,
            "start_loc": start,
            "end_loc": end,
            "start_ori": ori,
            "end_ori": ori,
            "prop_rot_dir": rot,
            "turns": turns,
        })
    }

    fn document() -> Value {
        json!([
            { "word": "AB", "author": "tester", "level": 1, "date_added": "2024-05-01T12:30:00" },
            {
                "beat": 0,
                "sequence_start_position": "alpha",
                "letter": "α",
                "end_pos": "alpha1",
                "blue_attributes": attrs("static", "s", "s", "in", "no_rot", json!(0)),
                "red_attributes": attrs("static", "n", "n", "in", "no_rot", json!(0)),
            },
            {
                "beat": 1,
                "letter": "A",
                "start_pos": "alpha1",
                "end_pos": "alpha3",
                "blue_attributes": attrs("anti", "s", "w", "in", "cw", json!(0)),
                "red_attributes": attrs("anti", "n", "e", "in", "cw", json!(0)),
            },
            {
                "beat": 2,
                "letter": "B",
                "start_pos": "alpha3",
                "end_pos": "alpha5",
                "blue_attributes": attrs("float", "w", "n", "in", "no_rot", json!("fl")),
                "red_attributes": attrs("pro", "e", "s", "in", "ccw", json!(0.5)),
            }
        ])
    }

    #[test]
    fn parses_metadata_start_and_beats() {
        let seq = sequence_from_legacy(&document()).unwrap();
        assert_eq!(seq.name, "AB");
        assert_eq!(seq.author.as_deref(), Some("tester"));
        assert_eq!(seq.created_at.to_rfc3339(), "2024-05-01T12:30:00+00:00");

        let start = seq.start_position.as_ref().unwrap();
        assert_eq!(start.position, LocationPair::new(Location::S, Location::N));
        assert_eq!(start.letter, "α");

        assert_eq!(seq.beats.len(), 2);
        assert_eq!(seq.beats[0].blue.end_ori, Orientation::Out);
        assert_eq!(seq.beats[1].blue.motion_type, MotionType::Float);
        assert_eq!(seq.beats[1].blue.turns, Turns::ZERO);
        assert_eq!(seq.beats[1].red.turns, Turns::from_halves(1));
    }

    #[test]
    fn unknown_motion_type_is_annotated_with_beat() {
        let mut doc = document();
        doc[2]["blue_attributes"]["motion_type"] = json!("spiral");
        let err = sequence_from_legacy(&doc).unwrap_err();
        assert!(matches!(err, TkaError::AtBeat { index: 0, .. }));
        assert!(matches!(err.root_cause(), TkaError::InvalidMotion(_)));
    }

    #[test]
    fn unknown_rotation_is_invalid_motion() {
        let mut doc = document();
        doc[3]["red_attributes"]["prop_rot_dir"] = json!("sideways");
        let err = sequence_from_legacy(&doc).unwrap_err();
        assert!(matches!(err, TkaError::AtBeat { index: 1, .. }));
        assert!(matches!(err.root_cause(), TkaError::InvalidMotion(_)));
    }

    #[test]
    fn candidate_entries_without_numbers_are_beats() {
        let doc = document();
        let entries = json!([doc[2].clone(), doc[3].clone()]);
        let beats = beats_from_legacy(&entries).unwrap();
        assert_eq!(beats.len(), 2);
        assert_eq!(beats[0].letter, "A");

        let mut unnumbered = doc[2].clone();
        unnumbered.as_object_mut().unwrap().remove("beat");
        let mut seq_doc = document();
        seq_doc.as_array_mut().unwrap()[2] = unnumbered;
        assert_eq!(sequence_from_legacy(&seq_doc).unwrap().beats.len(), 2);
    }

    #[test]
    fn sequence_name_survives_legacy_roundtrip() {
        let mut seq = sequence_from_legacy(&document()).unwrap();
        seq.name = "Morning flow".to_string();
        let legacy = sequence_to_legacy(&seq).unwrap();
        assert_eq!(legacy[0]["word"], "Morning flow");
        assert_eq!(sequence_from_legacy(&legacy).unwrap().name, "Morning flow");

        seq.name.clear();
        let legacy = sequence_to_legacy(&seq).unwrap();
        assert_eq!(legacy[0]["word"], "AB");
    }

    #[test]
    fn non_array_is_rejected() {
        let err = sequence_from_legacy(&json!({ "word": "A" })).unwrap_err();
        assert!(matches!(err, TkaError::Document(_)));
    }

    #[test]
    fn document_without_metadata_uses_word_as_name() {
        let mut doc = document();
        doc.as_array_mut().unwrap().remove(0);
        let seq = sequence_from_legacy(&doc).unwrap();
        assert_eq!(seq.name, "AB");
    }

    #[test]
    fn typed_to_legacy_and_back() {
        let seq = sequence_from_legacy(&document()).unwrap();
        let legacy = sequence_to_legacy(&seq).unwrap();
        assert_eq!(legacy[0]["word"], "AB");
        assert_eq!(legacy[1]["sequence_start_position"], "alpha");
        assert_eq!(legacy[2]["start_pos"], "alpha1");
        assert_eq!(legacy[3]["blue_attributes"]["turns"], "fl");

        let back = sequence_from_legacy(&legacy).unwrap();
        assert_eq!(back.beats, seq.beats);
        assert_eq!(back.start_position, seq.start_position);
        assert_eq!(back.created_at, seq.created_at);
    }
}
