use crate::beat::{Beat, EndState, StartPosition};
use crate::error::{Result, TkaError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Sequence
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_position: Option<StartPosition>,
    #[serde(default)]
    pub beats: Vec<Beat>,
}

impl Sequence {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            author: None,
            created_at: Utc::now(),
            start_position: None,
            beats: Vec::new(),
        }
    }

    pub fn with_start(mut self, start: StartPosition) -> Self {
        self.start_position = Some(start);
        self
    }

    pub fn len(&self) -> usize {
        self.beats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }

    pub fn last_beat(&self) -> Option<&Beat> {
        self.beats.last()
    }

    pub fn push(&mut self, beat: Beat) {
        self.beats.push(beat);
    }

    /// Remove the last beat (undo of an append).
    pub fn pop(&mut self) -> Option<Beat> {
        self.beats.pop()
    }

    /// Delete the beat at `index` and every beat after it.
    ///
    /// Returns the removed beats in order; empty if `index` is past the end.
    pub fn truncate_from(&mut self, index: usize) -> Vec<Beat> {
        if index >= self.beats.len() {
            return Vec::new();
        }
        self.beats.split_off(index)
    }

    /// The letters of the sequence, concatenated.
    pub fn word(&self) -> String {
        self.beats.iter().map(|b| b.letter.as_str()).collect()
    }
}

impl EndState {
    /// The state the next beat must join: the last beat's end, or the start
    /// position when the sequence has no beats yet.
    pub fn of_sequence(sequence: &Sequence) -> Result<EndState> {
        if let Some(beat) = sequence.last_beat() {
            return Ok(beat.end_state());
        }
        sequence
            .start_position
            .as_ref()
            .map(StartPosition::state)
            .ok_or(TkaError::EmptySequence)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
