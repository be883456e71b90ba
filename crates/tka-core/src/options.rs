//! Candidate next beats ("options") for a sequence.
//!
//! Locations are a hard filter: a candidate that does not start where the
//! sequence ends is dropped. Orientations are never trusted: every kept
//! candidate is rewritten to start in the sequence's end orientations and its
//! end orientations are re-derived.

use crate::beat::{Beat, EndState};
use crate::error::{Result, TkaError};
use crate::sequence::Sequence;
use crate::types::Actor;
use serde::{Deserialize, Serialize};

/// What to do with a candidate whose motion has no defined end orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidOptionPolicy {
    /// Stop and return the error.
    #[default]
    Fail,
    /// Drop the candidate and keep going.
    Skip,
}

/// Lazily filter and rewrite `candidates` against `end_state`.
///
/// The iterator borrows the candidates, so the same slice can be filtered
/// again against a different end state.
pub fn filter_options_iter<'a>(
    candidates: &'a [Beat],
    end_state: &'a EndState,
) -> impl Iterator<Item = Result<Beat>> + 'a {
    candidates
        .iter()
        .enumerate()
        .filter(move |(_, beat)| starts_at(beat, end_state))
        .map(move |(index, beat)| join(beat, end_state).map_err(|e| TkaError::at_option(index, e)))
}

/// Filter and rewrite `candidates`, failing on the first invalid candidate.
pub fn filter_options(candidates: &[Beat], end_state: &EndState) -> Result<Vec<Beat>> {
    filter_options_with(candidates, end_state, InvalidOptionPolicy::Fail)
}

pub fn filter_options_with(
    candidates: &[Beat],
    end_state: &EndState,
    policy: InvalidOptionPolicy,
) -> Result<Vec<Beat>> {
    let mut kept = Vec::new();
    for option in filter_options_iter(candidates, end_state) {
        match (option, policy) {
            (Ok(beat), _) => kept.push(beat),
            (Err(e), InvalidOptionPolicy::Fail) => return Err(e),
            (Err(e), InvalidOptionPolicy::Skip) => {
                tracing::warn!(error = %e, "skipping option");
            }
        }
    }
    tracing::debug!(
        candidates = candidates.len(),
        kept = kept.len(),
        position = %end_state.location,
        "filtered options"
    );
    Ok(kept)
}

/// Options that can follow `sequence`, falling back to its start position
/// when it has no beats. Fails with `EmptySequence` when there is neither.
pub fn options_for(
    sequence: &Sequence,
    candidates: &[Beat],
    policy: InvalidOptionPolicy,
) -> Result<Vec<Beat>> {
    let end_state = EndState::of_sequence(sequence)?;
    filter_options_with(candidates, &end_state, policy)
}

fn starts_at(beat: &Beat, end_state: &EndState) -> bool {
    beat.start_locations() == end_state.location
}

fn join(beat: &Beat, end_state: &EndState) -> Result<Beat> {
    let mut option = beat.clone();
    for &actor in Actor::all() {
        option
            .motion_mut(actor)
            .restart_from(*end_state.orientation.get(actor))?;
    }
    option.start_position = option.start_locations();
    Ok(option)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
