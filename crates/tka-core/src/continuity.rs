//! Orientation continuity across the beats of a sequence.
//!
//! Beat `i + 1` must start each prop in the orientation beat `i` leaves it
//! in. The first beat is taken as given: its start orientations come from
//! the chosen start position.

use crate::error::{Result, TkaError};
use crate::sequence::Sequence;
use crate::types::{Actor, Orientation};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// One prop starting a beat in the wrong orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discontinuity {
    /// Index of the later beat of the broken join.
    pub beat_index: usize,
    pub actor: Actor,
    pub expected_orientation: Orientation,
    pub found_orientation: Orientation,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinuityReport {
    /// Number of (join, actor) pairs inspected.
    pub checked_joins: usize,
    pub discontinuities: Vec<Discontinuity>,
}

impl ContinuityReport {
    pub fn is_continuous(&self) -> bool {
        self.discontinuities.is_empty()
    }

    /// Distinct beat indices that need repair, ascending.
    pub fn broken_beats(&self) -> Vec<usize> {
        let mut beats: Vec<usize> = self.discontinuities.iter().map(|d| d.beat_index).collect();
        beats.dedup();
        beats
    }
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

/// Check every join of the sequence. Never fails.
///
/// When a beat's end orientation cannot be derived the stored `end_ori` is
/// trusted instead.
pub fn validate(sequence: &Sequence) -> ContinuityReport {
    let mut report = ContinuityReport::default();

    for (index, pair) in sequence.beats.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        for &actor in Actor::all() {
            let expected = prev.motion(actor).end_orientation_or_stored();
            let found = next.motion(actor).start_ori;
            report.checked_joins += 1;
            if expected != found {
                report.discontinuities.push(Discontinuity {
                    beat_index: index + 1,
                    actor,
                    expected_orientation: expected,
                    found_orientation: found,
                });
            }
        }
    }

    if !report.is_continuous() {
        tracing::debug!(
            sequence = %sequence.name,
            breaks = report.discontinuities.len(),
            "orientation discontinuities found"
        );
    }
    report
}

// ---------------------------------------------------------------------------
// repair
// ---------------------------------------------------------------------------

/// Return a copy of `sequence` with every join made continuous.
pub fn repair(sequence: &Sequence) -> Result<Sequence> {
    let mut repaired = sequence.clone();
    repair_in_place(&mut repaired)?;
    Ok(repaired)
}

/// Make every join continuous in a single left-to-right pass.
///
/// Beat 0 keeps its start orientations. Every motion's end orientation is
/// re-derived, and each later beat is forced to start where its predecessor
/// ends, so a fix cascades to the end of the sequence. Returns the number of
/// start orientations rewritten.
pub fn repair_in_place(sequence: &mut Sequence) -> Result<usize> {
    let mut rewritten = 0;
    let mut previous_end: Option<(Orientation, Orientation)> = None;

    for (index, beat) in sequence.beats.iter_mut().enumerate() {
        for &actor in Actor::all() {
            let motion = beat.motion_mut(actor);
            if let Some(ends) = previous_end {
                let expected = match actor {
                    Actor::Blue => ends.0,
                    Actor::Red => ends.1,
                };
                if motion.start_ori != expected {
                    tracing::debug!(
                        beat = index,
                        actor = %actor,
                        from = %motion.start_ori,
                        to = %expected,
                        "rewriting start orientation"
                    );
                    motion.start_ori = expected;
                    rewritten += 1;
                }
            }
            motion
                .refresh_end_orientation()
                .map_err(|e| TkaError::at_beat(index, e))?;
        }
        previous_end = Some((beat.blue.end_ori, beat.red.end_ori));
    }

    if rewritten > 0 {
        tracing::info!(sequence = %sequence.name, rewritten, "repaired orientation continuity");
    }
    Ok(rewritten)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beat::Beat;
    use crate::motion::Motion;
    use crate::types::{Location, MotionType, RotationDirection, Turns};
    use proptest::prelude::*;

    fn motion(
        motion_type: MotionType,
        halves: u16,
        rot: RotationDirection,
        start_loc: Location,
        end_loc: Location,
        start_ori: Orientation,
    ) -> Motion {
        Motion::new(motion_type, Turns::from_halves(halves), rot, start_loc, end_loc, start_ori)
            .unwrap()
    }

    /// ANTI, zero turns, both props: each beat flips the orientation.
    fn anti_beat(start_ori: Orientation) -> Beat {
        Beat::new(
            "A",
            motion(
                MotionType::Anti,
                0,
                RotationDirection::Clockwise,
                Location::S,
                Location::W,
                start_ori,
            ),
            motion(
                MotionType::Anti,
                0,
                RotationDirection::Clockwise,
                Location::N,
                Location::E,
                start_ori,
            ),
        )
    }

    fn sequence_of(beats: Vec<Beat>) -> Sequence {
        let mut seq = Sequence::new("test");
        seq.beats = beats;
        seq
    }

    #[test]
    fn empty_and_single_beat_sequences_are_continuous() {
        let report = validate(&Sequence::new("empty"));
        assert!(report.is_continuous());
        assert_eq!(report.checked_joins, 0);

        let single = sequence_of(vec![anti_beat(Orientation::In)]);
        assert!(validate(&single).is_continuous());
        assert!(validate(&repair(&single).unwrap()).is_continuous());
        assert!(validate(&repair(&Sequence::new("empty")).unwrap()).is_continuous());
    }

    #[test]
    fn anti_cascade_is_detected_and_repaired() {
        let seq = sequence_of(vec![
            anti_beat(Orientation::In),
            anti_beat(Orientation::In),
            anti_beat(Orientation::In),
        ]);

        let report = validate(&seq);
        assert_eq!(report.checked_joins, 4);
        // Every beat was authored starting IN, so both joins break.
        assert_eq!(report.broken_beats(), vec![1, 2]);
        let first = report.discontinuities[0];
        assert_eq!(first.beat_index, 1);
        assert_eq!(first.actor, Actor::Blue);
        assert_eq!(first.expected_orientation, Orientation::Out);
        assert_eq!(first.found_orientation, Orientation::In);

        let repaired = repair(&seq).unwrap();
        assert_eq!(repaired.beats[0].blue.start_ori, Orientation::In);
        assert_eq!(repaired.beats[0].blue.end_ori, Orientation::Out);
        assert_eq!(repaired.beats[1].blue.start_ori, Orientation::Out);
        assert_eq!(repaired.beats[1].blue.end_ori, Orientation::In);
        assert_eq!(repaired.beats[2].blue.start_ori, Orientation::In);
        assert_eq!(repaired.beats[2].red.start_ori, Orientation::In);
        assert!(validate(&repaired).is_continuous());
    }

    #[test]
    fn first_beat_is_never_rewritten() {
        let seq = sequence_of(vec![anti_beat(Orientation::Clock), anti_beat(Orientation::In)]);
        let repaired = repair(&seq).unwrap();
        assert_eq!(repaired.beats[0].blue.start_ori, Orientation::Clock);
        assert_eq!(repaired.beats[1].blue.start_ori, Orientation::Counter);
    }

    #[test]
    fn repair_in_place_counts_rewrites() {
        let mut seq = sequence_of(vec![
            anti_beat(Orientation::In),
            anti_beat(Orientation::In),
            anti_beat(Orientation::In),
        ]);
        // Only beat 1 moves; once it starts OUT it ends IN, matching beat 2.
        assert_eq!(repair_in_place(&mut seq).unwrap(), 2);
        assert_eq!(repair_in_place(&mut seq).unwrap(), 0);
    }

    #[test]
    fn stale_end_orientation_is_refreshed() {
        let mut beat = anti_beat(Orientation::In);
        beat.blue.end_ori = Orientation::In;
        let seq = sequence_of(vec![beat, anti_beat(Orientation::Out)]);
        // validate compares against the computed end, not the stale one
        assert!(validate(&seq).is_continuous());
        let repaired = repair(&seq).unwrap();
        assert_eq!(repaired.beats[0].blue.end_ori, Orientation::Out);
    }

    #[test]
    fn repair_reports_offending_beat() {
        let mut bad = anti_beat(Orientation::In);
        bad.red = Motion {
            motion_type: MotionType::Float,
            turns: Turns::ZERO,
            prop_rot_dir: RotationDirection::None,
            start_loc: Location::N,
            end_loc: Location::S,
            start_ori: Orientation::Out,
            end_ori: Orientation::Out,
        };
        let seq = sequence_of(vec![anti_beat(Orientation::In), bad]);
        let err = repair(&seq).unwrap_err();
        assert!(matches!(err, TkaError::AtBeat { index: 1, .. }));
        assert!(matches!(err.root_cause(), TkaError::InvalidMotion(_)));
        // validate still produces a report
        let _ = validate(&seq);
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    fn arb_orientation() -> impl Strategy<Value = Orientation> {
        prop::sample::select(Orientation::all().to_vec())
    }

    fn arb_motion() -> impl Strategy<Value = Motion> {
        (
            prop::sample::select(vec![
                MotionType::Pro,
                MotionType::Anti,
                MotionType::Static,
                MotionType::Dash,
            ]),
            0u16..7,
            prop::sample::select(vec![
                RotationDirection::Clockwise,
                RotationDirection::CounterClockwise,
            ]),
            prop::sample::select(Location::all().to_vec()),
            prop::sample::select(Location::all().to_vec()),
            arb_orientation(),
            arb_orientation(),
        )
            .prop_map(|(motion_type, halves, rot, start_loc, end_loc, start_ori, end_ori)| {
                Motion {
                    motion_type,
                    turns: Turns::from_halves(halves),
                    prop_rot_dir: rot,
                    start_loc,
                    end_loc,
                    start_ori,
                    end_ori,
                }
            })
    }

    fn arb_sequence() -> impl Strategy<Value = Sequence> {
        prop::collection::vec((arb_motion(), arb_motion()), 0..12).prop_map(|pairs| {
            sequence_of(
                pairs
                    .into_iter()
                    .map(|(blue, red)| Beat::new("X", blue, red))
                    .collect(),
            )
        })
    }

    proptest! {
        #[test]
        fn repair_leaves_no_discontinuities(seq in arb_sequence()) {
            let repaired = repair(&seq).unwrap();
            prop_assert!(validate(&repaired).is_continuous());
        }

        #[test]
        fn repair_is_idempotent(seq in arb_sequence()) {
            let once = repair(&seq).unwrap();
            let twice = repair(&once).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn repair_keeps_first_beat_starts(seq in arb_sequence()) {
            let repaired = repair(&seq).unwrap();
            if let (Some(before), Some(after)) = (seq.beats.first(), repaired.beats.first()) {
                prop_assert_eq!(before.blue.start_ori, after.blue.start_ori);
                prop_assert_eq!(before.red.start_ori, after.red.start_ori);
            }
        }
    }
}
