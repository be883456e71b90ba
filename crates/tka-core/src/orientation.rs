//! End-orientation rules for a single motion.
//!
//! Whole turns follow a parity rule per motion family. Half turns move the
//! prop a quarter step at a time around the cycle `in -> counter -> out ->
//! clock`, so they always land on the other radial class.

use crate::error::{Result, TkaError};
use crate::types::{MotionType, Orientation, RotationDirection, Turns};

/// Compute the orientation a prop ends in after one motion.
///
/// For `float` motions `rotation_direction` is the hand-path direction,
/// since a float has no prop rotation of its own (see
/// [`crate::motion::Motion::derive_end_orientation`]).
pub fn compute_end_orientation(
    motion_type: MotionType,
    turns: Turns,
    rotation_direction: RotationDirection,
    start_orientation: Orientation,
) -> Result<Orientation> {
    match motion_type {
        MotionType::Static | MotionType::Dash
            if rotation_direction == RotationDirection::None =>
        {
            Ok(start_orientation)
        }
        MotionType::Float => float_end(rotation_direction, start_orientation),
        MotionType::Pro | MotionType::Static => {
            rotating_end(motion_type, Family::Pro, turns, rotation_direction, start_orientation)
        }
        MotionType::Anti | MotionType::Dash => {
            rotating_end(motion_type, Family::Anti, turns, rotation_direction, start_orientation)
        }
    }
}

#[derive(Clone, Copy)]
enum Family {
    Pro,
    Anti,
}

fn rotating_end(
    motion_type: MotionType,
    family: Family,
    turns: Turns,
    rotation_direction: RotationDirection,
    start: Orientation,
) -> Result<Orientation> {
    if turns.is_whole() {
        let flips = match family {
            Family::Pro => !turns.is_even(),
            Family::Anti => turns.is_even(),
        };
        return Ok(if flips { start.switch() } else { start });
    }

    let halves = i32::from(turns.halves() % 4);
    let steps = match (family, rotation_direction) {
        (Family::Pro, RotationDirection::Clockwise) => halves,
        (Family::Pro, RotationDirection::CounterClockwise) => -halves,
        (Family::Anti, RotationDirection::Clockwise) => 2 + halves,
        (Family::Anti, RotationDirection::CounterClockwise) => 2 - halves,
        (_, RotationDirection::None) => {
            return Err(TkaError::InvalidMotion(format!(
                "{motion_type} with {turns} turns needs a rotation direction"
            )));
        }
    };
    Ok(start.rotate_quarters(steps))
}

fn float_end(hand_path: RotationDirection, start: Orientation) -> Result<Orientation> {
    match hand_path {
        RotationDirection::Clockwise => Ok(start.rotate_quarters(1)),
        RotationDirection::CounterClockwise => Ok(start.rotate_quarters(-1)),
        RotationDirection::None => Err(TkaError::InvalidMotion(
            "float needs a clockwise or counter-clockwise hand path".to_string(),
        )),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
