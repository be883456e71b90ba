use crate::error::Result;
use crate::orientation::compute_end_orientation;
use crate::types::{Location, MotionType, Orientation, RotationDirection, Turns};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Hand path
// ---------------------------------------------------------------------------

/// Direction the hand travels from `start` to `end` around the grid.
///
/// Staying put (static) and crossing through the centre (dash) have no
/// direction.
pub fn hand_path_direction(start: Location, end: Location) -> RotationDirection {
    match start.steps_to(end) {
        0 | 4 => RotationDirection::None,
        1..=3 => RotationDirection::Clockwise,
        _ => RotationDirection::CounterClockwise,
    }
}

// ---------------------------------------------------------------------------
// Motion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motion {
    pub motion_type: MotionType,
    #[serde(default)]
    pub turns: Turns,
    pub prop_rot_dir: RotationDirection,
    pub start_loc: Location,
    pub end_loc: Location,
    pub start_ori: Orientation,
    pub end_ori: Orientation,
}

impl Motion {
    /// Build a motion with its end orientation derived from the rest.
    pub fn new(
        motion_type: MotionType,
        turns: Turns,
        prop_rot_dir: RotationDirection,
        start_loc: Location,
        end_loc: Location,
        start_ori: Orientation,
    ) -> Result<Self> {
        let mut motion = Self {
            motion_type,
            turns,
            prop_rot_dir,
            start_loc,
            end_loc,
            start_ori,
            end_ori: start_ori,
        };
        motion.end_ori = motion.derive_end_orientation()?;
        Ok(motion)
    }

    /// A prop held in place at `loc`, used for start positions.
    pub fn held(loc: Location, ori: Orientation) -> Self {
        Self {
            motion_type: MotionType::Static,
            turns: Turns::ZERO,
            prop_rot_dir: RotationDirection::None,
            start_loc: loc,
            end_loc: loc,
            start_ori: ori,
            end_ori: ori,
        }
    }

    pub fn hand_path(&self) -> RotationDirection {
        hand_path_direction(self.start_loc, self.end_loc)
    }

    /// The end orientation implied by this motion's type, turns and start.
    pub fn derive_end_orientation(&self) -> Result<Orientation> {
        let rotation = match self.motion_type {
            MotionType::Float => self.hand_path(),
            _ => self.prop_rot_dir,
        };
        compute_end_orientation(self.motion_type, self.turns, rotation, self.start_ori)
    }

    /// The derived end orientation, or the stored `end_ori` when the motion
    /// is underivable (e.g. a float with no hand path).
    pub fn end_orientation_or_stored(&self) -> Orientation {
        match self.derive_end_orientation() {
            Ok(end) => end,
            Err(e) => {
                tracing::warn!(
                    motion_type = %self.motion_type,
                    error = %e,
                    "cannot derive end orientation, using stored value"
                );
                self.end_ori
            }
        }
    }

    /// Re-derive `end_ori` from the current fields. Returns true if it changed.
    pub fn refresh_end_orientation(&mut self) -> Result<bool> {
        let end = self.derive_end_orientation()?;
        let changed = end != self.end_ori;
        self.end_ori = end;
        Ok(changed)
    }

    /// Force the start orientation and re-derive the end orientation.
    pub fn restart_from(&mut self, start_ori: Orientation) -> Result<()> {
        self.start_ori = start_ori;
        self.refresh_end_orientation()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hand_path_directions() {
        assert_eq!(hand_path_direction(Location::N, Location::E), RotationDirection::Clockwise);
        assert_eq!(
            hand_path_direction(Location::N, Location::W),
            RotationDirection::CounterClockwise
        );
        assert_eq!(hand_path_direction(Location::Ne, Location::Se), RotationDirection::Clockwise);
        assert_eq!(hand_path_direction(Location::S, Location::S), RotationDirection::None);
        assert_eq!(hand_path_direction(Location::S, Location::N), RotationDirection::None);
    }

    #[test]
    fn new_derives_end_orientation() {
        let m = Motion::new(
            MotionType::Anti,
            Turns::ZERO,
            RotationDirection::Clockwise,
            Location::S,
            Location::W,
            Orientation::In,
        )
        .unwrap();
        assert_eq!(m.end_ori, Orientation::Out);
    }

    #[test]
    fn float_uses_hand_path_not_prop_rotation() {
        let m = Motion::new(
            MotionType::Float,
            Turns::ZERO,
            RotationDirection::None,
            Location::N,
            Location::E,
            Orientation::In,
        )
        .unwrap();
        assert_eq!(m.end_ori, Orientation::Counter);
    }

    #[test]
    fn float_without_hand_path_fails() {
        let err = Motion::new(
            MotionType::Float,
            Turns::ZERO,
            RotationDirection::None,
            Location::N,
            Location::S,
            Orientation::In,
        )
        .unwrap_err();
        assert!(matches!(err, crate::error::TkaError::InvalidMotion(_)));
    }

    #[test]
    fn restart_from_recomputes_end() {
        let mut m = Motion::new(
            MotionType::Pro,
            Turns::whole(1),
            RotationDirection::Clockwise,
            Location::N,
            Location::E,
            Orientation::In,
        )
        .unwrap();
        assert_eq!(m.end_ori, Orientation::Out);
        m.restart_from(Orientation::Out).unwrap();
        assert_eq!(m.start_ori, Orientation::Out);
        assert_eq!(m.end_ori, Orientation::In);
    }

    #[test]
    fn held_motion_is_continuous_with_itself() {
        let m = Motion::held(Location::S, Orientation::Clock);
        assert_eq!(m.derive_end_orientation().unwrap(), Orientation::Clock);
    }
}
