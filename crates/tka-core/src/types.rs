use crate::error::TkaError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Orientation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    In,
    Out,
    Clock,
    Counter,
}

/// Quarter-turn cycle of prop orientations, clockwise.
const ORIENTATION_CYCLE: [Orientation; 4] = [
    Orientation::In,
    Orientation::Counter,
    Orientation::Out,
    Orientation::Clock,
];

impl Orientation {
    pub fn all() -> &'static [Orientation] {
        &[
            Orientation::In,
            Orientation::Out,
            Orientation::Clock,
            Orientation::Counter,
        ]
    }

    /// Flip to the opposite orientation: `in <-> out`, `clock <-> counter`.
    pub fn switch(self) -> Orientation {
        match self {
            Orientation::In => Orientation::Out,
            Orientation::Out => Orientation::In,
            Orientation::Clock => Orientation::Counter,
            Orientation::Counter => Orientation::Clock,
        }
    }

    pub fn is_radial(self) -> bool {
        matches!(self, Orientation::In | Orientation::Out)
    }

    /// Rotate by `steps` quarter turns along the clockwise cycle
    /// `in -> counter -> out -> clock`. Negative steps rotate back.
    pub fn rotate_quarters(self, steps: i32) -> Orientation {
        let index = ORIENTATION_CYCLE
            .iter()
            .position(|o| *o == self)
            .unwrap_or(0) as i32;
        ORIENTATION_CYCLE[(index + steps).rem_euclid(4) as usize]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::In => "in",
            Orientation::Out => "out",
            Orientation::Clock => "clock",
            Orientation::Counter => "counter",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Orientation {
    type Err = TkaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "in" => Ok(Orientation::In),
            "out" => Ok(Orientation::Out),
            "clock" => Ok(Orientation::Clock),
            "counter" => Ok(Orientation::Counter),
            _ => Err(TkaError::InvalidOrientation(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// MotionType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionType {
    Pro,
    Anti,
    Static,
    Dash,
    Float,
}

impl MotionType {
    pub fn all() -> &'static [MotionType] {
        &[
            MotionType::Pro,
            MotionType::Anti,
            MotionType::Static,
            MotionType::Dash,
            MotionType::Float,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MotionType::Pro => "pro",
            MotionType::Anti => "anti",
            MotionType::Static => "static",
            MotionType::Dash => "dash",
            MotionType::Float => "float",
        }
    }
}

impl fmt::Display for MotionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MotionType {
    type Err = TkaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pro" => Ok(MotionType::Pro),
            "anti" => Ok(MotionType::Anti),
            "static" => Ok(MotionType::Static),
            "dash" => Ok(MotionType::Dash),
            "float" => Ok(MotionType::Float),
            _ => Err(TkaError::InvalidMotion(format!("unknown motion type '{s}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// RotationDirection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationDirection {
    #[serde(rename = "cw", alias = "clockwise")]
    Clockwise,
    #[serde(rename = "ccw", alias = "counter_clockwise")]
    CounterClockwise,
    #[serde(rename = "no_rot", alias = "none")]
    None,
}

impl RotationDirection {
    pub fn all() -> &'static [RotationDirection] {
        &[
            RotationDirection::Clockwise,
            RotationDirection::CounterClockwise,
            RotationDirection::None,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RotationDirection::Clockwise => "cw",
            RotationDirection::CounterClockwise => "ccw",
            RotationDirection::None => "no_rot",
        }
    }
}

impl fmt::Display for RotationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RotationDirection {
    type Err = TkaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cw" | "clockwise" => Ok(RotationDirection::Clockwise),
            "ccw" | "counter_clockwise" | "counterclockwise" => {
                Ok(RotationDirection::CounterClockwise)
            }
            "no_rot" | "norotation" | "none" | "" => Ok(RotationDirection::None),
            _ => Err(TkaError::InvalidMotion(format!(
                "unknown rotation direction '{s}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl Location {
    /// Compass order, clockwise from north.
    pub fn all() -> &'static [Location] {
        &[
            Location::N,
            Location::Ne,
            Location::E,
            Location::Se,
            Location::S,
            Location::Sw,
            Location::W,
            Location::Nw,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Number of eighth-steps clockwise from `self` to `other` (0..8).
    pub fn steps_to(self, other: Location) -> usize {
        (other.index() + 8 - self.index()) % 8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Location::N => "n",
            Location::Ne => "ne",
            Location::E => "e",
            Location::Se => "se",
            Location::S => "s",
            Location::Sw => "sw",
            Location::W => "w",
            Location::Nw => "nw",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Location {
    type Err = TkaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "n" => Ok(Location::N),
            "ne" => Ok(Location::Ne),
            "e" => Ok(Location::E),
            "se" => Ok(Location::Se),
            "s" => Ok(Location::S),
            "sw" => Ok(Location::Sw),
            "w" => Ok(Location::W),
            "nw" => Ok(Location::Nw),
            _ => Err(TkaError::InvalidLocation(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Actor
// ---------------------------------------------------------------------------

/// One of the two independently tracked props in a beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    Blue,
    Red,
}

impl Actor {
    pub fn all() -> &'static [Actor] {
        &[Actor::Blue, Actor::Red]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Actor::Blue => "blue",
            Actor::Red => "red",
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value held once per actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ByActor<T> {
    pub blue: T,
    pub red: T,
}

impl<T> ByActor<T> {
    pub fn new(blue: T, red: T) -> Self {
        Self { blue, red }
    }

    pub fn get(&self, actor: Actor) -> &T {
        match actor {
            Actor::Blue => &self.blue,
            Actor::Red => &self.red,
        }
    }
}

// ---------------------------------------------------------------------------
// Turns
// ---------------------------------------------------------------------------

/// Number of prop turns in a motion, a non-negative multiple of one half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Turns {
    halves: u16,
}

impl Turns {
    pub const ZERO: Turns = Turns { halves: 0 };

    pub fn whole(turns: u16) -> Self {
        Self { halves: turns * 2 }
    }

    pub fn from_halves(halves: u16) -> Self {
        Self { halves }
    }

    pub fn halves(self) -> u16 {
        self.halves
    }

    pub fn is_whole(self) -> bool {
        self.halves % 2 == 0
    }

    /// True for 0, 2, 4, ... whole turns. Half turns are neither even nor odd.
    pub fn is_even(self) -> bool {
        self.halves % 4 == 0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.halves) / 2.0
    }
}

impl TryFrom<f64> for Turns {
    type Error = TkaError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let doubled = value * 2.0;
        if !value.is_finite() || value < 0.0 || doubled.fract() != 0.0 || doubled > f64::from(u16::MAX)
        {
            return Err(TkaError::InvalidTurns(value.to_string()));
        }
        Ok(Turns {
            halves: doubled as u16,
        })
    }
}

impl From<Turns> for f64 {
    fn from(turns: Turns) -> f64 {
        turns.as_f64()
    }
}

impl fmt::Display for Turns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_whole() {
            write!(f, "{}", self.halves / 2)
        } else {
            write!(f, "{}.5", self.halves / 2)
        }
    }
}

impl std::str::FromStr for Turns {
    type Err = TkaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| TkaError::InvalidTurns(s.to_string()))?;
        Turns::try_from(value)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
