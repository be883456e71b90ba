use crate::error::{Result, TkaError};
use crate::motion::Motion;
use crate::types::{Actor, ByActor, Location, Orientation};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// LocationPair
// ---------------------------------------------------------------------------

/// The grid locations of both props, written `"<blue>_<red>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocationPair {
    pub blue: Location,
    pub red: Location,
}

impl LocationPair {
    pub fn new(blue: Location, red: Location) -> Self {
        Self { blue, red }
    }

    pub fn get(&self, actor: Actor) -> Location {
        match actor {
            Actor::Blue => self.blue,
            Actor::Red => self.red,
        }
    }

    /// Named grid position (`alpha1`, `beta5`, `gamma11`, ...), if the pair
    /// is one of the 32 standard positions.
    pub fn grid_position(&self) -> Option<String> {
        let blue = self.blue.index();
        let (family, number) = match self.blue.steps_to(self.red) {
            4 => ("alpha", (blue + 4) % 8 + 1),
            0 => ("beta", blue + 1),
            2 => ("gamma", (blue + 2) % 8 + 1),
            6 => ("gamma", (blue + 6) % 8 + 9),
            _ => return None,
        };
        Some(format!("{family}{number}"))
    }
}

fn location_at(index: usize) -> Location {
    Location::all()[index % 8]
}

static GRID_RE: OnceLock<Regex> = OnceLock::new();

fn grid_re() -> &'static Regex {
    GRID_RE.get_or_init(|| Regex::new(r"^(alpha|beta|gamma)([1-9][0-9]?)$").unwrap())
}

/// Resolve a named grid position to its location pair.
pub fn grid_position_pair(name: &str) -> Result<LocationPair> {
    let invalid = || TkaError::InvalidPosition(name.to_string());
    let caps = grid_re().captures(name).ok_or_else(invalid)?;
    let number: usize = caps[2].parse().map_err(|_| invalid())?;
    let pair = match (&caps[1], number) {
        ("alpha", 1..=8) => {
            let blue = number + 3;
            (blue, blue + 4)
        }
        ("beta", 1..=8) => (number - 1, number - 1),
        ("gamma", 1..=8) => {
            let blue = number + 5;
            (blue, blue + 2)
        }
        ("gamma", 9..=16) => {
            let blue = number - 7;
            (blue, blue + 6)
        }
        _ => return Err(invalid()),
    };
    Ok(LocationPair::new(location_at(pair.0), location_at(pair.1)))
}

impl fmt::Display for LocationPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.blue, self.red)
    }
}

impl std::str::FromStr for LocationPair {
    type Err = TkaError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.split_once('_') {
            Some((blue, red)) => Ok(LocationPair::new(
                blue.parse().map_err(|_| TkaError::InvalidPosition(s.to_string()))?,
                red.parse().map_err(|_| TkaError::InvalidPosition(s.to_string()))?,
            )),
            None => grid_position_pair(&s.to_ascii_lowercase()),
        }
    }
}

impl TryFrom<String> for LocationPair {
    type Error = TkaError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LocationPair> for String {
    fn from(pair: LocationPair) -> String {
        pair.to_string()
    }
}

// ---------------------------------------------------------------------------
// EndState
// ---------------------------------------------------------------------------

/// Where a sequence currently stands: the state the next beat must start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndState {
    pub orientation: ByActor<Orientation>,
    pub location: LocationPair,
}

// ---------------------------------------------------------------------------
// Beat
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beat {
    pub letter: String,
    pub start_position: LocationPair,
    pub end_position: LocationPair,
    pub blue: Motion,
    pub red: Motion,
}

impl Beat {
    /// Build a beat whose position keys are taken from its motions.
    pub fn new(letter: impl Into<String>, blue: Motion, red: Motion) -> Self {
        Self {
            letter: letter.into(),
            start_position: LocationPair::new(blue.start_loc, red.start_loc),
            end_position: LocationPair::new(blue.end_loc, red.end_loc),
            blue,
            red,
        }
    }

    pub fn motion(&self, actor: Actor) -> &Motion {
        match actor {
            Actor::Blue => &self.blue,
            Actor::Red => &self.red,
        }
    }

    pub fn motion_mut(&mut self, actor: Actor) -> &mut Motion {
        match actor {
            Actor::Blue => &mut self.blue,
            Actor::Red => &mut self.red,
        }
    }

    /// Start locations as carried by the motions themselves.
    pub fn start_locations(&self) -> LocationPair {
        LocationPair::new(self.blue.start_loc, self.red.start_loc)
    }

    pub fn end_locations(&self) -> LocationPair {
        LocationPair::new(self.blue.end_loc, self.red.end_loc)
    }

    /// True when the position keys agree with the motions' locations.
    pub fn positions_agree(&self) -> bool {
        self.start_position == self.start_locations() && self.end_position == self.end_locations()
    }

    /// Where this beat leaves both props. End orientations are re-derived so
    /// a stale `end_ori` cannot leak into the next beat.
    pub fn end_state(&self) -> EndState {
        EndState {
            orientation: ByActor::new(
                self.blue.end_orientation_or_stored(),
                self.red.end_orientation_or_stored(),
            ),
            location: self.end_locations(),
        }
    }
}

// ---------------------------------------------------------------------------
// StartPosition
// ---------------------------------------------------------------------------

/// The chosen opening of a sequence, before its first beat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartPosition {
    #[serde(default)]
    pub letter: String,
    pub position: LocationPair,
    pub orientation: ByActor<Orientation>,
}

impl StartPosition {
    pub fn new(position: LocationPair, blue_ori: Orientation, red_ori: Orientation) -> Self {
        Self {
            letter: String::new(),
            position,
            orientation: ByActor::new(blue_ori, red_ori),
        }
    }

    pub fn state(&self) -> EndState {
        EndState {
            orientation: self.orientation,
            location: self.position,
        }
    }

    /// The start position expressed as a held beat.
    pub fn as_beat(&self) -> Beat {
        Beat::new(
            self.letter.clone(),
            Motion::held(self.position.blue, self.orientation.blue),
            Motion::held(self.position.red, self.orientation.red),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
