pub mod beat;
pub mod config;
pub mod continuity;
pub mod document;
pub mod error;
pub mod io;
pub mod legacy;
pub mod motion;
pub mod options;
pub mod orientation;
pub mod paths;
pub mod sequence;
pub mod types;

pub use error::{Result, TkaError};
