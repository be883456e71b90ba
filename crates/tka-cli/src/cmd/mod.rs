pub mod config;
pub mod options;
pub mod orient;
pub mod position;
pub mod repair;
pub mod validate;
