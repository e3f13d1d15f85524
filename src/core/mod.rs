//! Core types and constants for geofence evaluation

pub mod types;
pub mod constants;
pub mod error;

pub use types::*;
pub use constants::*;
pub use error::{GeoError, GeoResult};
