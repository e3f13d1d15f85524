//! Platform location service abstraction
//!
//! The crate never talks to GPS hardware. Hosts implement [`PositionWatcher`]
//! over whatever geolocation layer they have; [`MockPositionWatcher`] is a
//! scripted implementation for tests and demos.

pub mod watcher;
pub mod mock;
pub mod error;

pub use watcher::{
    locate, Accuracy, ErrorCallback, PositionOptions, PositionWatcher, SampleCallback, WatchHandle,
};
pub use mock::MockPositionWatcher;
pub use error::{PositionError, PositionResult};
