mod error;
pub mod pipeline;
mod sample;
pub mod speed;
mod watcher;

pub use error::{ComputationError, RunError};
pub use pipeline::{record, run, run_once, run_serialized};
pub use sample::{Observation, Sample};
pub use watcher::{watch, watch_until};
