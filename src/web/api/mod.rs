pub mod error;
pub mod samples;
