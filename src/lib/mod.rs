//! Shared library modules providing error types, path resolution, prefix helpers, and telemetry initialization.

pub mod errors;
pub mod fs;
pub mod paths;
pub mod telemetry;
