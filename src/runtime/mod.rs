//! Invocation dispatch and exit reporting.
mod startup;

pub use startup::{run, RuntimeExit};
