//! Library crate root re-exporting the launcher modules.

#[path = "lib/mod.rs"]
pub mod lib_mod;
pub use lib_mod as lib;
pub mod cli;
pub mod launch;
pub mod runtime;
pub mod store;
