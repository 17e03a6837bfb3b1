//! Command-line front end of the GitHub repository importer.
//!
//! The command implementations are exposed as a library so they can be
//! exercised without spawning the binary.

pub mod commands;
pub mod config;
pub mod errors;
pub mod output;
