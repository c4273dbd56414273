//! pomedit CLI library components.
//!
//! This crate provides the command-line interface for editing Maven POM files.
//! The main binary is in `main.rs`.

pub mod commands;
pub mod config;
pub mod logging;

// Re-export core types for convenience
pub use pomedit_core::{Document, Error, ErrorKind};
