//! # Convene App
//!
//! Command-line application layer.
//!
//! This crate contains:
//! - The `clap` command definitions
//! - Application context (dependency injection)
//! - Command handlers and output rendering
//!
//! ## Architecture
//! - Depends on `common`, `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - The `convene` binary is a thin shell over this library

pub mod cli;
pub mod commands;
pub mod context;
pub mod output;
pub mod utils;

// Re-export for convenience
pub use cli::Cli;
pub use commands::execute;
pub use context::AppContext;
pub use output::Outcome;
