//! # Convene Domain
//!
//! Business domain types and models for Convene.
//!
//! This crate contains:
//! - Meeting, interval, user and conflict types
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Candidate validation rules
//!
//! ## Architecture
//! - No dependencies on other Convene crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use validation::validate_candidate;
