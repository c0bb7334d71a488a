//! Utilities shared by the command layer

pub mod command_helpers;
pub mod logging;
