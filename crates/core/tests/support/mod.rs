//! Shared test helpers for `convene-core` integration tests.
//!
//! Fixtures and an in-memory repository so scheduling tests can focus on
//! behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod fixtures;
pub mod repositories;
