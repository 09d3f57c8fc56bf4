//! Testing infrastructure for atif integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `TestWorld`: isolated logs directory plus CLI execution
//! - `assertions`: trajectory invariant assertions
//! - `fixtures`: JSON-lines log generation

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use fixtures::LogBuilder;
pub use world::TestWorld;
