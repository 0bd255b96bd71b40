//! Crate-level scenario tests.
//!
//! - `integration.rs`: End-to-end battles through the public API
//! - `determinism.rs`: Identical setups produce identical battles
//! - `properties.rs`: Property tests for geometry, targeting and health
//! - `helpers.rs`: Factory functions and report queries

mod determinism;
mod helpers;
