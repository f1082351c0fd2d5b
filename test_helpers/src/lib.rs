//! Test helpers shared across crates.
//!
//! Provides the inverse of tree building, turning a rendered tree back into a
//! flat table, `proptest` strategies producing trees that survive that round
//! trip, and a `figment::Jail` wrapper for tests touching the environment.

pub mod figment;
pub mod strategies;
pub mod tree;
