//! Error types produced while projecting and merging entities.

mod aggregate;
mod constructors;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::{Accessor, ModelError};

#[cfg(test)]
mod tests;
