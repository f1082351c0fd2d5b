//! Reconstruction of nested trees from flat key/value tables.
//!
//! A flat table stores a hierarchy by encoding each path in its keys, for
//! example `cfg.db.host = localhost`. [`TreeBuilder`] splits the keys back into
//! segments and folds the resulting single-path trees together with the
//! distinct merge, yielding a [`Tree`] where every path's terminal value sits
//! in the reserved [`Slot::Value`] slot.

mod builder;
mod env;
mod node;

pub use builder::{Precedence, TreeBuilder, build_tree};
pub use env::EnvTable;
pub use node::{LEAF_KEY, Node, Slot, Tree};

#[cfg(test)]
mod tests;
