//! An owned k-d tree over integer points with exhaustive-scan queries.

#![warn(missing_docs)]

pub mod constants;
mod index;
mod node;
mod query;

pub use index::{KdTree, PreOrderIter};
pub use query::legacy_planar_order;

#[cfg(test)]
mod test;
