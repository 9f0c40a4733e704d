#![doc = include_str!("../README.md")]

pub mod command;
mod coord;
mod error;
pub mod kdtree;
pub mod loader;
mod point;
pub mod session;

pub use coord::IndexCoord;
pub use error::{PointIndexError, Result};
pub use kdtree::KdTree;
pub use point::Point;
pub use session::Session;
