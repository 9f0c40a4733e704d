use std::fmt;

use crate::coord::IndexCoord;

/// An immutable, fixed-arity point record.
///
/// A point is an ordered sequence of `k` signed integer coordinates. The
/// arity is fixed at creation and the coordinates never change afterwards;
/// the tree clones points on insertion and hands out shared references from
/// queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point<C: IndexCoord> {
    coords: Box<[C]>,
}

impl<C: IndexCoord> Point<C> {
    /// Create a point from its coordinates.
    pub fn new(coords: impl Into<Box<[C]>>) -> Self {
        Self {
            coords: coords.into(),
        }
    }

    /// The number of coordinates.
    pub fn dim(&self) -> usize {
        self.coords.len()
    }

    /// The coordinate on the given axis.
    ///
    /// Panics if `axis >= self.dim()`; internal callers always pass an axis
    /// reduced modulo the tree dimension.
    #[inline]
    pub fn coord(&self, axis: usize) -> C {
        self.coords[axis]
    }

    /// The coordinates as a slice.
    pub fn as_slice(&self) -> &[C] {
        &self.coords
    }
}

impl<C: IndexCoord> fmt::Display for Point<C> {
    /// Space-separated coordinates, the wire format of the command loop.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl<C: IndexCoord> From<Vec<C>> for Point<C> {
    fn from(coords: Vec<C>) -> Self {
        Self::new(coords)
    }
}
