use crate::coord::IndexCoord;
use crate::point::Point;

/// A tree node: one point plus exclusively owned optional children.
///
/// Nodes form a strict ownership tree. A node is created once at insertion,
/// never mutated afterwards, and destroyed only when the whole tree is torn
/// down.
#[derive(Debug)]
pub(crate) struct Node<C: IndexCoord> {
    pub(crate) point: Point<C>,
    pub(crate) left: Option<Box<Node<C>>>,
    pub(crate) right: Option<Box<Node<C>>>,
}

impl<C: IndexCoord> Node<C> {
    pub(crate) fn new(point: Point<C>) -> Self {
        Self {
            point,
            left: None,
            right: None,
        }
    }
}
