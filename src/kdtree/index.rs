use tracing::trace;

use crate::coord::IndexCoord;
use crate::error::{PointIndexError, Result};
use crate::kdtree::node::Node;
use crate::point::Point;

/// An owned k-d tree over integer points.
///
/// The tree exclusively owns its node graph: each node is uniquely owned by
/// its parent and the root by the tree. Query methods hand out borrowed
/// references to stored points; dropping a result list never affects node
/// lifetime.
///
/// Insertion splits on a rotating axis (`depth mod k`) without rebalancing,
/// so the same point multiset inserted in different orders yields different
/// shapes. Query result sets are insertion-order independent; see the query
/// methods in this module.
#[derive(Debug)]
pub struct KdTree<C: IndexCoord> {
    pub(crate) dim: usize,
    pub(crate) root: Option<Box<Node<C>>>,
    len: usize,
}

impl<C: IndexCoord> KdTree<C> {
    /// Create an empty tree of the given dimension.
    ///
    /// Returns [`PointIndexError::InvalidDimension`] when `dim` is zero.
    pub fn new(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(PointIndexError::InvalidDimension {
                expected: 1,
                actual: 0,
            });
        }
        Ok(Self {
            dim,
            root: None,
            len: 0,
        })
    }

    /// The dimension `k` every stored point has.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The number of stored points.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no points.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Insert a point, consuming it.
    ///
    /// Descends from the root at level 0, comparing the point to each node on
    /// axis `level mod k`: strictly less goes left, greater-or-equal goes
    /// right. The point becomes a new leaf in the first empty child slot
    /// reached (or the root of an empty tree). Duplicate points are stored
    /// again, on the right of their equal.
    ///
    /// Returns [`PointIndexError::InvalidDimension`] when the point does not
    /// have exactly `k` coordinates; the tree is unchanged in that case.
    pub fn insert(&mut self, point: Point<C>) -> Result<()> {
        if point.dim() != self.dim {
            return Err(PointIndexError::InvalidDimension {
                expected: self.dim,
                actual: point.dim(),
            });
        }

        let mut slot = &mut self.root;
        let mut level = 0usize;
        while let Some(node) = slot {
            let axis = level % self.dim;
            slot = if point.coord(axis) < node.point.coord(axis) {
                &mut node.left
            } else {
                &mut node.right
            };
            level += 1;
        }
        trace!(depth = level, "attaching point");
        *slot = Some(Box::new(Node::new(point)));
        self.len += 1;
        Ok(())
    }

    /// Iterate over every stored point in pre-order (node, left subtree,
    /// right subtree). This is the visiting order of both query algorithms
    /// and of the `DEBUG` dump.
    pub fn iter(&self) -> PreOrderIter<'_, C> {
        PreOrderIter {
            stack: self.root.as_deref().into_iter().collect(),
        }
    }
}

/// Pre-order iterator over the points of a [`KdTree`].
#[derive(Debug)]
pub struct PreOrderIter<'a, C: IndexCoord> {
    stack: Vec<&'a Node<C>>,
}

impl<'a, C: IndexCoord> Iterator for PreOrderIter<'a, C> {
    type Item = &'a Point<C>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right pushed first so the left subtree is drained before it.
        if let Some(right) = node.right.as_deref() {
            self.stack.push(right);
        }
        if let Some(left) = node.left.as_deref() {
            self.stack.push(left);
        }
        Some(&node.point)
    }
}

impl<C: IndexCoord> Drop for KdTree<C> {
    /// Iterative teardown with an explicit stack. Skewed trees reach depths
    /// equal to their length, so the default recursive drop of the
    /// `Box<Node>` chain could overflow the call stack.
    fn drop(&mut self) {
        let mut stack = Vec::new();
        if let Some(root) = self.root.take() {
            stack.push(root);
        }
        while let Some(mut node) = stack.pop() {
            if let Some(left) = node.left.take() {
                stack.push(left);
            }
            if let Some(right) = node.right.take() {
                stack.push(right);
            }
        }
    }
}
