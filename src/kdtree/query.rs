//! Exhaustive-scan queries over the tree.
//!
//! Both queries visit every stored node in pre-order instead of pruning by
//! the splitting discipline. The nearest-neighbor tie sets observable through
//! [`KdTree::nearest_neighbors`] depend on that visiting order, so a pruned
//! search would not be behavior-preserving and is deliberately absent.

use std::cmp::Ordering;
use std::ptr;

use tracing::trace;

use crate::coord::IndexCoord;
use crate::error::{PointIndexError, Result};
use crate::kdtree::constants::TIE_TOLERANCE;
use crate::kdtree::KdTree;
use crate::point::Point;

impl<C: IndexCoord> KdTree<C> {
    /// Exhaustive nearest-neighbor scan with approximate ties.
    ///
    /// Seeds the running best with the root's distance to `target`, then
    /// visits every node in pre-order. A node whose distance is within
    /// [`TIE_TOLERANCE`] of the running best joins the candidate list; a node
    /// strictly closer than that replaces it and resets the best distance.
    /// The tie check runs first, so an improvement smaller than the tolerance
    /// never lowers the best distance. The root enters the candidates through
    /// its own visit, a guaranteed tie against the seed.
    ///
    /// Returns the candidates in [`legacy_planar_order`]. An empty tree
    /// yields an empty list; a `target` of the wrong arity is
    /// [`PointIndexError::InvalidDimension`].
    pub fn nearest_neighbors(&self, target: &Point<C>) -> Result<Vec<&Point<C>>> {
        if target.dim() != self.dim {
            return Err(PointIndexError::InvalidDimension {
                expected: self.dim,
                actual: target.dim(),
            });
        }
        let root = match self.root.as_deref() {
            Some(root) => root,
            None => return Ok(Vec::new()),
        };

        let mut best = euclidean_distance(&root.point, target);
        let mut candidates: Vec<&Point<C>> = Vec::new();
        for point in self.iter() {
            let d = euclidean_distance(point, target);
            if (d - best).abs() < TIE_TOLERANCE {
                candidates.try_reserve(1)?;
                candidates.push(point);
            } else if d < best {
                best = d;
                candidates.clear();
                candidates.push(point);
            }
        }
        trace!(best_distance = best, ties = candidates.len(), "nn scan done");

        candidates.sort_by(|a, b| legacy_planar_order(a, b));
        Ok(candidates)
    }

    /// Exhaustive hyperrectangle range search, growing its result list as
    /// needed.
    ///
    /// `bounds` holds one inclusive `(min, max)` pair per axis. Every node is
    /// visited in pre-order regardless of whether its ancestors matched; a
    /// node qualifies when each coordinate lies within its axis bounds,
    /// inclusive on both ends. Qualifying nodes are deduplicated by node
    /// identity, so equal points from distinct insertions are all returned.
    ///
    /// Results come back in [`legacy_planar_order`]. Bounds of the wrong
    /// arity are [`PointIndexError::InvalidDimension`].
    pub fn range_search(&self, bounds: &[(C, C)]) -> Result<Vec<&Point<C>>> {
        self.range_search_impl(bounds, None)
    }

    /// [`range_search`](Self::range_search) with a hard cap on the result
    /// count.
    ///
    /// Fails with [`PointIndexError::Capacity`] as soon as a match would push
    /// the result list past `max_results`; the container is never silently
    /// truncated or overrun.
    pub fn range_search_bounded(
        &self,
        bounds: &[(C, C)],
        max_results: usize,
    ) -> Result<Vec<&Point<C>>> {
        self.range_search_impl(bounds, Some(max_results))
    }

    fn range_search_impl(
        &self,
        bounds: &[(C, C)],
        max_results: Option<usize>,
    ) -> Result<Vec<&Point<C>>> {
        if bounds.len() != self.dim {
            return Err(PointIndexError::InvalidDimension {
                expected: self.dim,
                actual: bounds.len(),
            });
        }

        let mut results: Vec<&Point<C>> = Vec::new();
        for point in self.iter() {
            let in_range = bounds.iter().enumerate().all(|(axis, &(min, max))| {
                let c = point.coord(axis);
                min <= c && c <= max
            });
            if !in_range {
                continue;
            }
            if results.iter().any(|p| ptr::eq(*p, point)) {
                continue;
            }
            if let Some(limit) = max_results {
                if results.len() >= limit {
                    return Err(PointIndexError::Capacity { limit });
                }
            }
            results.try_reserve(1)?;
            results.push(point);
        }
        trace!(matches = results.len(), "range scan done");

        results.sort_by(|a, b| legacy_planar_order(a, b));
        Ok(results)
    }
}

/// The fixed two-axis result ordering of the legacy tool.
///
/// Ascending on coordinate 0, ties broken ascending on coordinate 1. Axes
/// beyond index 1 are ignored even when the dimension exceeds 2; this is the
/// ordering contract callers of the legacy tool depend on, not a general
/// k-dimensional sort. One-dimensional points compare on coordinate 0 alone.
pub fn legacy_planar_order<C: IndexCoord>(a: &Point<C>, b: &Point<C>) -> Ordering {
    match a.coord(0).cmp(&b.coord(0)) {
        Ordering::Equal => second_axis(a).cmp(&second_axis(b)),
        ord => ord,
    }
}

#[inline]
fn second_axis<C: IndexCoord>(p: &Point<C>) -> Option<C> {
    if p.dim() > 1 {
        Some(p.coord(1))
    } else {
        None
    }
}

/// Euclidean distance between two points of equal arity, over `f64`.
pub(crate) fn euclidean_distance<C: IndexCoord>(a: &Point<C>, b: &Point<C>) -> f64 {
    let mut dist = 0.0f64;
    for (ca, cb) in a.as_slice().iter().zip(b.as_slice()) {
        // Lossless for every IndexCoord implementor.
        let diff = ca.to_f64().unwrap() - cb.to_f64().unwrap();
        dist += diff * diff;
    }
    dist.sqrt()
}
