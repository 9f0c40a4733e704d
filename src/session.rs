//! The one-shot-load session state machine.
//!
//! A session holds at most one tree, populated by exactly one successful
//! `LOAD`. Re-loading reports [`PointIndexError::State`] and leaves the
//! loaded tree intact; queries before a load report the same. This is the
//! recoverable-errors policy: the legacy tool instead terminated the whole
//! process on these paths.

use std::io::Write;
use std::path::Path;

use tracing::warn;

use crate::coord::IndexCoord;
use crate::error::{PointIndexError, Result};
use crate::kdtree::KdTree;
use crate::loader;
use crate::point::Point;

/// The observable state of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No dataset loaded yet; only `LOAD` makes progress.
    Empty,
    /// A dataset is loaded; queries are accepted and `LOAD` is rejected.
    Loaded,
}

/// A single-threaded query session over at most one tree.
#[derive(Debug, Default)]
pub struct Session<C: IndexCoord> {
    tree: Option<KdTree<C>>,
}

impl<C: IndexCoord> Session<C> {
    /// Create an empty session.
    pub fn new() -> Self {
        Self { tree: None }
    }

    /// The current state.
    pub fn state(&self) -> SessionState {
        if self.tree.is_some() {
            SessionState::Loaded
        } else {
            SessionState::Empty
        }
    }

    /// The dimension of the loaded tree, if any.
    pub fn dim(&self) -> Option<usize> {
        self.tree.as_ref().map(KdTree::dim)
    }

    /// Load a dataset, the only `Empty → Loaded` transition.
    ///
    /// A second load is [`PointIndexError::State`] and does not disturb the
    /// already loaded tree. A failed load leaves the session `Empty`.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        if self.tree.is_some() {
            warn!("rejecting LOAD: a dataset is already loaded");
            return Err(PointIndexError::State(
                "a dataset is already loaded in this session".to_string(),
            ));
        }
        self.tree = Some(loader::load_dataset(path)?);
        Ok(())
    }

    /// Nearest-neighbor query against the loaded tree.
    pub fn nearest(&self, target: &Point<C>) -> Result<Vec<&Point<C>>> {
        self.loaded_tree()?.nearest_neighbors(target)
    }

    /// Range query against the loaded tree.
    pub fn range(&self, bounds: &[(C, C)]) -> Result<Vec<&Point<C>>> {
        self.loaded_tree()?.range_search(bounds)
    }

    /// Write every stored point, pre-order, one per line.
    pub fn debug_dump(&self, out: &mut impl Write) -> Result<()> {
        for point in self.loaded_tree()?.iter() {
            writeln!(out, "{}", point)?;
        }
        Ok(())
    }

    fn loaded_tree(&self) -> Result<&KdTree<C>> {
        self.tree.as_ref().ok_or_else(|| {
            PointIndexError::State("no dataset loaded in this session".to_string())
        })
    }
}
