//! Dataset ingestion.
//!
//! A dataset is a text file whose first two whitespace-separated tokens are
//! the point count `n` (at most [`MAX_DATASET_POINTS`]) and the dimension
//! `k`, followed by `n × k` integer tokens consumed in row-major order, `k`
//! per point. Points are inserted in file order into a fresh tree, so the
//! file order fixes the tree shape (but not the content of query result
//! sets).

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::coord::IndexCoord;
use crate::error::{PointIndexError, Result};
use crate::kdtree::constants::MAX_DATASET_POINTS;
use crate::kdtree::KdTree;
use crate::point::Point;

/// Read and parse a dataset file into a new tree.
///
/// Any failure aborts the load; the partially built tree is dropped before
/// the error is returned and no partial state is observable.
pub fn load_dataset<C: IndexCoord, P: AsRef<Path>>(path: P) -> Result<KdTree<C>> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading dataset");
    let text = fs::read_to_string(path)?;
    let tree = parse_dataset(&text)?;
    info!(
        path = %path.display(),
        points = tree.len(),
        dim = tree.dim(),
        "dataset loaded"
    );
    Ok(tree)
}

/// Parse dataset text into a new tree.
///
/// Tokens past the declared `n × k` coordinates are ignored, as the legacy
/// loader did.
pub fn parse_dataset<C: IndexCoord>(text: &str) -> Result<KdTree<C>> {
    let mut tokens = text.split_ascii_whitespace();

    let n = parse_header_token(tokens.next(), "n")?;
    let k = parse_header_token(tokens.next(), "k")?;
    if n > MAX_DATASET_POINTS {
        return Err(PointIndexError::Format(format!(
            "point count {} exceeds the maximum of {}",
            n, MAX_DATASET_POINTS
        )));
    }
    if k == 0 {
        return Err(PointIndexError::Format(
            "dimension must be at least 1".to_string(),
        ));
    }

    let mut tree = KdTree::new(k)?;
    let mut coords: Vec<C> = Vec::new();
    coords.try_reserve(k)?;
    for i in 0..n {
        coords.clear();
        for d in 0..k {
            let token = tokens.next().ok_or_else(|| {
                PointIndexError::Format(format!(
                    "unexpected end of data at axis {} of point {} (expected {} points)",
                    d, i, n
                ))
            })?;
            let value: C = token.parse().map_err(|_| {
                PointIndexError::Format(format!(
                    "invalid integer {:?} at axis {} of point {}",
                    token, d, i
                ))
            })?;
            coords.push(value);
        }
        tree.insert(Point::new(coords.clone()))?;
    }
    Ok(tree)
}

fn parse_header_token(token: Option<&str>, name: &str) -> Result<usize> {
    let token =
        token.ok_or_else(|| PointIndexError::Format(format!("missing header token {}", name)))?;
    token.parse().map_err(|_| {
        PointIndexError::Format(format!("invalid header token {} = {:?}", name, token))
    })
}
