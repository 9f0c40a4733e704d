use std::cmp::Ordering;

use approx::assert_relative_eq;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::kdtree::query::euclidean_distance;
use crate::kdtree::{legacy_planar_order, KdTree};
use crate::point::Point;
use crate::PointIndexError;

fn tree_of(dim: usize, coords: &[&[i64]]) -> KdTree<i64> {
    let mut tree = KdTree::new(dim).unwrap();
    for c in coords {
        tree.insert(Point::new(c.to_vec())).unwrap();
    }
    tree
}

fn values(points: &[&Point<i64>]) -> Vec<Vec<i64>> {
    points.iter().map(|p| p.as_slice().to_vec()).collect()
}

#[test]
fn rejects_zero_dimension() {
    assert!(matches!(
        KdTree::<i64>::new(0),
        Err(PointIndexError::InvalidDimension { .. })
    ));
}

#[test]
fn rejects_arity_mismatch_on_insert() {
    let mut tree = KdTree::new(2).unwrap();
    let err = tree.insert(Point::new(vec![1i64, 2, 3])).unwrap_err();
    assert!(matches!(
        err,
        PointIndexError::InvalidDimension {
            expected: 2,
            actual: 3
        }
    ));
    assert!(tree.is_empty());
}

#[test]
fn insertion_descends_on_rotating_axis() {
    // (4,4) goes left of the root on axis 0, then left of (3,8) on axis 1.
    let tree = tree_of(2, &[&[5, 5], &[3, 8], &[7, 1], &[4, 4]]);
    let preorder = values(&tree.iter().collect::<Vec<_>>());
    assert_eq!(
        preorder,
        vec![vec![5, 5], vec![3, 8], vec![4, 4], vec![7, 1]]
    );
}

#[test]
fn equal_coordinate_goes_right() {
    let tree = tree_of(1, &[&[5], &[5], &[5]]);
    assert_eq!(tree.len(), 3);
    let preorder = values(&tree.iter().collect::<Vec<_>>());
    assert_eq!(preorder, vec![vec![5], vec![5], vec![5]]);
}

#[test]
fn queries_on_empty_tree_are_empty() {
    let tree: KdTree<i64> = KdTree::new(2).unwrap();
    assert!(tree
        .nearest_neighbors(&Point::new(vec![0, 0]))
        .unwrap()
        .is_empty());
    assert!(tree.range_search(&[(0, 1), (0, 1)]).unwrap().is_empty());
}

#[test]
fn nearest_finds_exact_match_alone() {
    let tree = tree_of(2, &[&[0, 0], &[5, 5], &[10, 10]]);
    let result = tree.nearest_neighbors(&Point::new(vec![5, 5])).unwrap();
    assert_eq!(values(&result), vec![vec![5, 5]]);
}

#[test]
fn nearest_rejects_arity_mismatch() {
    let tree = tree_of(2, &[&[0, 0]]);
    assert!(matches!(
        tree.nearest_neighbors(&Point::new(vec![1i64])),
        Err(PointIndexError::InvalidDimension { .. })
    ));
}

#[test]
fn nearest_keeps_exact_ties_sorted() {
    // All four are at distance 5 from the origin; (6,0) is not.
    let tree = tree_of(2, &[&[3, 4], &[6, 0], &[4, 3], &[5, 0], &[-3, -4]]);
    let result = tree.nearest_neighbors(&Point::new(vec![0, 0])).unwrap();
    assert_eq!(
        values(&result),
        vec![vec![-3, -4], vec![3, 4], vec![4, 3], vec![5, 0]]
    );
}

#[test]
fn nearest_keeps_ties_within_tolerance() {
    // sqrt(1000001) - sqrt(1000000) ≈ 0.0005, inside the 0.001 tolerance,
    // so the slightly farther root stays a candidate.
    let tree = tree_of(2, &[&[1000, 1], &[1000, 0]]);
    let result = tree.nearest_neighbors(&Point::new(vec![0, 0])).unwrap();
    assert_eq!(values(&result), vec![vec![1000, 0], vec![1000, 1]]);
}

#[test]
fn nearest_drops_stale_ties_on_improvement() {
    // (5,0) and (3,4) tie at distance 5 until (1,0) resets the candidates.
    let tree = tree_of(2, &[&[5, 0], &[3, 4], &[1, 0]]);
    let result = tree.nearest_neighbors(&Point::new(vec![0, 0])).unwrap();
    assert_eq!(values(&result), vec![vec![1, 0]]);
}

#[test]
fn nearest_includes_root_exactly_once() {
    // The root seeds the best distance and is then visited by the scan; it
    // must show up once, not twice.
    let tree = tree_of(2, &[&[5, 5], &[50, 50]]);
    let result = tree.nearest_neighbors(&Point::new(vec![5, 5])).unwrap();
    assert_eq!(values(&result), vec![vec![5, 5]]);
}

#[test]
fn range_is_inclusive_on_both_ends() {
    let tree = tree_of(2, &[&[0, 0], &[10, 10], &[5, 5], &[11, 5], &[-1, 5]]);
    let result = tree.range_search(&[(0, 10), (0, 10)]).unwrap();
    assert_eq!(values(&result), vec![vec![0, 0], vec![5, 5], vec![10, 10]]);
}

#[test]
fn range_requires_every_axis_in_bounds() {
    let tree = tree_of(3, &[&[5, 5, 99], &[5, 5, 5]]);
    let result = tree.range_search(&[(0, 10), (0, 10), (0, 10)]).unwrap();
    assert_eq!(values(&result), vec![vec![5, 5, 5]]);
}

#[test]
fn range_returns_duplicate_points_from_distinct_insertions() {
    let tree = tree_of(2, &[&[5, 5], &[5, 5]]);
    let result = tree.range_search(&[(0, 10), (0, 10)]).unwrap();
    assert_eq!(values(&result), vec![vec![5, 5], vec![5, 5]]);
}

#[test]
fn range_rejects_arity_mismatch() {
    let tree = tree_of(2, &[&[0, 0]]);
    assert!(matches!(
        tree.range_search(&[(0, 1)]),
        Err(PointIndexError::InvalidDimension { .. })
    ));
}

#[test]
fn bounded_range_reports_capacity_overflow() {
    let tree = tree_of(2, &[&[1, 1], &[2, 2], &[3, 3], &[4, 4]]);
    let err = tree
        .range_search_bounded(&[(0, 10), (0, 10)], 3)
        .unwrap_err();
    assert!(matches!(err, PointIndexError::Capacity { limit: 3 }));

    let ok = tree.range_search_bounded(&[(0, 10), (0, 10)], 4).unwrap();
    assert_eq!(ok.len(), 4);
}

#[test]
fn result_sets_are_insertion_order_independent() {
    let points: Vec<Vec<i64>> = vec![
        vec![54, 1],
        vec![97, 21],
        vec![65, 35],
        vec![33, 54],
        vec![95, 39],
        vec![54, 3],
        vec![53, 54],
        vec![84, 72],
        vec![33, 34],
        vec![43, 15],
    ];
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);

    let reference = tree_of(2, &points.iter().map(Vec::as_slice).collect::<Vec<_>>());
    let nn_ref = values(&reference.nearest_neighbors(&Point::new(vec![50, 30])).unwrap());
    let rs_ref = values(&reference.range_search(&[(30, 60), (0, 40)]).unwrap());

    for _ in 0..10 {
        let mut shuffled = points.clone();
        shuffled.shuffle(&mut rng);
        let tree = tree_of(2, &shuffled.iter().map(Vec::as_slice).collect::<Vec<_>>());

        let nn = values(&tree.nearest_neighbors(&Point::new(vec![50, 30])).unwrap());
        let rs = values(&tree.range_search(&[(30, 60), (0, 40)]).unwrap());
        // The planar ordering makes set equality plain list equality here.
        assert_eq!(nn, nn_ref);
        assert_eq!(rs, rs_ref);
    }
}

#[test]
fn planar_order_ignores_axes_beyond_the_second() {
    let a = Point::new(vec![1i64, 2, 300]);
    let b = Point::new(vec![1i64, 2, -300]);
    assert_eq!(legacy_planar_order(&a, &b), Ordering::Equal);

    let c = Point::new(vec![1i64, 9, 9]);
    let d = Point::new(vec![2i64, 0, 0]);
    assert_eq!(legacy_planar_order(&c, &d), Ordering::Less);
}

#[test]
fn planar_order_handles_one_dimensional_points() {
    let a = Point::new(vec![3i64]);
    let b = Point::new(vec![7i64]);
    assert_eq!(legacy_planar_order(&a, &b), Ordering::Less);
    assert_eq!(legacy_planar_order(&a, &a.clone()), Ordering::Equal);
}

#[test]
fn distance_is_euclidean_over_f64() {
    let a = Point::new(vec![0i64, 0]);
    let b = Point::new(vec![3i64, 4]);
    assert_relative_eq!(euclidean_distance(&a, &b), 5.0);

    let c = Point::new(vec![-3i64, -4]);
    assert_relative_eq!(euclidean_distance(&a, &c), 5.0);
}

#[test]
fn skewed_tree_drops_without_overflow() {
    use crate::kdtree::node::Node;

    // A right spine 200k nodes deep; a recursive teardown would blow the
    // call stack here.
    let mut chain = Box::new(Node::new(Point::new(vec![0i64])));
    for i in 1..200_000i64 {
        let mut node = Box::new(Node::new(Point::new(vec![i])));
        node.right = Some(chain);
        chain = node;
    }
    let mut tree = KdTree::new(1).unwrap();
    tree.root = Some(chain);
    drop(tree);
}
