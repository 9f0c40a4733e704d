use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use point_index::{KdTree, Point};

fn random_points(n: usize, dim: usize) -> Vec<Vec<i64>> {
    let mut rng = StdRng::seed_from_u64(7);
    (0..n)
        .map(|_| (0..dim).map(|_| rng.gen_range(-1000..=1000)).collect())
        .collect()
}

fn construct(points: &[Vec<i64>], dim: usize) -> KdTree<i64> {
    let mut tree = KdTree::new(dim).unwrap();
    for p in points {
        tree.insert(Point::new(p.clone())).unwrap();
    }
    tree
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let points = random_points(10_000, 2);

    c.bench_function("construction (10k, 2d)", |b| b.iter(|| construct(&points, 2)));

    let tree = construct(&points, 2);
    let target = Point::new(vec![123i64, -456]);

    c.bench_function("nearest-neighbor scan (10k, 2d)", |b| {
        b.iter(|| tree.nearest_neighbors(&target).unwrap())
    });

    c.bench_function("range scan (10k, 2d)", |b| {
        b.iter(|| tree.range_search(&[(-200, 200), (-200, 200)]).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
