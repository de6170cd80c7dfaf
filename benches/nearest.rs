use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kd_index::kdtree::{KDTree, KDTreeIndex};
use kd_index::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstar::RTree;

fn load_data(n: usize) -> Vec<[f64; 2]> {
    let mut rng = StdRng::seed_from_u64(0);
    (0..n)
        .map(|_| [rng.gen_range(0.0..100_000.0), rng.gen_range(0.0..100_000.0)])
        .collect()
}

fn construct_kdtree(coords: &[[f64; 2]]) -> KDTree<f64, 2> {
    coords.iter().copied().map(Point::new).collect()
}

fn construct_rstar(coords: Vec<[f64; 2]>) -> RTree<[f64; 2]> {
    RTree::bulk_load(coords)
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let coords = load_data(100_000);

    c.bench_function("construction (kdtree)", |b| {
        b.iter(|| construct_kdtree(&coords))
    });

    c.bench_function("construction (rstar bulk)", |b| {
        b.iter(|| construct_rstar(coords.to_vec()))
    });

    let kdtree = construct_kdtree(&coords);
    let rstar_tree = construct_rstar(coords.to_vec());
    let query = [1111.0, 3234.0];

    c.bench_function("nearest neighbor (kdtree)", |b| {
        b.iter(|| kdtree.nearest_neighbor(black_box(&Point::new(query))))
    });

    c.bench_function("nearest neighbor (rstar)", |b| {
        b.iter(|| rstar_tree.nearest_neighbor(black_box(&query)))
    });

    let mut scratch = construct_kdtree(&coords);
    let probe = Point::new(coords[coords.len() / 2]);
    c.bench_function("remove + insert (kdtree)", |b| {
        b.iter(|| {
            scratch.remove(&probe);
            scratch.insert(probe);
        })
    });

    // Sorted input degenerates to a path; this tracks how badly.
    let mut sorted = coords[..5_000].to_vec();
    sorted.sort_by(|a, b| a[0].total_cmp(&b[0]));
    let degenerate = construct_kdtree(&sorted);
    c.bench_function("nearest neighbor (kdtree, sorted input)", |b| {
        b.iter(|| degenerate.nearest_neighbor(black_box(&Point::new(query))))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
