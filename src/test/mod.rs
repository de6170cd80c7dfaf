use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::Point;


/// `n` random integer points in `[0, max)`, reproducible from `seed`.
pub(crate) fn random_points<const D: usize>(seed: u64, n: usize, max: i64) -> Vec<Point<i64, D>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Point::new(std::array::from_fn(|_| rng.gen_range(0..max))))
        .collect()
}

/// The smallest squared distance from `query` to any of `points`, by linear scan.
pub(crate) fn brute_force_min_dist<const D: usize>(
    points: &[Point<i64, D>],
    query: &Point<i64, D>,
) -> Option<i64> {
    points.iter().map(|p| p.squared_distance(query)).min()
}
