//! Bounding boxes and the sweep-line broad phase built on them.

mod aabb;

pub use aabb::Bound;

use num_traits::Float;
use std::cmp::Ordering;

/// Finds every pair of bounds that intersect.
///
/// Sweeps along x over the bounds sorted by their minimum x, keeping the
/// set of bounds whose x-range still overlaps the sweep position. Pairs are
/// reported as `(i, j)` with `i < j`, in no particular order.
///
/// Bounds that merely touch are reported, so callers see segments that share
/// only an endpoint.
pub(crate) fn sweep_pairs<F: Float>(bounds: &[Bound<F>]) -> Vec<(usize, usize)> {
    let mut order: Vec<usize> = (0..bounds.len()).collect();
    order.sort_by(|&a, &b| {
        bounds[a]
            .min
            .x
            .partial_cmp(&bounds[b].min.x)
            .unwrap_or(Ordering::Equal)
    });

    let mut pairs = Vec::new();
    let mut active: Vec<usize> = Vec::new();
    for &i in &order {
        let current = bounds[i];
        active.retain(|&j| bounds[j].max.x >= current.min.x);
        for &j in &active {
            let other = bounds[j];
            if other.min.y <= current.max.y && other.max.y >= current.min.y {
                pairs.push((i.min(j), i.max(j)));
            }
        }
        active.push(i);
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Coord;

    fn b(x0: f64, y0: f64, x1: f64, y1: f64) -> Bound<f64> {
        Bound::new(Coord::new(x0, y0), Coord::new(x1, y1))
    }

    #[test]
    fn test_sweep_pairs_matches_brute_force() {
        let bounds = vec![
            b(0.0, 0.0, 2.0, 2.0),
            b(1.0, 1.0, 3.0, 3.0),
            b(2.0, 5.0, 4.0, 6.0),
            b(3.0, 3.0, 5.0, 4.0),
            b(-1.0, -1.0, 0.0, 0.0),
            b(10.0, 10.0, 11.0, 11.0),
        ];
        let mut found = sweep_pairs(&bounds);
        found.sort_unstable();

        let mut expected = Vec::new();
        for i in 0..bounds.len() {
            for j in (i + 1)..bounds.len() {
                if bounds[i].intersects(bounds[j]) {
                    expected.push((i, j));
                }
            }
        }
        assert_eq!(found, expected);
    }

    #[test]
    fn test_sweep_pairs_empty() {
        let bounds: Vec<Bound<f64>> = Vec::new();
        assert!(sweep_pairs(&bounds).is_empty());
    }
}
