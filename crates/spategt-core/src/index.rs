//! Read-only spatial index over 2D points.
//!
//! Every statistic computer issues one query per point, so radius and
//! nearest-neighbor lookups are the hot path of the whole engine. The index
//! is a balanced k-d tree stored as an implicit median layout over a point
//! permutation; small point sets skip the tree and scan linearly. Once built
//! the index is never mutated, which makes concurrent queries from a worker
//! pool safe by construction.

/// Below this size a linear scan beats the tree traversal.
const BRUTE_FORCE_THRESHOLD: usize = 16;

/// A k-d tree over a fixed set of 2D points.
///
/// The index owns a copy of the coordinates it was built from; it never
/// reads the originating sample again. Query results are indices into the
/// point sequence passed to [`SpatialIndex::build`].
///
/// # Examples
///
/// ```
/// use spategt_core::SpatialIndex;
///
/// let index = SpatialIndex::build(&[[0.0, 0.0], [1.0, 0.0], [5.0, 5.0]]);
/// let mut near = index.within_radius([0.0, 0.0], 1.5);
/// near.sort_unstable();
/// assert_eq!(near, vec![0, 1]);
/// assert_eq!(index.nearest_distance([4.0, 5.0]), Some(1.0));
/// ```
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    points: Vec<[f32; 2]>,
    /// Point indices arranged so that every subtree occupies a contiguous
    /// range with its median split point in the middle.
    order: Vec<u32>,
    brute_force: bool,
}

impl SpatialIndex {
    /// Builds an index from a coordinate slice.
    ///
    /// An empty slice yields a valid index that returns no results for any
    /// query.
    #[must_use]
    pub fn build(points: &[[f32; 2]]) -> Self {
        let points = points.to_vec();
        #[expect(clippy::cast_possible_truncation)]
        let mut order: Vec<u32> = (0..points.len() as u32).collect();
        let brute_force = points.len() < BRUTE_FORCE_THRESHOLD;
        if !brute_force {
            build_subtree(&points, &mut order, 0);
        }
        Self {
            points,
            order,
            brute_force,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Indices of all points within Euclidean distance `radius` of `center`.
    ///
    /// A point exactly at `center` (including the query point itself, if it
    /// belongs to the indexed set) is returned; use
    /// [`SpatialIndex::within_radius_excluding`] to drop a known self index.
    /// Results are in no particular order.
    #[must_use]
    pub fn within_radius(&self, center: [f32; 2], radius: f32) -> Vec<usize> {
        let mut out = Vec::new();
        let r2 = radius * radius;
        if self.brute_force {
            for (i, p) in self.points.iter().enumerate() {
                if dist2(*p, center) <= r2 {
                    out.push(i);
                }
            }
        } else {
            radius_subtree(&self.points, &self.order, 0, center, radius, r2, &mut out);
        }
        out
    }

    /// Like [`SpatialIndex::within_radius`], with one index excluded.
    #[must_use]
    pub fn within_radius_excluding(
        &self,
        center: [f32; 2],
        radius: f32,
        exclude: usize,
    ) -> Vec<usize> {
        let mut out = self.within_radius(center, radius);
        out.retain(|&i| i != exclude);
        out
    }

    /// Euclidean distance from `center` to the closest indexed point, or
    /// `None` for an empty index.
    #[must_use]
    pub fn nearest_distance(&self, center: [f32; 2]) -> Option<f32> {
        if self.points.is_empty() {
            return None;
        }
        let mut best = f32::INFINITY;
        if self.brute_force {
            for p in &self.points {
                best = best.min(dist2(*p, center));
            }
        } else {
            nearest_subtree(&self.points, &self.order, 0, center, &mut best);
        }
        Some(best.sqrt())
    }
}

fn dist2(a: [f32; 2], b: [f32; 2]) -> f32 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx * dx + dy * dy
}

/// Recursively arranges `order` so the median along the split axis sits at
/// the middle of the slice, with smaller coordinates to its left.
fn build_subtree(points: &[[f32; 2]], order: &mut [u32], axis: usize) {
    if order.len() <= 1 {
        return;
    }
    let mid = order.len() / 2;
    order.select_nth_unstable_by(mid, |&a, &b| {
        points[a as usize][axis].total_cmp(&points[b as usize][axis])
    });
    let next = axis ^ 1;
    let (left, rest) = order.split_at_mut(mid);
    build_subtree(points, left, next);
    build_subtree(points, &mut rest[1..], next);
}

fn radius_subtree(
    points: &[[f32; 2]],
    order: &[u32],
    axis: usize,
    center: [f32; 2],
    radius: f32,
    r2: f32,
    out: &mut Vec<usize>,
) {
    if order.is_empty() {
        return;
    }
    let mid = order.len() / 2;
    let idx = order[mid] as usize;
    let p = points[idx];
    if dist2(p, center) <= r2 {
        out.push(idx);
    }
    let delta = center[axis] - p[axis];
    let next = axis ^ 1;
    let (near, far) = if delta < 0.0 {
        (&order[..mid], &order[mid + 1..])
    } else {
        (&order[mid + 1..], &order[..mid])
    };
    radius_subtree(points, near, next, center, radius, r2, out);
    if delta.abs() <= radius {
        radius_subtree(points, far, next, center, radius, r2, out);
    }
}

fn nearest_subtree(
    points: &[[f32; 2]],
    order: &[u32],
    axis: usize,
    center: [f32; 2],
    best2: &mut f32,
) {
    if order.is_empty() {
        return;
    }
    let mid = order.len() / 2;
    let p = points[order[mid] as usize];
    let d2 = dist2(p, center);
    if d2 < *best2 {
        *best2 = d2;
    }
    let delta = center[axis] - p[axis];
    let next = axis ^ 1;
    let (near, far) = if delta < 0.0 {
        (&order[..mid], &order[mid + 1..])
    } else {
        (&order[mid + 1..], &order[..mid])
    };
    nearest_subtree(points, near, next, center, best2);
    if delta * delta < *best2 {
        nearest_subtree(points, far, next, center, best2);
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg32;

    use super::*;

    fn random_points(n: usize, seed: u64) -> Vec<[f32; 2]> {
        let mut rng = Pcg32::seed_from_u64(seed);
        (0..n)
            .map(|_| [rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)])
            .collect()
    }

    fn brute_within(points: &[[f32; 2]], center: [f32; 2], radius: f32) -> Vec<usize> {
        points
            .iter()
            .enumerate()
            .filter(|(_, p)| dist2(**p, center) <= radius * radius)
            .map(|(i, _)| i)
            .collect()
    }

    fn brute_nearest(points: &[[f32; 2]], center: [f32; 2]) -> Option<f32> {
        points
            .iter()
            .map(|p| dist2(*p, center).sqrt())
            .min_by(f32::total_cmp)
    }

    #[test]
    fn test_empty_index_has_no_results() {
        let index = SpatialIndex::build(&[]);
        assert!(index.is_empty());
        assert!(index.within_radius([0.0, 0.0], 10.0).is_empty());
        assert_eq!(index.nearest_distance([0.0, 0.0]), None);
    }

    #[test]
    fn test_radius_query_matches_brute_force() {
        // Large enough to exercise the tree path.
        let points = random_points(500, 7);
        let index = SpatialIndex::build(&points);
        let mut rng = Pcg32::seed_from_u64(99);
        for _ in 0..50 {
            let center = [rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)];
            let radius = rng.random_range(0.5..30.0);
            let mut got = index.within_radius(center, radius);
            got.sort_unstable();
            let mut expected = brute_within(&points, center, radius);
            expected.sort_unstable();
            assert_eq!(got, expected);
        }
    }

    #[test]
    fn test_nearest_matches_brute_force() {
        let points = random_points(300, 21);
        let index = SpatialIndex::build(&points);
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..50 {
            let center = [rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)];
            let got = index.nearest_distance(center).unwrap();
            let expected = brute_nearest(&points, center).unwrap();
            assert!((got - expected).abs() < 1e-4, "{got} vs {expected}");
        }
    }

    #[test]
    fn test_duplicate_coordinates() {
        let mut points = vec![[2.0, 2.0]; 40];
        points.push([9.0, 9.0]);
        let index = SpatialIndex::build(&points);
        assert_eq!(index.within_radius([2.0, 2.0], 0.1).len(), 40);
        assert_eq!(index.nearest_distance([9.0, 8.0]), Some(1.0));
    }

    #[test]
    fn test_self_exclusion() {
        let points = vec![[0.0, 0.0], [1.0, 0.0], [0.5, 0.0]];
        let index = SpatialIndex::build(&points);
        let got = index.within_radius_excluding([0.0, 0.0], 2.0, 0);
        assert_eq!(got.len(), 2);
        assert!(!got.contains(&0));
    }

    #[test]
    fn test_small_sets_use_linear_scan() {
        let points = random_points(BRUTE_FORCE_THRESHOLD - 1, 3);
        let index = SpatialIndex::build(&points);
        assert!(index.brute_force);
        let mut got = index.within_radius([50.0, 50.0], 40.0);
        got.sort_unstable();
        let mut expected = brute_within(&points, [50.0, 50.0], 40.0);
        expected.sort_unstable();
        assert_eq!(got, expected);
    }
}
