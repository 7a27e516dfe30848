/////////////////////////////////////////////////////////////////////////////////////////////
//
// Provides a simple KD-tree implementation for nearest-neighbour queries.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use faer::{ColRef, MatRef};
use scattered_interpolation_utils::Metric;
use std::cmp::Ordering;

/// Nearest point found so far: `(distance, id)`.
type Candidate = (f64, usize);

/// `true` when `(distance, id)` beats the current best: closer, or equally
/// close with a lower id.
#[inline(always)]
fn improves(distance: f64, id: usize, best: Option<Candidate>) -> bool {
    match best {
        None => true,
        Some((best_distance, best_id)) => {
            distance < best_distance || (distance == best_distance && id < best_id)
        }
    }
}

/// Nearest point to `query` by exhaustive scan; ties go to the lowest id.
pub(crate) fn linear_nearest<M>(
    points: MatRef<'_, f64>,
    query: ColRef<'_, f64>,
    metric: &M,
) -> Option<Candidate>
where
    M: Metric + ?Sized,
{
    let mut best: Option<Candidate> = None;

    for id in 0..points.ncols() {
        let distance = metric.distance(query, points.col(id));
        if improves(distance, id, best) {
            best = Some((distance, id));
        }
    }

    best
}

/// A node in the KDTree
#[derive(Debug, Clone)]
struct Node {
    /// Column of the point stored at this node.
    id: usize,
    left: Option<usize>,
    right: Option<usize>,
}

/// The KDTree structure.
///
/// Stores point ids only; the coordinates stay in the matrix the tree was built
/// from, which must be passed back in to every query.
#[derive(Debug, Clone)]
pub(crate) struct KDTree {
    nodes: Vec<Node>,
    dimensions: usize,
}

impl KDTree {
    /// Constructs a new KDTree over the columns of `points`.
    pub fn new(points: MatRef<'_, f64>) -> Self {
        let mut ids: Vec<usize> = (0..points.ncols()).collect();

        let mut tree = KDTree {
            nodes: Vec::with_capacity(points.ncols()),
            dimensions: points.nrows(),
        };
        tree.build_tree(points, &mut ids, 0);
        tree
    }

    /// Recursively builds the KDTree and stores nodes in a flat vector.
    fn build_tree(&mut self, points: MatRef<'_, f64>, ids: &mut [usize], depth: usize) -> Option<usize> {
        if ids.is_empty() {
            return None;
        }

        // Determine splitting axis
        let axis = depth % self.dimensions;

        // Sort ids by the current axis
        ids.sort_by(|&a, &b| {
            points[(axis, a)]
                .partial_cmp(&points[(axis, b)])
                .unwrap_or(Ordering::Equal)
                .then(a.cmp(&b))
        });

        // Choose the median as the pivot
        let mid = ids.len() / 2;

        // Create the current node
        let node_index = self.nodes.len();
        self.nodes.push(Node {
            id: ids[mid],
            left: None,
            right: None,
        });

        // Recursively build left and right subtrees
        let (left_ids, rest) = ids.split_at_mut(mid);
        self.nodes[node_index].left = self.build_tree(points, left_ids, depth + 1);
        self.nodes[node_index].right = self.build_tree(points, &mut rest[1..], depth + 1);

        Some(node_index)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Nearest point to `query`, ties broken by the lowest id.
    ///
    /// `points` must be the matrix the tree was built from. Subtrees are pruned
    /// with [`Metric::axis_lower_bound`]; metrics that provide no bound visit
    /// every node.
    pub fn nearest<M>(
        &self,
        points: MatRef<'_, f64>,
        query: ColRef<'_, f64>,
        metric: &M,
    ) -> Option<Candidate>
    where
        M: Metric + ?Sized,
    {
        debug_assert!(points.ncols() == self.nodes.len());

        let mut best = None;
        if !self.nodes.is_empty() {
            self.nearest_impl(0, points, query, 0, metric, &mut best);
        }
        best
    }

    fn nearest_impl<M>(
        &self,
        node_index: usize,
        points: MatRef<'_, f64>,
        query: ColRef<'_, f64>,
        depth: usize,
        metric: &M,
        best: &mut Option<Candidate>,
    ) where
        M: Metric + ?Sized,
    {
        let node = &self.nodes[node_index];
        let distance = metric.distance(query, points.col(node.id));

        if improves(distance, node.id, *best) {
            *best = Some((distance, node.id));
        }

        let axis = depth % self.dimensions;
        let diff = query[axis] - points[(axis, node.id)];

        let (near_idx, far_idx) = if diff < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(near) = near_idx {
            self.nearest_impl(near, points, query, depth + 1, metric, best);
        }

        if let Some(far) = far_idx {
            // Equal bounds are still visited so ties can reach a lower id.
            let visit = match (metric.axis_lower_bound(diff), *best) {
                (Some(bound), Some((best_distance, _))) => bound <= best_distance,
                _ => true,
            };
            if visit {
                self.nearest_impl(far, points, query, depth + 1, metric, best);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::Mat;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use scattered_interpolation_utils::metrics::{
        Chebyshev, Cityblock, Euclidean, Minkowski, SqEuclidean,
    };

    fn random_points(n: usize, dim: usize, seed: u64) -> Mat<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        Mat::from_fn(dim, n, |_, _| rng.random_range(0.0..1.0))
    }

    /// Metric without an axis bound, forcing a full traversal.
    #[derive(Debug)]
    struct Unbounded;

    impl Metric for Unbounded {
        fn distance(&self, a: ColRef<'_, f64>, b: ColRef<'_, f64>) -> f64 {
            Euclidean.distance(a, b)
        }
    }

    #[test]
    fn nearest_matches_bruteforce_1d_2d_3d() {
        let metrics: [&dyn Metric; 6] = [
            &Euclidean,
            &SqEuclidean,
            &Cityblock,
            &Chebyshev,
            &Minkowski { p: 3.0 },
            &Unbounded,
        ];

        for (n, d, seed) in [(200, 1, 42u64), (300, 2, 123u64), (400, 3, 999u64)] {
            let points = random_points(n, d, seed);
            let tree = KDTree::new(points.as_ref());
            assert!(tree.len() == n);

            let queries = random_points(50, d, seed + 50);

            for metric in metrics {
                for q in 0..queries.ncols() {
                    let query = queries.col(q);
                    let kd = tree.nearest(points.as_ref(), query, metric);
                    let bf = linear_nearest(points.as_ref(), query, metric);
                    assert!(kd == bf, "{:?}: kd {:?} != bf {:?}", metric, kd, bf);
                }
            }
        }
    }

    #[test]
    fn ties_go_to_the_lowest_index() {
        // Integer grid queried at cell centres: four equidistant neighbours.
        let points = Mat::from_fn(2, 25, |dim, j| match dim {
            0 => (j % 5) as f64,
            _ => (j / 5) as f64,
        });
        let tree = KDTree::new(points.as_ref());

        let queries = Mat::from_fn(2, 16, |dim, j| match dim {
            0 => (j % 4) as f64 + 0.5,
            _ => (j / 4) as f64 + 0.5,
        });

        let metrics: [&dyn Metric; 3] = [&Euclidean, &Cityblock, &Chebyshev];
        for metric in metrics {
            for q in 0..queries.ncols() {
                let query = queries.col(q);
                let kd = tree.nearest(points.as_ref(), query, metric);
                let bf = linear_nearest(points.as_ref(), query, metric);
                assert_eq!(kd, bf);
            }
        }
    }

    #[test]
    fn duplicates_return_the_first_copy() {
        // Columns 1, 3 and 4 coincide.
        let mut points = Mat::<f64>::zeros(2, 5);
        points[(0, 0)] = 0.9;
        for j in [1, 3, 4] {
            points[(0, j)] = 0.3;
            points[(1, j)] = 0.7;
        }
        points[(0, 2)] = 0.1;
        points[(1, 2)] = 0.1;

        let tree = KDTree::new(points.as_ref());
        let query = points.col(4);
        assert_eq!(tree.nearest(points.as_ref(), query, &Euclidean), Some((0.0, 1)));
    }

    #[test]
    fn empty_tree_returns_none() {
        let points = Mat::<f64>::zeros(3, 0);
        let tree = KDTree::new(points.as_ref());
        let query = Mat::<f64>::zeros(3, 1);
        assert!(tree.nearest(points.as_ref(), query.col(0), &Euclidean).is_none());
        assert!(linear_nearest(points.as_ref(), query.col(0), &Euclidean).is_none());
    }

    #[test]
    fn single_point_tree_behaves() {
        let points = Mat::from_fn(3, 1, |_, _| 0.5);
        let tree = KDTree::new(points.as_ref());

        let far = Mat::<f64>::zeros(3, 1);
        let (distance, id) = tree.nearest(points.as_ref(), far.col(0), &Chebyshev).unwrap();
        assert_eq!(id, 0);
        assert_eq!(distance, 0.5);
    }
}
