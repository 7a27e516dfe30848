/////////////////////////////////////////////////////////////////////////////////////////////
//
// Implements nearest neighbour (piecewise constant) interpolation.
//
// Created on: 16 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{
    common,
    error::Result,
    interpolant_config::InterpolantSettings,
    kdtree::{self, KDTree},
};
use faer::{ColRef, Mat, MatRef};
use log::debug;
use scattered_interpolation_utils::{metrics::Euclidean, Metric};
use serde::{Deserialize, Serialize};

/// Below this many points a linear scan is used.
const KDTREE_MIN_POINTS: usize = 32;

/// Above this many dimensions pruning rarely pays off.
const KDTREE_MAX_DIMENSIONS: usize = 10;

/// Returns the sample of the closest point. Ties go to the point listed first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearestNeighborInterpolant<M = Euclidean> {
    points: Mat<f64>,
    samples: Mat<f64>,
    metric: M,

    /// Search index, rebuilt after deserialization.
    #[serde(skip)]
    tree: Option<KDTree>,
}

impl<M: Metric + Clone> NearestNeighborInterpolant<M> {
    /// Stores the points and samples, indexing them when a tree search is
    /// worthwhile for the metric.
    pub fn fit(
        points: Mat<f64>,
        samples: Mat<f64>,
        settings: &InterpolantSettings<M>,
    ) -> Result<Self> {
        common::check_points_and_samples(points.as_ref(), samples.as_ref())?;
        settings.metric.validate()?;

        let mut interpolant = Self {
            points,
            samples,
            metric: settings.metric.clone(),
            tree: None,
        };
        interpolant.rebuild_index();

        Ok(interpolant)
    }
}

impl<M: Metric> NearestNeighborInterpolant<M> {
    /// Builds the k-d tree if the point count, dimension and metric allow
    /// pruning, and drops it otherwise.
    pub fn rebuild_index(&mut self) {
        let (dims, k) = (self.points.nrows(), self.points.ncols());

        let use_tree = k >= KDTREE_MIN_POINTS
            && dims <= KDTREE_MAX_DIMENSIONS
            && self.metric.axis_lower_bound(0.0).is_some();

        self.tree = use_tree.then(|| KDTree::new(self.points.as_ref()));

        debug!(
            "Nearest neighbour over {} points in {} dimension(s) using {}",
            k,
            dims,
            if use_tree { "a k-d tree" } else { "a linear scan" }
        );
    }

    /// Index of the nearest point to `query`.
    fn nearest(&self, query: ColRef<'_, f64>) -> usize {
        let found = match &self.tree {
            Some(tree) => tree.nearest(self.points.as_ref(), query, &self.metric),
            None => kdtree::linear_nearest(self.points.as_ref(), query, &self.metric),
        };

        // Fitting guarantees at least one point.
        found.map_or(0, |(_, id)| id)
    }

    fn evaluate_block(&self, target_points: MatRef<'_, f64>) -> Mat<f64> {
        let mut values = Mat::<f64>::zeros(target_points.ncols(), self.value_dimensions());

        for q in 0..target_points.ncols() {
            let id = self.nearest(target_points.col(q));
            for c in 0..self.value_dimensions() {
                values[(q, c)] = self.samples[(id, c)];
            }
        }

        values
    }

    /// Evaluate the interpolant at `target_points` (`n × q`), giving `q × m`
    /// values in query order.
    pub fn evaluate(&self, target_points: MatRef<'_, f64>) -> Result<Mat<f64>> {
        common::check_query_points(target_points, self.dimensions())?;

        Ok(common::evaluate_in_blocks(
            target_points,
            self.value_dimensions(),
            |block| self.evaluate_block(block),
        ))
    }

    pub fn dimensions(&self) -> usize {
        self.points.nrows()
    }

    pub fn value_dimensions(&self) -> usize {
        self.samples.ncols()
    }

    pub fn num_points(&self) -> usize {
        self.points.ncols()
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Whether queries go through the k-d tree.
    pub fn uses_tree(&self) -> bool {
        self.tree.is_some()
    }

    pub(crate) fn check_consistency(&self) -> Result<()> {
        common::check_points_and_samples(self.points.as_ref(), self.samples.as_ref())?;
        self.metric.validate()?;
        Ok(())
    }
}
