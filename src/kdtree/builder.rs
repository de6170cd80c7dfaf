use tracing::debug;

use crate::error::{KDIndexError, Result};
use crate::kdtree::{KDTree, RemovalPolicy};
use crate::point::Point;
use crate::r#type::IndexableNum;

/// A builder to create a [`KDTree`].
///
/// Points are inserted in exactly the order they were added. Nothing is sorted or balanced, so
/// adding points in sorted order produces a tree as tall as the number of points.
pub struct KDTreeBuilder<N: IndexableNum, const D: usize> {
    points: Vec<Point<N, D>>,
    removal_policy: RemovalPolicy,
}

impl<N: IndexableNum, const D: usize> KDTreeBuilder<N, D> {
    /// Create a new builder with the default removal policy.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new builder with room for the provided number of items.
    pub fn with_capacity(num_items: usize) -> Self {
        Self::new_with_removal_policy(num_items, RemovalPolicy::default())
    }

    /// Create a new builder with the provided number of items and removal policy.
    pub fn new_with_removal_policy(num_items: usize, removal_policy: RemovalPolicy) -> Self {
        Self {
            points: Vec::with_capacity(num_items),
            removal_policy,
        }
    }

    /// Set the policy the finished tree applies when removing a node without a right subtree.
    pub fn removal_policy(mut self, removal_policy: RemovalPolicy) -> Self {
        self.removal_policy = removal_policy;
        self
    }

    /// Add a point to the index, returning its insertion index.
    pub fn add(&mut self, point: impl Into<Point<N, D>>) -> usize {
        let index = self.points.len();
        self.points.push(point.into());
        index
    }

    /// Add every point yielded by `points`.
    pub fn add_all<P: Into<Point<N, D>>>(&mut self, points: impl IntoIterator<Item = P>) {
        self.points.extend(points.into_iter().map(Into::into));
    }

    /// Add points from a flat buffer of interleaved coordinates, `D` values per point.
    pub fn add_interleaved(&mut self, coords: &[N]) -> Result<()> {
        if coords.len() % D != 0 {
            return Err(KDIndexError::DimensionMismatch {
                expected: D,
                found: coords.len(),
            });
        }

        for chunk in coords.chunks_exact(D) {
            self.points.push(Point::try_from(chunk)?);
        }
        Ok(())
    }

    /// Consume this builder, inserting every added point and returning the tree.
    pub fn finish(self) -> KDTree<N, D> {
        let mut tree = KDTree::with_config(self.points.len(), self.removal_policy);
        tree.extend(self.points);
        debug!(
            num_items = tree.num_items,
            policy = ?tree.removal_policy,
            "finished KDTree"
        );
        tree
    }
}

impl<N: IndexableNum, const D: usize> Default for KDTreeBuilder<N, D> {
    fn default() -> Self {
        Self::new()
    }
}
