use std::cmp::Ordering;

use geo_traits::CoordTrait;
use tinyvec::TinyVec;

use crate::error::{KDIndexError, Result};
use crate::kdtree::index::locate;
use crate::kdtree::{Iter, KDTree, Node, TreeNode};
use crate::point::{axis_dist, Point};
use crate::r#type::IndexableNum;

/// A trait for searching and accessing data out of a KDTree.
pub trait KDTreeIndex<N: IndexableNum, const D: usize>: Sized {
    /// The underlying node arena of this tree.
    ///
    /// Slots released by removals may still hold stale nodes; only nodes reachable from
    /// [`root_id`][Self::root_id] are live.
    fn nodes(&self) -> &[TreeNode<N, D>];

    /// The arena id of the root node, or `None` if the tree is empty.
    fn root_id(&self) -> Option<usize>;

    /// The number of points stored in this tree
    fn num_items(&self) -> usize;

    /// Returns `true` if the tree holds no points.
    fn is_empty(&self) -> bool {
        self.root_id().is_none()
    }

    /// Returns `true` if a point equal to `point` is stored in the tree.
    ///
    /// Follows the same axis comparison as insertion, testing full-point equality at every
    /// node on the way down.
    fn search(&self, point: &Point<N, D>) -> bool {
        locate(self.nodes(), self.root_id(), point).is_some()
    }

    /// The number of stored instances equal to `point`.
    ///
    /// Duplicates always land right of an equal node, so they all lie on one search path.
    fn count(&self, point: &Point<N, D>) -> usize {
        let nodes = self.nodes();
        let mut next = self.root_id();
        let mut depth = 0;
        let mut count = 0;

        while let Some(id) = next {
            let node = &nodes[id];
            if node.point == *point {
                count += 1;
            }

            let axis = depth % D;
            next = if point[axis] < node.point[axis] {
                node.left
            } else {
                node.right
            };
            depth += 1;
        }

        count
    }

    /// Find the stored point closest to `query`.
    ///
    /// Returns [`KDIndexError::EmptyTree`] if there is nothing to return. When several points
    /// are equally close, the first one met during the search wins.
    fn nearest_neighbor(&self, query: &Point<N, D>) -> Result<Point<N, D>> {
        self.nearest_neighbor_with_distance(query)
            .map(|(point, _)| point)
    }

    /// Find the stored point closest to `query`, along with its squared distance.
    fn nearest_neighbor_with_distance(&self, query: &Point<N, D>) -> Result<(Point<N, D>, N)> {
        let nodes = self.nodes();
        let mut best: Option<(usize, N)> = None;

        // (node, depth, bound). `bound` is set on far branches: the squared distance from the
        // query to the splitting plane, checked once the near branch has been exhausted.
        let mut stack: TinyVec<[(usize, usize, Option<N>); 32]> = TinyVec::new();
        if let Some(root) = self.root_id() {
            stack.push((root, 0, None));
        }

        while let Some((id, depth, bound)) = stack.pop() {
            if let (Some(bound), Some((_, best_dist))) = (bound, best) {
                if bound.partial_cmp(&best_dist) != Some(Ordering::Less) {
                    continue;
                }
            }

            let node = &nodes[id];
            let dist = query.squared_distance(&node.point);
            if best.map_or(true, |(_, best_dist)| dist < best_dist) {
                best = Some((id, dist));
            }

            let axis = depth % D;
            let (near, far) = if query[axis] < node.point[axis] {
                (node.left, node.right)
            } else {
                (node.right, node.left)
            };

            // Note: pushed in backwards order to what gets popped
            if let Some(far) = far {
                let plane_dist = axis_dist(query[axis], node.point[axis]);
                stack.push((far, depth + 1, Some(plane_dist * plane_dist)));
            }
            if let Some(near) = near {
                stack.push((near, depth + 1, None));
            }
        }

        best.map(|(id, dist)| (nodes[id].point, dist))
            .ok_or(KDIndexError::EmptyTree)
    }

    /// Find the stored point closest to a coordinate.
    ///
    /// The first `D` dimensions of `coord` are used.
    fn nearest_neighbor_coord(&self, coord: &impl CoordTrait<T = N>) -> Result<Point<N, D>> {
        self.nearest_neighbor(&Point::from_coord(coord))
    }

    /// The number of nodes on the longest root-to-leaf path; `0` for an empty tree.
    fn height(&self) -> usize {
        let nodes = self.nodes();
        let mut height = 0;

        let mut stack: TinyVec<[(usize, usize); 32]> = TinyVec::new();
        if let Some(root) = self.root_id() {
            stack.push((root, 1));
        }

        while let Some((id, level)) = stack.pop() {
            height = height.max(level);
            let node = &nodes[id];
            if let Some(left) = node.left {
                stack.push((left, level + 1));
            }
            if let Some(right) = node.right {
                stack.push((right, level + 1));
            }
        }

        height
    }

    /// Iterate over the stored points in pre-order.
    fn iter(&self) -> Iter<'_, N, D> {
        Iter::new(self.nodes(), self.root_id())
    }

    /// Access the root node of the KDTree for manual traversal.
    fn root(&self) -> Option<Node<'_, N, D>> {
        self.root_id().map(|id| Node::from_root(self.nodes(), id))
    }
}

impl<N: IndexableNum, const D: usize> KDTreeIndex<N, D> for KDTree<N, D> {
    fn nodes(&self) -> &[TreeNode<N, D>] {
        &self.nodes
    }

    fn root_id(&self) -> Option<usize> {
        self.root
    }

    fn num_items(&self) -> usize {
        self.num_items
    }
}
