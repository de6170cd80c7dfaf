//! Utilities to traverse the KDTree structure.

use crate::kdtree::TreeNode;
use crate::point::Point;
use crate::r#type::IndexableNum;

/// A node in the KDTree.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a, N: IndexableNum, const D: usize> {
    /// The arena that this node is a reference into
    nodes: &'a [TreeNode<N, D>],

    id: usize,

    /// Distance from the root, which decides the splitting axis.
    depth: usize,
}

impl<'a, N: IndexableNum, const D: usize> Node<'a, N, D> {
    pub(crate) fn from_root(nodes: &'a [TreeNode<N, D>], root: usize) -> Self {
        Self {
            nodes,
            id: root,
            depth: 0,
        }
    }

    fn child(&self, id: Option<usize>) -> Option<Node<'a, N, D>> {
        id.map(|id| Self {
            nodes: self.nodes,
            id,
            depth: self.depth + 1,
        })
    }

    /// The point stored at this node.
    pub fn point(&self) -> &'a Point<N, D> {
        &self.nodes[self.id].point
    }

    /// The number of edges between this node and the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The coordinate index this node splits its children on.
    pub fn axis(&self) -> usize {
        self.depth % D
    }

    /// The child holding points strictly less than this node on [`axis`][Self::axis].
    pub fn left_child(&self) -> Option<Node<'a, N, D>> {
        self.child(self.nodes[self.id].left)
    }

    /// The child holding points greater than or equal to this node on [`axis`][Self::axis].
    pub fn right_child(&self) -> Option<Node<'a, N, D>> {
        self.child(self.nodes[self.id].right)
    }

    /// Returns `true` if this is a leaf node without children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        let node = &self.nodes[self.id];
        node.left.is_none() && node.right.is_none()
    }

    /// Returns `true` if this is an intermediate node with children.
    #[inline]
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }
}

/// Pre-order iterator over the points of a KDTree.
///
/// Created by [`KDTreeIndex::iter`][crate::kdtree::KDTreeIndex::iter].
#[derive(Debug, Clone)]
pub struct Iter<'a, N: IndexableNum, const D: usize> {
    nodes: &'a [TreeNode<N, D>],
    stack: Vec<usize>,
}

impl<'a, N: IndexableNum, const D: usize> Iter<'a, N, D> {
    pub(crate) fn new(nodes: &'a [TreeNode<N, D>], root: Option<usize>) -> Self {
        Self {
            nodes,
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, N: IndexableNum, const D: usize> Iterator for Iter<'a, N, D> {
    type Item = &'a Point<N, D>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.nodes[id];
        if let Some(right) = node.right {
            self.stack.push(right);
        }
        if let Some(left) = node.left {
            self.stack.push(left);
        }
        Some(&node.point)
    }
}
