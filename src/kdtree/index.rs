use tinyvec::TinyVec;
use tracing::trace;

use crate::kdtree::KDTreeBuilder;
use crate::point::Point;
use crate::r#type::IndexableNum;

/// How [`KDTree::remove`] handles a matched node that has a left subtree but no right subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovalPolicy {
    /// Replace the matched subtree wholesale by its left child.
    ///
    /// This is the simplified classic algorithm. The spliced subtree moves up one level, so its
    /// nodes are afterwards compared on a different axis than the one they were split on, and
    /// later lookups may miss points inside it.
    #[default]
    SpliceLeft,

    /// Promote the minimum of the left subtree on the node's axis, move the left subtree to the
    /// right, and keep removing the promoted point from there.
    ///
    /// This keeps the partition invariant intact for every remaining node.
    PromoteFromLeft,
}

/// One stored point and the arena ids of its children.
#[derive(Debug, Clone)]
pub struct TreeNode<N: IndexableNum, const D: usize> {
    pub(crate) point: Point<N, D>,
    pub(crate) left: Option<usize>,
    pub(crate) right: Option<usize>,
}

impl<N: IndexableNum, const D: usize> TreeNode<N, D> {
    fn new(point: Point<N, D>) -> Self {
        Self {
            point,
            left: None,
            right: None,
        }
    }

    /// The point held by this node.
    pub fn point(&self) -> &Point<N, D> {
        &self.point
    }
}

/// The slot a node hangs from: the tree root or one side of its parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Link {
    #[default]
    Root,
    Left(usize),
    Right(usize),
}

/// A node found during a descent, with enough context to unlink it.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Located {
    pub(crate) link: Link,
    pub(crate) id: usize,
    pub(crate) depth: usize,
}

/// A mutable K-D tree over points of dimension `D`.
///
/// Nodes are kept in an arena and linked by index, and every traversal runs on an explicit
/// stack, so a degenerate tree built from sorted input costs heap space rather than call stack.
///
/// The tree is never rebalanced: its shape is purely a function of insertion order.
#[derive(Debug, Clone)]
pub struct KDTree<N: IndexableNum, const D: usize> {
    pub(crate) nodes: Vec<TreeNode<N, D>>,
    /// Arena slots released by removals, reused by later inserts.
    pub(crate) free: Vec<usize>,
    pub(crate) root: Option<usize>,
    pub(crate) num_items: usize,
    pub(crate) removal_policy: RemovalPolicy,
}

impl<N: IndexableNum, const D: usize> KDTree<N, D> {
    const NONZERO_DIMENSION: () = assert!(D > 0, "a KDTree needs at least one dimension");

    /// Create a new, empty tree with the default [`RemovalPolicy`].
    pub fn new() -> Self {
        Self::with_config(0, RemovalPolicy::default())
    }

    /// Create a new builder for a tree of this type.
    pub fn builder() -> KDTreeBuilder<N, D> {
        KDTreeBuilder::new()
    }

    pub(crate) fn with_config(capacity: usize, removal_policy: RemovalPolicy) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NONZERO_DIMENSION;

        Self {
            nodes: Vec::with_capacity(capacity),
            free: vec![],
            root: None,
            num_items: 0,
            removal_policy,
        }
    }

    /// The policy applied when removing a node without a right subtree.
    pub fn removal_policy(&self) -> RemovalPolicy {
        self.removal_policy
    }

    /// Insert a point.
    ///
    /// Points equal on the splitting axis go right. Duplicates are not detected: inserting a
    /// point twice stores two nodes, each removable on its own.
    pub fn insert(&mut self, point: Point<N, D>) {
        let id = self.alloc(point);
        self.num_items += 1;

        let Some(mut current) = self.root else {
            self.root = Some(id);
            trace!(depth = 0, "inserted point");
            return;
        };

        let mut depth = 0;
        loop {
            let axis = depth % D;
            let node = &mut self.nodes[current];
            let branch = if point[axis] < node.point[axis] {
                &mut node.left
            } else {
                &mut node.right
            };
            depth += 1;

            match *branch {
                Some(next) => current = next,
                None => {
                    *branch = Some(id);
                    trace!(depth, "inserted point");
                    return;
                }
            }
        }
    }

    /// Remove one instance of `point`.
    ///
    /// Returns `true` if a matching point was found and removed. When duplicates are stored,
    /// only the first one met on the search path is removed.
    pub fn remove(&mut self, point: &Point<N, D>) -> bool {
        let Some(mut target) = locate(&self.nodes, self.root, point) else {
            trace!("point to remove not found");
            return false;
        };

        loop {
            let axis = target.depth % D;
            let TreeNode { left, right, .. } = self.nodes[target.id];

            let subtree = match (left, right) {
                (_, Some(right)) => right,
                (Some(left), None) => match self.removal_policy {
                    RemovalPolicy::SpliceLeft => {
                        trace!(depth = target.depth, "spliced left subtree upward");
                        self.relink(target.link, Some(left));
                        self.release(target.id);
                        break;
                    }
                    RemovalPolicy::PromoteFromLeft => {
                        let node = &mut self.nodes[target.id];
                        node.right = node.left.take();
                        left
                    }
                },
                (None, None) => {
                    self.relink(target.link, None);
                    self.release(target.id);
                    break;
                }
            };

            // Overwrite with the subtree minimum on this axis, then remove that node instead.
            let min = self.find_min(
                Located {
                    link: Link::Right(target.id),
                    id: subtree,
                    depth: target.depth + 1,
                },
                axis,
            );
            self.nodes[target.id].point = self.nodes[min.id].point;
            target = min;
        }

        self.num_items -= 1;
        if self.root.is_none() {
            self.nodes.clear();
            self.free.clear();
        }
        trace!(remaining = self.num_items, "removed point");
        true
    }

    /// Remove every point, keeping the allocated arena.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.root = None;
        self.num_items = 0;
    }

    /// Find the node with the smallest coordinate on `axis` in the subtree rooted at `start`.
    pub(crate) fn find_min(&self, start: Located, axis: usize) -> Located {
        let mut best = start;

        let mut stack: TinyVec<[Located; 32]> = TinyVec::new();
        stack.push(start);

        while let Some(current) = stack.pop() {
            let node = &self.nodes[current.id];
            if node.point[axis] < self.nodes[best.id].point[axis] {
                best = current;
            }

            if let Some(left) = node.left {
                stack.push(Located {
                    link: Link::Left(current.id),
                    id: left,
                    depth: current.depth + 1,
                });
            }

            // Nothing right of a split on `axis` can be smaller than the split itself.
            if current.depth % D != axis {
                if let Some(right) = node.right {
                    stack.push(Located {
                        link: Link::Right(current.id),
                        id: right,
                        depth: current.depth + 1,
                    });
                }
            }
        }

        best
    }

    fn alloc(&mut self, point: Point<N, D>) -> usize {
        let node = TreeNode::new(point);
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, id: usize) {
        self.free.push(id);
    }

    fn relink(&mut self, link: Link, child: Option<usize>) {
        match link {
            Link::Root => self.root = child,
            Link::Left(parent) => self.nodes[parent].left = child,
            Link::Right(parent) => self.nodes[parent].right = child,
        }
    }
}

impl<N: IndexableNum, const D: usize> Default for KDTree<N, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: IndexableNum, const D: usize> Extend<Point<N, D>> for KDTree<N, D> {
    fn extend<I: IntoIterator<Item = Point<N, D>>>(&mut self, iter: I) {
        for point in iter {
            self.insert(point);
        }
    }
}

impl<N: IndexableNum, const D: usize> FromIterator<Point<N, D>> for KDTree<N, D> {
    fn from_iter<I: IntoIterator<Item = Point<N, D>>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

/// Descend from `root` the way [`KDTree::insert`] would, stopping at the first node equal to
/// `point`.
pub(crate) fn locate<N: IndexableNum, const D: usize>(
    nodes: &[TreeNode<N, D>],
    root: Option<usize>,
    point: &Point<N, D>,
) -> Option<Located> {
    let mut link = Link::Root;
    let mut next = root;
    let mut depth = 0;

    while let Some(id) = next {
        let node = &nodes[id];
        if node.point == *point {
            return Some(Located { link, id, depth });
        }

        let axis = depth % D;
        if point[axis] < node.point[axis] {
            link = Link::Left(id);
            next = node.left;
        } else {
            link = Link::Right(id);
            next = node.right;
        }
        depth += 1;
    }

    None
}
