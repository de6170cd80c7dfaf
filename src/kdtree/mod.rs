//! An implementation of a mutable, unbalanced K-D tree.

#![warn(missing_docs)]

mod builder;
mod index;
mod r#trait;
mod traversal;

pub use builder::KDTreeBuilder;
pub use index::{KDTree, RemovalPolicy, TreeNode};
pub use r#trait::KDTreeIndex;
pub use traversal::{Iter, Node};
