//! Tree → linkage list conversion.
//!
//! Produces entries in post-order (children before parents). Each parent
//! refers to its sub-merges by list position with the matching
//! `is_*_from_list` flag set, so the result is a valid linkage table and the
//! root is always the last entry.

use crate::linkage::{Child, Linkage, LinkageEntry, LinkageNode};

enum Frame<'a> {
    Enter(&'a LinkageNode),
    Exit(&'a LinkageNode),
}

/// Flatten a merge tree into a linkage list.
///
/// Uses an explicit stack so very deep trees do not exhaust the call stack.
pub fn tree_to_list(tree: &LinkageNode) -> Vec<LinkageEntry> {
    let mut list = Vec::new();
    // Positions of finished sub-merges, consumed by their parent on exit.
    let mut finished: Vec<usize> = Vec::new();
    let mut stack = vec![Frame::Enter(tree)];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(node) => {
                stack.push(Frame::Exit(node));
                // Right is pushed first so the left subtree is emitted first.
                if let Child::Merge(right) = &node.right {
                    stack.push(Frame::Enter(right));
                }
                if let Child::Merge(left) = &node.left {
                    stack.push(Frame::Enter(left));
                }
            }
            Frame::Exit(node) => {
                let right = match &node.right {
                    Child::Leaf(leaf) => *leaf,
                    Child::Merge(_) => finished.pop().unwrap_or_default(),
                };
                let left = match &node.left {
                    Child::Leaf(leaf) => *leaf,
                    Child::Merge(_) => finished.pop().unwrap_or_default(),
                };

                finished.push(list.len());
                list.push(LinkageEntry::new(
                    left,
                    node.left.is_merge(),
                    right,
                    node.right.is_merge(),
                    node.height,
                ));
            }
        }
    }

    list
}

/// Resolve either encoding into a linkage list.
pub fn normalize(linkage: &Linkage) -> Vec<LinkageEntry> {
    match linkage {
        Linkage::Tree(tree) => tree_to_list(tree),
        Linkage::List(list) => list.clone(),
    }
}
