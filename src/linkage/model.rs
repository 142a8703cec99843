//! Linkage encodings and the derived layout entry.

use serde::{Deserialize, Serialize};

/// One side of a tree merge: either a leaf index or a nested merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Child {
    /// Original row/column index.
    Leaf(usize),
    /// Sub-merge.
    Merge(Box<LinkageNode>),
}

impl Child {
    /// Check whether this child is a sub-merge rather than a leaf.
    #[inline]
    pub fn is_merge(&self) -> bool {
        matches!(self, Child::Merge(_))
    }
}

impl From<usize> for Child {
    fn from(leaf: usize) -> Self {
        Child::Leaf(leaf)
    }
}

impl From<LinkageNode> for Child {
    fn from(node: LinkageNode) -> Self {
        Child::Merge(Box::new(node))
    }
}

/// Tree encoding of a clustering: a binary merge at a given height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkageNode {
    pub left: Child,
    pub right: Child,
    pub height: f64,
}

impl LinkageNode {
    /// Create a merge of two children.
    pub fn new(left: impl Into<Child>, right: impl Into<Child>, height: f64) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            height,
        }
    }

    /// Detach both sub-merges, leaving leaf placeholders behind.
    fn take_merges(&mut self, into: &mut Vec<Box<LinkageNode>>) {
        for child in [&mut self.left, &mut self.right] {
            if child.is_merge() {
                if let Child::Merge(node) = std::mem::replace(child, Child::Leaf(0)) {
                    into.push(node);
                }
            }
        }
    }
}

// Sub-merges are freed from a heap worklist, so drop depth stays constant
// however deep the tree is.
impl Drop for LinkageNode {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_merges(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.take_merges(&mut pending);
        }
    }
}

/// Flat encoding of a single merge.
///
/// `left`/`right` are leaf indices unless the matching `is_*_from_list` flag
/// is set, in which case they are positions of other entries in the same
/// list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkageEntry {
    pub left: usize,
    #[serde(alias = "isLeftDendrogram")]
    pub is_left_from_list: bool,
    pub right: usize,
    #[serde(alias = "isRightDendrogram")]
    pub is_right_from_list: bool,
    pub height: f64,
}

impl LinkageEntry {
    /// Merge of two leaves.
    pub fn leaves(left: usize, right: usize, height: f64) -> Self {
        Self {
            left,
            is_left_from_list: false,
            right,
            is_right_from_list: false,
            height,
        }
    }

    /// Merge with explicit reference flags.
    pub fn new(
        left: usize,
        is_left_from_list: bool,
        right: usize,
        is_right_from_list: bool,
        height: f64,
    ) -> Self {
        Self {
            left,
            is_left_from_list,
            right,
            is_right_from_list,
            height,
        }
    }
}

/// Either accepted encoding of a clustering.
///
/// Decoding tries the tree form first: a JSON object with `left`, `right` and
/// `height` is a tree, an array is a linkage list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Linkage {
    Tree(LinkageNode),
    List(Vec<LinkageEntry>),
}

impl Linkage {
    /// Check whether the input is in tree form.
    #[inline]
    pub fn is_tree(&self) -> bool {
        matches!(self, Linkage::Tree(_))
    }
}

impl Default for Linkage {
    fn default() -> Self {
        Linkage::List(Vec::new())
    }
}

impl From<LinkageNode> for Linkage {
    fn from(node: LinkageNode) -> Self {
        Linkage::Tree(node)
    }
}

impl From<Vec<LinkageEntry>> for Linkage {
    fn from(entries: Vec<LinkageEntry>) -> Self {
        Linkage::List(entries)
    }
}

/// A linkage entry with its derived center and leaf boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEntry {
    pub left: usize,
    pub is_left_from_list: bool,
    pub right: usize,
    pub is_right_from_list: bool,
    pub height: f64,
    /// Leaf-space x position where this merge attaches to its parent.
    pub center: f64,
    /// Smallest leaf index under this merge (inclusive).
    pub left_boundary: usize,
    /// Largest leaf index under this merge (inclusive).
    pub right_boundary: usize,
}

impl LayoutEntry {
    /// Number of leaves spanned by the boundary range.
    #[inline]
    pub fn span(&self) -> usize {
        self.right_boundary - self.left_boundary + 1
    }

    /// Check whether a leaf index falls inside the boundary range.
    #[inline]
    pub fn covers(&self, leaf: usize) -> bool {
        (self.left_boundary..=self.right_boundary).contains(&leaf)
    }

    /// The raw linkage entry this layout entry was derived from.
    pub fn linkage(&self) -> LinkageEntry {
        LinkageEntry::new(
            self.left,
            self.is_left_from_list,
            self.right,
            self.is_right_from_list,
            self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_json_decodes_as_tree() {
        let json = r#"{"left": 0, "right": {"left": 1, "right": 2, "height": 0.5}, "height": 1.0}"#;
        let linkage: Linkage = serde_json::from_str(json).unwrap();

        assert!(linkage.is_tree());
        let Linkage::Tree(root) = linkage else {
            unreachable!()
        };
        assert_eq!(root.left, Child::Leaf(0));
        assert!(root.right.is_merge());
        assert_eq!(root.height, 1.0);
    }

    #[test]
    fn test_list_json_decodes_as_list() {
        let json = r#"[
            {"left": 0, "isLeftFromList": false, "right": 1, "isRightFromList": false, "height": 1},
            {"left": 0, "isLeftFromList": true, "right": 2, "isRightFromList": false, "height": 2}
        ]"#;
        let linkage: Linkage = serde_json::from_str(json).unwrap();

        assert_eq!(
            linkage,
            Linkage::List(vec![
                LinkageEntry::leaves(0, 1, 1.0),
                LinkageEntry::new(0, true, 2, false, 2.0),
            ])
        );
    }

    #[test]
    fn test_legacy_flag_names_accepted() {
        let json = r#"[{"left": 3, "isLeftDendrogram": false, "right": 4, "isRightDendrogram": false, "height": 0}]"#;
        let linkage: Linkage = serde_json::from_str(json).unwrap();
        assert_eq!(linkage, Linkage::List(vec![LinkageEntry::leaves(3, 4, 0.0)]));
    }

    #[test]
    fn test_malformed_child_is_rejected() {
        let json = r#"{"left": "a", "right": 1, "height": 1.0}"#;
        assert!(serde_json::from_str::<Linkage>(json).is_err());

        let json = r#"{"left": -1, "right": 1, "height": 1.0}"#;
        assert!(serde_json::from_str::<Linkage>(json).is_err());
    }

    #[test]
    fn test_empty_array_is_empty_list() {
        let linkage: Linkage = serde_json::from_str("[]").unwrap();
        assert_eq!(linkage, Linkage::default());
    }

    #[test]
    fn test_layout_entry_span() {
        let entry = LayoutEntry {
            left: 0,
            is_left_from_list: true,
            right: 2,
            is_right_from_list: false,
            height: 2.0,
            center: 1.25,
            left_boundary: 0,
            right_boundary: 2,
        };
        assert_eq!(entry.span(), 3);
        assert!(entry.covers(1));
        assert!(!entry.covers(3));
        assert_eq!(entry.linkage(), LinkageEntry::new(0, true, 2, false, 2.0));
    }
}
