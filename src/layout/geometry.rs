//! Derived dendrogram geometry in engine space.
//!
//! Engine space has x = leaf position (leaf `i` sits at `i`) and y = merge
//! height (leaves at 0, root at the maximum height).

use serde::Serialize;

use crate::linkage::LayoutEntry;

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The stepped bracket drawn for one merge.
///
/// Corners are listed in drawing order: up the left child, across, and down
/// the right child.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bracket {
    /// Position of the merge in the layout entry list.
    pub index: usize,
    pub height: f64,
    pub bottom_left: Point,
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_right: Point,
    pub left_boundary: usize,
    pub right_boundary: usize,
    /// The left child is a leaf rather than a sub-merge.
    pub left_is_leaf: bool,
    /// The right child is a leaf rather than a sub-merge.
    pub right_is_leaf: bool,
}

impl Bracket {
    /// The four corners in drawing order.
    #[inline]
    pub fn corners(&self) -> [Point; 4] {
        [
            self.bottom_left,
            self.top_left,
            self.top_right,
            self.bottom_right,
        ]
    }

    /// Map every corner through `f`, keeping the metadata.
    pub fn map_points(&self, f: impl Fn(Point) -> Point) -> Self {
        Self {
            bottom_left: f(self.bottom_left),
            top_left: f(self.top_left),
            top_right: f(self.top_right),
            bottom_right: f(self.bottom_right),
            ..*self
        }
    }
}

/// Leaf-index span of the dendrogram: `max(right_boundary) - min(left_boundary)`.
pub fn dendrogram_width(entries: &[LayoutEntry]) -> f64 {
    let min_left = entries.iter().map(|e| e.left_boundary).min();
    let max_right = entries.iter().map(|e| e.right_boundary).max();
    match (min_left, max_right) {
        (Some(min_left), Some(max_right)) => (max_right - min_left) as f64,
        _ => 0.0,
    }
}

/// Bracket for a single entry, resolving child positions against `entries`.
fn bracket_for(index: usize, entry: &LayoutEntry, entries: &[LayoutEntry]) -> Bracket {
    let child = |target: usize, from_list: bool| -> (f64, f64) {
        match entries.get(target) {
            Some(child) if from_list => (child.center, child.height),
            _ => (target as f64, 0.0),
        }
    };
    let (left_pos, left_height) = child(entry.left, entry.is_left_from_list);
    let (right_pos, right_height) = child(entry.right, entry.is_right_from_list);

    Bracket {
        index,
        height: entry.height,
        bottom_left: Point::new(left_pos, left_height),
        top_left: Point::new(left_pos, entry.height),
        top_right: Point::new(right_pos, entry.height),
        bottom_right: Point::new(right_pos, right_height),
        left_boundary: entry.left_boundary,
        right_boundary: entry.right_boundary,
        left_is_leaf: !entry.is_left_from_list,
        right_is_leaf: !entry.is_right_from_list,
    }
}

/// One bracket per merge, ordered by descending height.
///
/// Ties keep list order. The root is therefore drawn first and the lowest
/// merges last, so they end up on top for hit testing.
pub fn brackets(entries: &[LayoutEntry]) -> Vec<Bracket> {
    let mut brackets: Vec<Bracket> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| bracket_for(index, entry, entries))
        .collect();
    brackets.sort_by(|a, b| b.height.total_cmp(&a.height));
    brackets
}
