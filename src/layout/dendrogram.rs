//! Assembled dendrogram layout.

use tracing::{debug, instrument, warn};

use super::centers::compute_centers;
use super::flatten::normalize;
use super::geometry::{Bracket, brackets, dendrogram_width};
use super::validate::{root_index, validate};
use crate::linkage::{LayoutEntry, Linkage, LinkageError};

/// Immutable layout derived from one linkage input.
///
/// Recompute it whenever the linkage changes; side and viewport changes only
/// affect the coordinate transform, never this structure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DendrogramLayout {
    entries: Vec<LayoutEntry>,
    brackets: Vec<Bracket>,
    root: Option<usize>,
    width: f64,
    height: f64,
}

impl DendrogramLayout {
    /// Normalize, validate and lay out a linkage.
    ///
    /// # Errors
    ///
    /// Returns [`LinkageError`] when the input does not describe a single
    /// binary tree over contiguous leaves `0..=n`.
    #[instrument(
        name = "layout.compute",
        level = "debug",
        err,
        skip(linkage),
        fields(tree = linkage.is_tree())
    )]
    pub fn compute(linkage: &Linkage) -> Result<Self, LinkageError> {
        let list = normalize(linkage);

        if let Err(err) = validate(&list) {
            warn!(entries = list.len(), %err, "rejecting linkage input");
            return Err(err);
        }

        let entries = compute_centers(&list)?;
        let root = root_index(&list);
        let width = dendrogram_width(&entries);
        let height = root
            .and_then(|root| entries.get(root))
            .map_or(0.0, |root| root.height);
        let brackets = brackets(&entries);

        debug!(entries = entries.len(), width, height, "dendrogram laid out");

        Ok(Self {
            entries,
            brackets,
            root,
            width,
            height,
        })
    }

    /// Layout entries in input (or post-order, for trees) order.
    pub fn entries(&self) -> &[LayoutEntry] {
        &self.entries
    }

    /// Get a layout entry by list position.
    pub fn entry(&self, index: usize) -> Option<&LayoutEntry> {
        self.entries.get(index)
    }

    /// Brackets in draw order (descending height).
    pub fn brackets(&self) -> &[Bracket] {
        &self.brackets
    }

    /// Position of the root merge, or None for an empty dendrogram.
    pub fn root_index(&self) -> Option<usize> {
        self.root
    }

    /// Leaf-index span.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height of the root merge.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Number of leaves covered (zero when nothing is drawn).
    pub fn leaf_count(&self) -> usize {
        if self.entries.is_empty() {
            0
        } else {
            self.entries.len() + 1
        }
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
