//! Errors raised while normalizing linkage input.

/// Structural problems found in linkage input.
///
/// Every variant is a fail-fast condition: the layout engine never produces
/// partial geometry from malformed input.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
#[non_exhaustive]
pub enum LinkageError {
    /// The input could not be decoded as either a tree or a linkage list.
    #[error("malformed linkage input: {reason}")]
    MalformedNode {
        /// Decoder message describing the mismatch.
        reason: String,
    },
    /// A list reference points past the end of the linkage list.
    #[error("entry {entry} references merge {target}, but the list has {len} entries")]
    DanglingReference {
        /// Entry holding the reference.
        entry: usize,
        /// Referenced list position.
        target: usize,
        /// Length of the linkage list.
        len: usize,
    },
    /// A leaf index is outside `0..leaf_count`.
    #[error("entry {entry} references leaf {leaf}, but only {leaf_count} leaves exist")]
    LeafOutOfRange {
        /// Entry holding the reference.
        entry: usize,
        /// Offending leaf index.
        leaf: usize,
        /// Number of leaves implied by the list length.
        leaf_count: usize,
    },
    /// A leaf appears in more than one merge.
    #[error("leaf {leaf} is merged more than once")]
    DuplicateLeaf {
        /// Offending leaf index.
        leaf: usize,
    },
    /// A leaf in `0..leaf_count` is never merged.
    #[error("leaf {leaf} is not covered by any merge")]
    MissingLeaf {
        /// Leaf index that no entry references.
        leaf: usize,
    },
    /// A merge is referenced as a child by more than one parent.
    #[error("merge {entry} has more than one parent")]
    SharedMerge {
        /// Merge referenced more than once.
        entry: usize,
    },
    /// Merge references form a cycle.
    #[error("merge references form a cycle through entry {entry}")]
    Cycle {
        /// An entry on the cycle.
        entry: usize,
    },
    /// A merge cannot be reached from the root.
    #[error("merge {entry} is not reachable from root {root}")]
    UnreachableMerge {
        /// Disconnected merge.
        entry: usize,
        /// Root merge (maximum height).
        root: usize,
    },
    /// A merge spans leaves that are not contiguous in leaf order.
    #[error(
        "merge {entry} covers {leaves} leaves but spans [{left_boundary}, {right_boundary}]"
    )]
    NonContiguousSubtree {
        /// Offending merge.
        entry: usize,
        /// Number of leaves under the merge.
        leaves: usize,
        /// Smallest leaf index under the merge.
        left_boundary: usize,
        /// Largest leaf index under the merge.
        right_boundary: usize,
    },
    /// A merge height is negative or not finite.
    #[error("merge {entry} has invalid height {height}")]
    InvalidHeight {
        /// Offending merge.
        entry: usize,
        /// Height as given.
        height: f64,
    },
}
