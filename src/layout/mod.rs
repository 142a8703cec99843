//! Dendrogram layout engine.
//!
//! Pure functions that turn a linkage into drawable geometry:
//! - `flatten`: tree encoding → linkage list (post-order)
//! - `validate`: structural checks over the merge dependency graph
//! - `centers`: iterative center and leaf-boundary fill
//! - `geometry`: width, brackets and draw order
//!
//! `DendrogramLayout` ties the stages together.

pub mod centers;
mod dendrogram;
pub mod flatten;
pub mod geometry;
pub mod validate;

pub use dendrogram::DendrogramLayout;
pub use geometry::{Bracket, Point};
