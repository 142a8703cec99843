//! Linkage input model.
//!
//! A hierarchical clustering arrives in one of two encodings:
//! - a nested tree of binary merges (`LinkageNode`), or
//! - a flat linkage table (`LinkageEntry` list) where entries refer to
//!   other entries by list position.
//!
//! Both are wrapped in the `Linkage` sum type and resolved once, at the
//! boundary, into the canonical `LayoutEntry` list used by the layout engine.

mod error;
mod json;
mod model;

pub use error::LinkageError;
pub use json::{linkage_from_value, parse_linkage_json};
pub use model::{Child, LayoutEntry, Linkage, LinkageEntry, LinkageNode};
