//! Coordinate transforms for attaching a dendrogram to a grid side.

mod coords;
mod side;

pub use coords::{CoordinateTransform, Viewbox};
pub use side::{Side, SideParseError};
