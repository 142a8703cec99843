//! Rendering helpers: SVG output and hit testing.
//!
//! Everything here works on drawing-space brackets, i.e. after the
//! coordinate transform has been applied.

mod ids;
mod svg;

pub use hit_test::{BracketIndex, BracketSegment};
pub use ids::next_markup_id;
pub use svg::{SvgScene, bracket_path, line_path, render_svg, selection_markers};
