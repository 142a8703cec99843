//! Hover and selection state.
//!
//! - `state`: the hoverable/selectable capability every panel delegates to
//! - `overlay`: dendrogram pointer state machine and bracket highlighting
//! - `panels`: label and color-annotation hover rules
//! - `container`: canonical row/column sets owned by the heatmap

mod container;
mod overlay;
mod panels;
mod state;

pub use container::{HeatmapEvent, HeatmapState, SideIndices, Zoom};
pub use overlay::{DendrogramOverlay, HoverState, is_bracket_hovered, is_bracket_selected};
pub use panels::{ColorAnnotationStrip, LabelPanel};
pub use state::{
    DEFAULT_EVENT_CAPACITY, EventQueue, IndexSet, InteractionEvent, InteractionSink, InteractionState, SharedIndexSet, index_range,
    toggle_selection,
};
