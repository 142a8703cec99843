//! DendrogramView - one dendrogram panel attached to a side of the grid.
//!
//! The view owns the derived state of a panel and keeps it consistent:
//! - linkage changes rebuild the layout, transform and hit-test index
//! - side changes rebuild only the transform and hit-test index
//! - hover/selection changes touch neither

use tracing::debug;

use crate::interaction::{DendrogramOverlay, HoverState, InteractionSink, SharedIndexSet};
use crate::layout::{Bracket, DendrogramLayout, Point};
use crate::linkage::{Linkage, LinkageError};
use crate::render::{BracketIndex, SvgScene, render_svg, selection_markers};
use crate::transform::{CoordinateTransform, Side, Viewbox};

/// Configuration for a dendrogram panel.
#[derive(Debug, Clone, PartialEq)]
pub struct DendrogramConfig {
    /// Offset along the leaf axis; 0.5 centres leaf `i` in grid cell `i`.
    pub x_shift: f64,
    /// Offset along the height axis.
    pub y_shift: f64,
    /// Width of the marker drawn under each selected leaf, in leaf units.
    pub selection_marker_width: f64,
    /// Fraction of the viewbox added on the side facing away from the grid.
    pub viewbox_padding: f64,
    /// Maximum distance (drawing units) for a point to hit a bracket.
    pub hit_tolerance: f64,
}

impl Default for DendrogramConfig {
    fn default() -> Self {
        Self {
            x_shift: 0.5,
            y_shift: 0.0,
            selection_marker_width: 0.8,
            viewbox_padding: 0.02,
            hit_tolerance: 0.25,
        }
    }
}

/// A laid-out, transformed and interactive dendrogram.
#[derive(Default)]
pub struct DendrogramView {
    config: DendrogramConfig,
    side: Side,
    layout: DendrogramLayout,
    transform: Option<CoordinateTransform>,
    /// Brackets in drawing space, same order as `layout.brackets()`.
    drawn: Vec<Bracket>,
    index: BracketIndex,
    overlay: DendrogramOverlay,
}

impl DendrogramView {
    pub fn new(config: DendrogramConfig, side: Side) -> Self {
        let mut view = Self {
            config,
            side,
            ..Self::default()
        };
        view.rebuild_drawing();
        view
    }

    pub fn config(&self) -> &DendrogramConfig {
        &self.config
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn layout(&self) -> &DendrogramLayout {
        &self.layout
    }

    pub fn overlay(&self) -> &DendrogramOverlay {
        &self.overlay
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    /// Lay out a new linkage.
    ///
    /// On error the previous layout stays in place.
    pub fn set_linkage(&mut self, linkage: &Linkage) -> Result<(), LinkageError> {
        self.layout = DendrogramLayout::compute(linkage)?;
        self.rebuild_drawing();
        Ok(())
    }

    /// Attach the panel to another side of the grid.
    pub fn set_side(&mut self, side: Side) {
        if side != self.side {
            self.side = side;
            self.rebuild_drawing();
        }
    }

    fn rebuild_drawing(&mut self) {
        let viewbox = Viewbox::for_dendrogram(
            self.layout.width(),
            self.layout.height(),
            self.side,
            self.config.x_shift,
            self.config.y_shift,
        );
        let transform =
            CoordinateTransform::new(self.side, viewbox, self.config.x_shift, self.config.y_shift);

        self.drawn = self
            .layout
            .brackets()
            .iter()
            .map(|bracket| transform.apply_bracket(bracket))
            .collect();
        self.index = BracketIndex::build(&self.drawn);
        self.transform = Some(transform);

        debug!(
            side = %self.side,
            brackets = self.drawn.len(),
            width = viewbox.width,
            height = viewbox.height,
            "dendrogram drawing rebuilt"
        );
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    pub fn transform(&self) -> Option<&CoordinateTransform> {
        self.transform.as_ref()
    }

    pub fn viewbox(&self) -> Viewbox {
        self.transform.map(|t| t.viewbox()).unwrap_or_default()
    }

    /// SVG `viewBox` attribute, padded away from the grid.
    pub fn svg_view_box(&self) -> String {
        self.viewbox()
            .svg_view_box(self.side, self.config.viewbox_padding)
    }

    /// Brackets in drawing space and draw order.
    pub fn drawn_brackets(&self) -> &[Bracket] {
        &self.drawn
    }

    /// Flat corner buffer `[x0, y0, x1, y1, ...]`, four corners per bracket.
    pub fn bracket_coordinates(&self) -> Vec<f64> {
        self.drawn
            .iter()
            .flat_map(|bracket| bracket.corners())
            .flat_map(|p| [p.x, p.y])
            .collect()
    }

    /// Selection marker segments in drawing space.
    pub fn selection_markers(&self) -> Vec<(Point, Point)> {
        match &self.transform {
            Some(transform) => selection_markers(
                self.overlay.selected(),
                self.layout.leaf_count(),
                self.config.selection_marker_width,
                transform,
            ),
            None => Vec::new(),
        }
    }

    pub fn render_svg(&self) -> String {
        let hovered = self.overlay.hovered_brackets(&self.layout);
        let selected = self.overlay.selected_brackets(&self.layout);
        let markers = self.selection_markers();
        let view_box = self.svg_view_box();
        render_svg(&SvgScene {
            brackets: &self.drawn,
            hovered: &hovered,
            selected: &selected,
            markers: &markers,
            view_box: &view_box,
        })
    }

    // =========================================================================
    // Hit testing and pointer input
    // =========================================================================

    /// Entry index of the bracket at a drawing-space point.
    pub fn bracket_at(&self, x: f64, y: f64) -> Option<usize> {
        self.index.bracket_at(x, y, self.config.hit_tolerance)
    }

    pub fn pointer_enter(&mut self, index: usize, sink: &mut impl InteractionSink) {
        self.overlay.pointer_enter(&self.layout, index, sink);
    }

    pub fn pointer_leave(&mut self, sink: &mut impl InteractionSink) {
        self.overlay.pointer_leave(sink);
    }

    /// Pointer moved to a drawing-space point.
    ///
    /// Enters the bracket under the point, or leaves if there is none. Moves
    /// within the same bracket emit nothing.
    pub fn pointer_move(&mut self, x: f64, y: f64, sink: &mut impl InteractionSink) {
        match (self.bracket_at(x, y), self.overlay.state()) {
            (Some(index), HoverState::Hovering(current)) if index == current => {}
            (Some(index), _) => self.pointer_enter(index, sink),
            (None, HoverState::Hovering(_)) => self.pointer_leave(sink),
            (None, HoverState::Idle) => {}
        }
    }

    pub fn click(&mut self, sink: &mut impl InteractionSink) {
        self.overlay.click(sink);
    }

    /// Accept the hovered set broadcast by the container.
    pub fn set_hovered(&mut self, hovered: SharedIndexSet) -> bool {
        self.overlay.set_hovered(hovered)
    }

    /// Accept the selected set broadcast by the container.
    pub fn set_selected(&mut self, selected: SharedIndexSet) -> bool {
        self.overlay.set_selected(selected)
    }

    pub fn hovered_brackets(&self) -> Vec<usize> {
        self.overlay.hovered_brackets(&self.layout)
    }

    pub fn selected_brackets(&self) -> Vec<usize> {
        self.overlay.selected_brackets(&self.layout)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::interaction::{IndexSet, InteractionEvent};
    use crate::linkage::LinkageEntry;

    fn scenario() -> Linkage {
        Linkage::List(vec![
            LinkageEntry::leaves(0, 1, 1.0),
            LinkageEntry::new(0, true, 2, false, 2.0),
        ])
    }

    fn bottom_view() -> DendrogramView {
        let mut view = DendrogramView::new(DendrogramConfig::default(), Side::Bottom);
        view.set_linkage(&scenario()).unwrap();
        view
    }

    #[test]
    fn test_default_config() {
        let config = DendrogramConfig::default();
        assert_eq!(config.x_shift, 0.5);
        assert_eq!(config.selection_marker_width, 0.8);
    }

    #[test]
    fn test_empty_view_draws_nothing() {
        let view = DendrogramView::new(DendrogramConfig::default(), Side::Top);
        assert!(view.drawn_brackets().is_empty());
        assert!(view.bracket_coordinates().is_empty());
        assert_eq!(view.bracket_at(0.5, 0.0), None);
    }

    #[test]
    fn test_viewbox_per_side() {
        let mut view = bottom_view();
        assert_eq!(
            view.viewbox(),
            Viewbox {
                width: 3.0,
                height: 2.0
            }
        );

        view.set_side(Side::Left);
        assert_eq!(
            view.viewbox(),
            Viewbox {
                width: 2.0,
                height: 3.0
            }
        );
    }

    #[test]
    fn test_side_change_keeps_layout() {
        let mut view = bottom_view();
        let before = view.layout().clone();
        view.set_side(Side::Right);
        assert_eq!(view.layout(), &before);
        assert_eq!(view.side(), Side::Right);
        // Right: (y, x + 0.5), root bracket top-left at height 2.
        assert_eq!(view.drawn_brackets()[0].top_left, Point::new(2.0, 1.0));
    }

    #[test]
    fn test_invalid_linkage_keeps_previous_layout() {
        let mut view = bottom_view();
        let bad = Linkage::List(vec![LinkageEntry::new(0, true, 1, false, 1.0)]);
        assert!(view.set_linkage(&bad).is_err());
        assert_eq!(view.layout().entries().len(), 2);
        assert_eq!(view.drawn_brackets().len(), 2);
    }

    #[test]
    fn test_bracket_coordinates() {
        let view = bottom_view();
        let coords = view.bracket_coordinates();
        assert_eq!(coords.len(), 2 * 4 * 2);
        // Root bracket, bottom-left corner at (0.5 + 0.5, 1).
        assert_eq!(&coords[..2], &[1.0, 1.0]);
    }

    #[test]
    fn test_pointer_move_hovers_bracket_range() {
        let mut view = bottom_view();
        let mut events = Vec::new();

        // Root crossbar sits at y = 2 between x = 1 and x = 2.5.
        view.pointer_move(1.75, 2.0, &mut events);
        view.pointer_move(1.8, 2.0, &mut events);
        assert_eq!(events.len(), 1);
        assert_eq!(**view.overlay().hovered(), IndexSet::from([0, 1, 2]));

        view.pointer_move(10.0, 10.0, &mut events);
        assert_eq!(events.len(), 2);
        assert!(view.overlay().hovered().is_empty());
    }

    #[test]
    fn test_click_selects_and_marks_leaves() {
        let mut view = bottom_view();
        let mut events = Vec::new();
        view.pointer_enter(0, &mut events);
        view.click(&mut events);

        assert_eq!(
            events.last(),
            Some(&InteractionEvent::Select {
                selected: Rc::new(IndexSet::from([0, 1]))
            })
        );
        assert_eq!(view.selected_brackets(), vec![0]);
        assert_eq!(view.selection_markers().len(), 2);
    }

    #[test]
    fn test_broadcast_sets_drive_rendering() {
        let mut view = bottom_view();
        assert!(view.set_hovered(Rc::new(IndexSet::from([0, 1, 2]))));
        assert_eq!(view.hovered_brackets(), vec![0, 1]);

        let svg = view.render_svg();
        assert!(svg.contains(r#"viewBox="0 0 3 2.04""#));
        assert!(svg.contains(r#"class="dendrogram-path hovered" data-index="1""#));
    }
}
