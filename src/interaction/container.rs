//! Canonical hover/selection state of a whole heatmap.
//!
//! The container is the single writer of the row and column sets. Panels
//! report interactions per side; top/bottom panels drive columns and
//! left/right panels drive rows. Every change replaces the affected set
//! wholesale and emits a heatmap-level event with both axes.

use std::rc::Rc;

use super::state::{IndexSet, SharedIndexSet};
use crate::transform::Side;

/// Heatmap-level events.
#[derive(Debug, Clone, PartialEq)]
pub enum HeatmapEvent {
    Hover {
        hovered_rows: SharedIndexSet,
        hovered_cols: SharedIndexSet,
    },
    Select {
        selected_rows: SharedIndexSet,
        selected_cols: SharedIndexSet,
    },
}

/// The sets a panel on one side should render from.
#[derive(Debug, Clone, PartialEq)]
pub struct SideIndices {
    pub hovered: SharedIndexSet,
    pub selected: SharedIndexSet,
}

/// Zoom parameters of the grid. Only rendering scale depends on these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom {
    pub zoom_x: f64,
    pub zoom_y: f64,
    pub wrapper_width: f64,
    pub wrapper_height: f64,
}

impl Default for Zoom {
    fn default() -> Self {
        Self {
            zoom_x: 1.0,
            zoom_y: 1.0,
            wrapper_width: 1.0,
            wrapper_height: 1.0,
        }
    }
}

/// Container state for one heatmap.
#[derive(Debug, Clone, Default)]
pub struct HeatmapState {
    rows: usize,
    cols: usize,
    hovered_rows: SharedIndexSet,
    hovered_cols: SharedIndexSet,
    selected_rows: SharedIndexSet,
    selected_cols: SharedIndexSet,
    zoom: Zoom,
}

impl HeatmapState {
    /// State for a `rows` × `cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn hovered_rows(&self) -> &SharedIndexSet {
        &self.hovered_rows
    }

    pub fn hovered_cols(&self) -> &SharedIndexSet {
        &self.hovered_cols
    }

    pub fn selected_rows(&self) -> &SharedIndexSet {
        &self.selected_rows
    }

    pub fn selected_cols(&self) -> &SharedIndexSet {
        &self.selected_cols
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    /// Sets for a panel attached to `side`.
    pub fn indices_for_side(&self, side: Side) -> SideIndices {
        if side.is_horizontal() {
            SideIndices {
                hovered: Rc::clone(&self.hovered_cols),
                selected: Rc::clone(&self.selected_cols),
            }
        } else {
            SideIndices {
                hovered: Rc::clone(&self.hovered_rows),
                selected: Rc::clone(&self.selected_rows),
            }
        }
    }

    /// Drop indices that do not exist on the axis the side maps to.
    fn clamp(&self, side: Side, indices: SharedIndexSet) -> SharedIndexSet {
        let len = if side.is_horizontal() { self.cols } else { self.rows };
        if indices.iter().all(|&i| i < len) {
            indices
        } else {
            Rc::new(indices.range(..len).copied().collect())
        }
    }

    /// A panel on `side` changed its hovered set.
    pub fn side_hover(&mut self, side: Side, hovered: SharedIndexSet) -> HeatmapEvent {
        let hovered = self.clamp(side, hovered);
        if side.is_horizontal() {
            self.hovered_cols = hovered;
        } else {
            self.hovered_rows = hovered;
        }
        self.hover_event()
    }

    /// A panel on `side` changed its selected set.
    pub fn side_select(&mut self, side: Side, selected: SharedIndexSet) -> HeatmapEvent {
        let selected = self.clamp(side, selected);
        if side.is_horizontal() {
            self.selected_cols = selected;
        } else {
            self.selected_rows = selected;
        }
        self.select_event()
    }

    /// The grid reported the pointer over a cell.
    pub fn cell_hover(&mut self, row: usize, col: usize) -> HeatmapEvent {
        self.hovered_rows = Rc::new(if row < self.rows {
            IndexSet::from([row])
        } else {
            IndexSet::new()
        });
        self.hovered_cols = Rc::new(if col < self.cols {
            IndexSet::from([col])
        } else {
            IndexSet::new()
        });
        self.hover_event()
    }

    /// The pointer left the grid.
    pub fn clear_hover(&mut self) -> HeatmapEvent {
        self.hovered_rows = Rc::new(IndexSet::new());
        self.hovered_cols = Rc::new(IndexSet::new());
        self.hover_event()
    }

    fn hover_event(&self) -> HeatmapEvent {
        HeatmapEvent::Hover {
            hovered_rows: Rc::clone(&self.hovered_rows),
            hovered_cols: Rc::clone(&self.hovered_cols),
        }
    }

    fn select_event(&self) -> HeatmapEvent {
        HeatmapEvent::Select {
            selected_rows: Rc::clone(&self.selected_rows),
            selected_cols: Rc::clone(&self.selected_cols),
        }
    }

    // =========================================================================
    // Zoom
    // =========================================================================

    /// The grid wrapper was resized.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.zoom.wrapper_width = width.max(1.0);
        self.zoom.wrapper_height = height.max(1.0);
    }

    pub fn set_zoom(&mut self, zoom_x: f64, zoom_y: f64) {
        self.zoom.zoom_x = zoom_x;
        self.zoom.zoom_y = zoom_y;
    }

    fn ratio(a: usize, b: usize) -> f64 {
        if b == 0 { 1.0 } else { a as f64 / b as f64 }
    }

    /// Horizontal stretch needed to keep cells square for wide matrices.
    pub fn fit_zoom_x_factor(&self) -> f64 {
        let z = &self.zoom;
        (Self::ratio(self.cols, self.rows) * (z.wrapper_height / z.wrapper_width)).max(1.0)
    }

    /// Vertical stretch needed to keep cells square for tall matrices.
    pub fn fit_zoom_y_factor(&self) -> f64 {
        let z = &self.zoom;
        (Self::ratio(self.rows, self.cols) * (z.wrapper_width / z.wrapper_height)).max(1.0)
    }

    pub fn fitted_zoom_x(&self) -> f64 {
        if self.cols > self.rows {
            self.zoom.zoom_x * self.fit_zoom_x_factor()
        } else {
            self.zoom.zoom_x
        }
    }

    pub fn fitted_zoom_y(&self) -> f64 {
        if self.rows > self.cols {
            self.zoom.zoom_y * self.fit_zoom_y_factor()
        } else {
            self.zoom.zoom_y
        }
    }

    /// Apply a ctrl-wheel zoom step. `horizontal` zooms x (shift held).
    pub fn wheel_zoom(&mut self, delta_y: f64, horizontal: bool) {
        let delta = -delta_y;
        let aspect = self.zoom.wrapper_width / self.zoom.wrapper_height;
        let shape = Self::ratio(self.rows, self.cols);

        if horizontal {
            let min_zoom = if aspect < shape {
                1.0
            } else {
                1.0 / self.fit_zoom_x_factor()
            };
            let step = delta / self.zoom.wrapper_width / self.fit_zoom_x_factor();
            self.zoom.zoom_x = (self.zoom.zoom_x + step).max(min_zoom);
        } else {
            let min_zoom = if aspect > shape {
                1.0
            } else {
                1.0 / self.fit_zoom_y_factor()
            };
            let step = delta / self.zoom.wrapper_height / self.fit_zoom_y_factor();
            self.zoom.zoom_y = (self.zoom.zoom_y + step).max(min_zoom);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared(items: &[usize]) -> SharedIndexSet {
        Rc::new(items.iter().copied().collect())
    }

    #[test]
    fn test_sides_relay_to_axes() {
        let mut state = HeatmapState::new(4, 6);

        state.side_hover(Side::Top, shared(&[1, 2]));
        assert_eq!(state.hovered_cols(), &shared(&[1, 2]));
        assert!(state.hovered_rows().is_empty());

        state.side_select(Side::Left, shared(&[3]));
        assert_eq!(state.selected_rows(), &shared(&[3]));
        assert!(state.selected_cols().is_empty());

        assert_eq!(state.indices_for_side(Side::Bottom).hovered, shared(&[1, 2]));
        assert_eq!(state.indices_for_side(Side::Right).selected, shared(&[3]));
    }

    #[test]
    fn test_cell_hover_sets_both_axes() {
        let mut state = HeatmapState::new(4, 6);
        let event = state.cell_hover(2, 5);

        assert_eq!(
            event,
            HeatmapEvent::Hover {
                hovered_rows: shared(&[2]),
                hovered_cols: shared(&[5]),
            }
        );

        state.clear_hover();
        assert!(state.hovered_rows().is_empty());
        assert!(state.hovered_cols().is_empty());
    }

    #[test]
    fn test_out_of_range_indices_dropped() {
        let mut state = HeatmapState::new(3, 3);
        state.side_select(Side::Right, shared(&[1, 7]));
        assert_eq!(state.selected_rows(), &shared(&[1]));

        state.cell_hover(9, 1);
        assert!(state.hovered_rows().is_empty());
        assert_eq!(state.hovered_cols(), &shared(&[1]));
    }

    #[test]
    fn test_fit_zoom_for_wide_matrix() {
        let mut state = HeatmapState::new(10, 40);
        state.resize(200.0, 100.0);

        // cols/rows = 4, h/w = 0.5
        assert_eq!(state.fit_zoom_x_factor(), 2.0);
        assert_eq!(state.fit_zoom_y_factor(), 1.0);
        assert_eq!(state.fitted_zoom_x(), 2.0);
        assert_eq!(state.fitted_zoom_y(), 1.0);
    }

    #[test]
    fn test_wheel_zoom_is_clamped() {
        let mut state = HeatmapState::new(10, 10);
        state.resize(100.0, 100.0);

        state.wheel_zoom(-50.0, false);
        assert_eq!(state.zoom().zoom_y, 1.5);

        state.wheel_zoom(1000.0, false);
        assert_eq!(state.zoom().zoom_y, 1.0);
    }
}
