//! Heatmap Dendrogram - WASM Module
//!
//! Layout, coordinate transforms and linked hover/selection state for
//! heatmap dendrograms. Compiled to WebAssembly, with a JavaScript-friendly
//! API exposed via wasm-bindgen.
//!
//! # Architecture
//!
//! - `linkage`: input model (nested tree or flat merge list) and its errors
//! - `layout`: normalization, validation, centers/boundaries and brackets
//! - `transform`: per-side mapping from layout space to drawing space
//! - `interaction`: hover/select capability, panel rules and container state
//! - `render`: SVG paths, markup ids and R-tree hit testing
//! - `colors`: color parsing and the heatmap color scale
//! - `view`: a single dendrogram panel tying the above together

use js_sys::Float64Array;
use wasm_bindgen::prelude::*;

pub mod colors;
pub mod interaction;
pub mod layout;
pub mod linkage;
pub mod render;
pub mod transform;
pub mod view;

use colors::ColorScale;
use interaction::{EventQueue, HeatmapEvent, HeatmapState, IndexSet, InteractionEvent};
pub use linkage::parse_linkage_json;
use transform::Side;
use view::{DendrogramConfig, DendrogramView};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(err: impl std::fmt::Display) -> JsError {
    JsError::new(&err.to_string())
}

fn parse_side(side: &str) -> Result<Side, JsError> {
    side.parse().map_err(js_error)
}

fn to_index_set(indices: &[u32]) -> IndexSet {
    indices.iter().map(|&i| i as usize).collect()
}

fn to_js_indices(indices: &IndexSet) -> Vec<u32> {
    indices.iter().map(|&i| i as u32).collect()
}

fn to_js_list(indices: &[usize]) -> Vec<u32> {
    indices.iter().map(|&i| i as u32).collect()
}

/// One dendrogram panel.
///
/// Wraps a `DendrogramView`. Pointer methods return the panel's new hovered
/// or selected leaf indices, which the caller relays to the container.
#[wasm_bindgen]
pub struct HeatmapDendrogramWasm {
    view: DendrogramView,
    events: EventQueue,
}

#[wasm_bindgen]
impl HeatmapDendrogramWasm {
    /// Create an empty dendrogram attached to `side`
    /// (`"top"`, `"bottom"`, `"left"` or `"right"`).
    #[wasm_bindgen(constructor)]
    pub fn new(side: &str) -> Result<HeatmapDendrogramWasm, JsError> {
        Ok(Self {
            view: DendrogramView::new(DendrogramConfig::default(), parse_side(side)?),
            events: EventQueue::default(),
        })
    }

    /// Create a dendrogram with explicit drawing parameters.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(
        side: &str,
        x_shift: f64,
        y_shift: f64,
        selection_marker_width: f64,
        viewbox_padding: f64,
    ) -> Result<HeatmapDendrogramWasm, JsError> {
        let config = DendrogramConfig {
            x_shift,
            y_shift,
            selection_marker_width,
            viewbox_padding,
            ..DendrogramConfig::default()
        };
        Ok(Self {
            view: DendrogramView::new(config, parse_side(side)?),
            events: EventQueue::default(),
        })
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Set the linkage: either a nested `{left, right, height}` tree or an
    /// array of `{left, isLeftFromList, right, isRightFromList, height}`.
    ///
    /// The value goes through `JSON.stringify` so deeply nested trees are
    /// decoded without recursion.
    #[wasm_bindgen(js_name = setLinkage)]
    pub fn set_linkage(&mut self, linkage: JsValue) -> Result<(), JsError> {
        let json = js_sys::JSON::stringify(&linkage)
            .map_err(|_| js_error("linkage is not JSON-serializable"))?;
        let json = json
            .as_string()
            .ok_or_else(|| js_error("linkage is not JSON-serializable"))?;
        self.set_linkage_json(&json)
    }

    /// Set the linkage from a JSON string.
    #[wasm_bindgen(js_name = setLinkageJson)]
    pub fn set_linkage_json(&mut self, json: &str) -> Result<(), JsError> {
        let linkage = parse_linkage_json(json).map_err(js_error)?;
        self.view.set_linkage(&linkage).map_err(js_error)
    }

    #[wasm_bindgen(js_name = setSide)]
    pub fn set_side(&mut self, side: &str) -> Result<(), JsError> {
        self.view.set_side(parse_side(side)?);
        Ok(())
    }

    pub fn side(&self) -> String {
        self.view.side().to_string()
    }

    // =========================================================================
    // Layout queries
    // =========================================================================

    #[wasm_bindgen(js_name = leafCount)]
    pub fn leaf_count(&self) -> u32 {
        self.view.layout().leaf_count() as u32
    }

    #[wasm_bindgen(js_name = bracketCount)]
    pub fn bracket_count(&self) -> u32 {
        self.view.drawn_brackets().len() as u32
    }

    /// Leaf-index span of the dendrogram.
    pub fn width(&self) -> f64 {
        self.view.layout().width()
    }

    /// Height of the root merge.
    pub fn height(&self) -> f64 {
        self.view.layout().height()
    }

    /// Layout entries with centers and boundaries, as plain JS objects.
    #[wasm_bindgen(js_name = layoutEntries)]
    pub fn layout_entries(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(self.view.layout().entries()).map_err(js_error)
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Drawing-space corners `[x0, y0, ... x3, y3]` per bracket, in draw order.
    #[wasm_bindgen(js_name = bracketCoordinates)]
    pub fn bracket_coordinates(&self) -> Float64Array {
        Float64Array::from(&self.view.bracket_coordinates()[..])
    }

    /// Layout entry index of each bracket, in draw order.
    #[wasm_bindgen(js_name = bracketIndices)]
    pub fn bracket_indices(&self) -> Vec<u32> {
        self.view
            .drawn_brackets()
            .iter()
            .map(|bracket| bracket.index as u32)
            .collect()
    }

    /// Drawn brackets as plain JS objects.
    #[wasm_bindgen(js_name = drawnBrackets)]
    pub fn drawn_brackets(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(self.view.drawn_brackets()).map_err(js_error)
    }

    /// Selection marker endpoints `[x0, y0, x1, y1]` per selected leaf.
    #[wasm_bindgen(js_name = selectionMarkers)]
    pub fn selection_markers(&self) -> Float64Array {
        let flat: Vec<f64> = self
            .view
            .selection_markers()
            .into_iter()
            .flat_map(|(from, to)| [from.x, from.y, to.x, to.y])
            .collect();
        Float64Array::from(&flat[..])
    }

    /// SVG `viewBox` attribute value.
    #[wasm_bindgen(js_name = viewBox)]
    pub fn view_box(&self) -> String {
        self.view.svg_view_box()
    }

    #[wasm_bindgen(js_name = viewboxWidth)]
    pub fn viewbox_width(&self) -> f64 {
        self.view.viewbox().width
    }

    #[wasm_bindgen(js_name = viewboxHeight)]
    pub fn viewbox_height(&self) -> f64 {
        self.view.viewbox().height
    }

    #[wasm_bindgen(js_name = renderSvg)]
    pub fn render_svg(&self) -> String {
        self.view.render_svg()
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    /// Layout entry index of the bracket at a drawing-space point.
    #[wasm_bindgen(js_name = bracketAt)]
    pub fn bracket_at(&self, x: f64, y: f64) -> Option<u32> {
        self.view.bracket_at(x, y).map(|i| i as u32)
    }

    /// Pointer entered the bracket of a layout entry. Returns hovered leaves.
    #[wasm_bindgen(js_name = pointerEnter)]
    pub fn pointer_enter(&mut self, index: u32) -> Vec<u32> {
        self.view.pointer_enter(index as usize, &mut self.events);
        self.hovered_indices()
    }

    /// Pointer moved to a drawing-space point.
    ///
    /// Returns true if the hovered set changed.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        let before = self.events.emitted();
        self.view.pointer_move(x, y, &mut self.events);
        self.events.emitted() != before
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) -> Vec<u32> {
        self.view.pointer_leave(&mut self.events);
        self.hovered_indices()
    }

    /// Toggle-select the hovered leaves. Returns selected leaves.
    pub fn click(&mut self) -> Vec<u32> {
        self.view.click(&mut self.events);
        self.selected_indices()
    }

    /// Number of interaction events not yet drained.
    ///
    /// The queue is bounded: consecutive hovers collapse into the latest one
    /// and the oldest events are dropped past capacity.
    #[wasm_bindgen(js_name = pendingEvents)]
    pub fn pending_events(&self) -> u32 {
        self.events.len() as u32
    }

    /// Take the queued interaction events as an array of
    /// `{type: "hover" | "select" | "colorHover", ...}` objects.
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.events.drain()).map_err(js_error)
    }

    /// Drop queued interaction events.
    #[wasm_bindgen(js_name = clearEvents)]
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    #[wasm_bindgen(js_name = hoveredIndices)]
    pub fn hovered_indices(&self) -> Vec<u32> {
        to_js_indices(self.view.overlay().hovered())
    }

    #[wasm_bindgen(js_name = selectedIndices)]
    pub fn selected_indices(&self) -> Vec<u32> {
        to_js_indices(self.view.overlay().selected())
    }

    /// Accept the hovered leaves broadcast by the container.
    #[wasm_bindgen(js_name = setHoveredIndices)]
    pub fn set_hovered_indices(&mut self, indices: &[u32]) -> bool {
        self.view.set_hovered(to_index_set(indices).into())
    }

    /// Accept the selected leaves broadcast by the container.
    #[wasm_bindgen(js_name = setSelectedIndices)]
    pub fn set_selected_indices(&mut self, indices: &[u32]) -> bool {
        self.view.set_selected(to_index_set(indices).into())
    }

    /// Layout entry indices of brackets to render as hovered.
    #[wasm_bindgen(js_name = hoveredBrackets)]
    pub fn hovered_brackets(&self) -> Vec<u32> {
        to_js_list(&self.view.hovered_brackets())
    }

    /// Layout entry indices of brackets to render as selected.
    #[wasm_bindgen(js_name = selectedBrackets)]
    pub fn selected_brackets(&self) -> Vec<u32> {
        to_js_list(&self.view.selected_brackets())
    }
}

/// Canonical row/column hover and selection state of a heatmap.
#[wasm_bindgen]
pub struct HeatmapStateWasm {
    state: HeatmapState,
}

#[wasm_bindgen]
impl HeatmapStateWasm {
    #[wasm_bindgen(constructor)]
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            state: HeatmapState::new(rows as usize, cols as usize),
        }
    }

    /// A panel on `side` reported a new hovered set.
    #[wasm_bindgen(js_name = sideHover)]
    pub fn side_hover(&mut self, side: &str, indices: &[u32]) -> Result<(), JsError> {
        let side = parse_side(side)?;
        self.state.side_hover(side, to_index_set(indices).into());
        Ok(())
    }

    /// A panel on `side` reported a new selected set.
    #[wasm_bindgen(js_name = sideSelect)]
    pub fn side_select(&mut self, side: &str, indices: &[u32]) -> Result<(), JsError> {
        let side = parse_side(side)?;
        self.state.side_select(side, to_index_set(indices).into());
        Ok(())
    }

    #[wasm_bindgen(js_name = cellHover)]
    pub fn cell_hover(&mut self, row: u32, col: u32) {
        self.state.cell_hover(row as usize, col as usize);
    }

    #[wasm_bindgen(js_name = clearHover)]
    pub fn clear_hover(&mut self) {
        self.state.clear_hover();
    }

    /// Hovered leaves for a panel on `side`.
    #[wasm_bindgen(js_name = hoveredFor)]
    pub fn hovered_for(&self, side: &str) -> Result<Vec<u32>, JsError> {
        let side = parse_side(side)?;
        Ok(to_js_indices(&self.state.indices_for_side(side).hovered))
    }

    /// Selected leaves for a panel on `side`.
    #[wasm_bindgen(js_name = selectedFor)]
    pub fn selected_for(&self, side: &str) -> Result<Vec<u32>, JsError> {
        let side = parse_side(side)?;
        Ok(to_js_indices(&self.state.indices_for_side(side).selected))
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.state.resize(width, height);
    }

    #[wasm_bindgen(js_name = setZoom)]
    pub fn set_zoom(&mut self, zoom_x: f64, zoom_y: f64) {
        self.state.set_zoom(zoom_x, zoom_y);
    }

    #[wasm_bindgen(js_name = wheelZoom)]
    pub fn wheel_zoom(&mut self, delta_y: f64, horizontal: bool) {
        self.state.wheel_zoom(delta_y, horizontal);
    }

    #[wasm_bindgen(js_name = fittedZoomX)]
    pub fn fitted_zoom_x(&self) -> f64 {
        self.state.fitted_zoom_x()
    }

    #[wasm_bindgen(js_name = fittedZoomY)]
    pub fn fitted_zoom_y(&self) -> f64 {
        self.state.fitted_zoom_y()
    }
}

/// White-to-color scale for heatmap cells.
#[wasm_bindgen]
pub struct ColorScaleWasm {
    scale: ColorScale,
}

#[wasm_bindgen]
impl ColorScaleWasm {
    /// `color` is `rgb(r, g, b)` or `#rrggbb`.
    #[wasm_bindgen(constructor)]
    pub fn new(color: &str) -> Result<ColorScaleWasm, JsError> {
        Ok(Self {
            scale: ColorScale::new(color).map_err(js_error)?,
        })
    }

    /// CSS color for a value in `[0, 1]`.
    #[wasm_bindgen(js_name = colorAt)]
    pub fn color_at(&self, value: f64) -> Result<String, JsError> {
        self.scale.color_at(value).map_err(js_error)
    }
}

/// Relay a panel's interaction events into the container.
///
/// Returns the heatmap-level events produced, in order.
pub fn relay_events(
    state: &mut HeatmapState,
    side: Side,
    events: &[InteractionEvent],
) -> Vec<HeatmapEvent> {
    events
        .iter()
        .filter_map(|event| match event {
            InteractionEvent::Hover { hovered } => {
                Some(state.side_hover(side, std::rc::Rc::clone(hovered)))
            }
            InteractionEvent::Select { selected } => {
                Some(state.side_select(side, std::rc::Rc::clone(selected)))
            }
            InteractionEvent::ColorHover { .. } => None,
        })
        .collect()
}
