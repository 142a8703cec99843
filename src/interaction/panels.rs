//! Hover rules for the label panel and the color annotation strip.
//!
//! Both delegate set handling and toggling to `InteractionState`, so a click
//! on a label, an annotation or a dendrogram bracket selects identically for
//! the same hovered set.

use std::collections::HashMap;

use super::state::{
    IndexSet, InteractionEvent, InteractionSink, InteractionState, SharedIndexSet,
};
use crate::transform::Side;

/// Axis labels: hovering label `i` hovers exactly `{i}`.
#[derive(Debug, Clone, Default)]
pub struct LabelPanel {
    labels: Vec<String>,
    interaction: InteractionState,
}

impl LabelPanel {
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            interaction: InteractionState::new(),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn set_hovered(&mut self, hovered: SharedIndexSet) -> bool {
        self.interaction.set_hovered(hovered)
    }

    pub fn set_selected(&mut self, selected: SharedIndexSet) -> bool {
        self.interaction.set_selected(selected)
    }

    /// Pointer entered label `index`. Out-of-range indices clear the hover.
    pub fn pointer_enter(&mut self, index: usize, sink: &mut impl InteractionSink) {
        if index < self.labels.len() {
            self.interaction.hover(IndexSet::from([index]), sink);
        } else {
            self.interaction.clear_hover(sink);
        }
    }

    pub fn pointer_leave(&mut self, sink: &mut impl InteractionSink) {
        self.interaction.clear_hover(sink);
    }

    pub fn click(&mut self, sink: &mut impl InteractionSink) {
        self.interaction.select_hovered(sink);
    }
}

/// Categorical color strip: hovering a cell hovers every cell of that color.
#[derive(Debug, Clone, Default)]
pub struct ColorAnnotationStrip {
    side: Side,
    colors: Vec<String>,
    color_indices: HashMap<String, IndexSet>,
    hovered_color: Option<String>,
    interaction: InteractionState,
}

impl ColorAnnotationStrip {
    pub fn new(side: Side, colors: Vec<String>) -> Self {
        let mut color_indices: HashMap<String, IndexSet> = HashMap::new();
        for (index, color) in colors.iter().enumerate() {
            color_indices.entry(color.clone()).or_default().insert(index);
        }
        Self {
            side,
            colors,
            color_indices,
            hovered_color: None,
            interaction: InteractionState::new(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn hovered_color(&self) -> Option<&str> {
        self.hovered_color.as_deref()
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Indices carrying `color`.
    pub fn indices_of(&self, color: &str) -> Option<&IndexSet> {
        self.color_indices.get(color)
    }

    pub fn set_hovered(&mut self, hovered: SharedIndexSet) -> bool {
        self.interaction.set_hovered(hovered)
    }

    pub fn set_selected(&mut self, selected: SharedIndexSet) -> bool {
        self.interaction.set_selected(selected)
    }

    /// Pointer entered cell `index`.
    ///
    /// Moving between cells of the same color emits nothing.
    pub fn pointer_enter(&mut self, index: usize, sink: &mut impl InteractionSink) {
        let Some(color) = self.colors.get(index) else {
            return;
        };
        if self.hovered_color.as_ref() == Some(color) {
            return;
        }

        let indices = self.color_indices.get(color).cloned().unwrap_or_default();
        self.hovered_color = Some(color.clone());
        self.interaction.hover(indices, sink);
        self.emit_color_hover(sink);
    }

    pub fn pointer_leave(&mut self, sink: &mut impl InteractionSink) {
        self.hovered_color = None;
        self.interaction.clear_hover(sink);
        self.emit_color_hover(sink);
    }

    pub fn click(&mut self, sink: &mut impl InteractionSink) {
        self.interaction.select_hovered(sink);
    }

    fn emit_color_hover(&self, sink: &mut impl InteractionSink) {
        sink.emit(InteractionEvent::ColorHover {
            side: self.side,
            color: self.hovered_color.clone(),
        });
    }
}
