//! Dendrogram hover/selection overlay.
//!
//! Pointer transitions map a bracket back to the leaf range it spans and
//! feed that range through the shared hover/select capability. Which
//! brackets render as hovered or selected is derived on demand from the
//! current index sets.

use tracing::trace;

use super::state::{
    IndexSet, InteractionSink, InteractionState, SharedIndexSet, index_range,
};
use crate::layout::DendrogramLayout;
use crate::linkage::LayoutEntry;

/// Pointer state of one dendrogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    /// Pointer is over the bracket of this layout entry.
    Hovering(usize),
}

/// Interaction overlay for a single dendrogram panel.
#[derive(Debug, Clone, Default)]
pub struct DendrogramOverlay {
    state: HoverState,
    interaction: InteractionState,
}

/// A bracket is hovered when both its boundaries are hovered.
pub fn is_bracket_hovered(entry: &LayoutEntry, hovered: &IndexSet) -> bool {
    hovered.contains(&entry.left_boundary) && hovered.contains(&entry.right_boundary)
}

/// A bracket is selected when both boundaries are selected, or when one of
/// its leaf children is. The second rule lets a single selected leaf
/// highlight the bracket it hangs from, whichever side it hangs on.
pub fn is_bracket_selected(entry: &LayoutEntry, selected: &IndexSet) -> bool {
    let left_leaf = !entry.is_left_from_list && selected.contains(&entry.left);
    let right_leaf = !entry.is_right_from_list && selected.contains(&entry.right);
    (selected.contains(&entry.left_boundary) && selected.contains(&entry.right_boundary))
        || left_leaf
        || right_leaf
}

impl DendrogramOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    pub fn hovered(&self) -> &SharedIndexSet {
        self.interaction.hovered()
    }

    pub fn selected(&self) -> &SharedIndexSet {
        self.interaction.selected()
    }

    /// Accept a hovered set broadcast by the container.
    pub fn set_hovered(&mut self, hovered: SharedIndexSet) -> bool {
        self.interaction.set_hovered(hovered)
    }

    /// Accept a selected set broadcast by the container.
    pub fn set_selected(&mut self, selected: SharedIndexSet) -> bool {
        self.interaction.set_selected(selected)
    }

    /// Pointer entered the bracket of entry `index`.
    ///
    /// Hovers every leaf in the bracket's boundary range. An unknown index is
    /// treated like leaving: the hovered set becomes empty.
    pub fn pointer_enter(
        &mut self,
        layout: &DendrogramLayout,
        index: usize,
        sink: &mut impl InteractionSink,
    ) {
        let Some(entry) = layout.entry(index) else {
            trace!(index, "pointer entered unknown bracket");
            self.pointer_leave(sink);
            return;
        };
        self.state = HoverState::Hovering(index);
        self.interaction
            .hover(index_range(entry.left_boundary, entry.right_boundary), sink);
    }

    /// Pointer left the current bracket.
    pub fn pointer_leave(&mut self, sink: &mut impl InteractionSink) {
        self.state = HoverState::Idle;
        self.interaction.clear_hover(sink);
    }

    /// Toggle-select the hovered leaves.
    pub fn click(&mut self, sink: &mut impl InteractionSink) {
        self.interaction.select_hovered(sink);
    }

    /// Entry indices of brackets to render as hovered.
    pub fn hovered_brackets(&self, layout: &DendrogramLayout) -> Vec<usize> {
        let hovered = self.interaction.hovered();
        layout
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, entry)| is_bracket_hovered(entry, hovered))
            .map(|(index, _)| index)
            .collect()
    }

    /// Entry indices of brackets to render as selected.
    pub fn selected_brackets(&self, layout: &DendrogramLayout) -> Vec<usize> {
        let selected = self.interaction.selected();
        layout
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, entry)| is_bracket_selected(entry, selected))
            .map(|(index, _)| index)
            .collect()
    }
}
