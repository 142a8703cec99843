//! Hoverable/selectable capability shared by every visual panel.
//!
//! Panels (dendrogram, labels, color annotations) hold an
//! `InteractionState` and delegate to it. The state never mutates a set in
//! place: every change builds a new set, swaps the `Rc`, and emits an event
//! carrying the new set so sibling panels can re-render from it.

use std::collections::{BTreeSet, VecDeque};
use std::rc::Rc;

use serde::Serialize;
use tracing::trace;

use crate::transform::Side;

/// A set of leaf (row or column) indices.
pub type IndexSet = BTreeSet<usize>;

/// Shared, read-only view of an index set.
pub type SharedIndexSet = Rc<IndexSet>;

/// All indices in the inclusive range `[start, stop]`.
pub fn index_range(start: usize, stop: usize) -> IndexSet {
    (start..=stop).collect()
}

/// Toggle `toggled` in `selected`.
///
/// If every toggled index is already selected they are all removed,
/// otherwise they are all added. Applying the same toggle twice restores the
/// original selection.
pub fn toggle_selection(selected: &IndexSet, toggled: &IndexSet) -> IndexSet {
    if toggled.is_subset(selected) {
        selected.difference(toggled).copied().collect()
    } else {
        selected.union(toggled).copied().collect()
    }
}

/// Events emitted by interactive panels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InteractionEvent {
    Hover { hovered: SharedIndexSet },
    Select { selected: SharedIndexSet },
    /// A color annotation category was entered (`Some`) or left (`None`).
    ColorHover { side: Side, color: Option<String> },
}

/// Receiver for interaction events.
pub trait InteractionSink {
    fn emit(&mut self, event: InteractionEvent);
}

impl InteractionSink for Vec<InteractionEvent> {
    fn emit(&mut self, event: InteractionEvent) {
        self.push(event);
    }
}

/// Default capacity of an [`EventQueue`].
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Bounded event sink for callers that poll instead of relaying immediately.
///
/// Hover events carry the whole hovered set, so a hover queued directly
/// behind another hover replaces it. Past `capacity` the oldest event is
/// dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct EventQueue {
    events: VecDeque<InteractionEvent>,
    capacity: usize,
    emitted: u64,
}

impl EventQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::new(),
            capacity: capacity.max(1),
            emitted: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Total events ever emitted into this queue, including coalesced ones.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    pub fn iter(&self) -> impl Iterator<Item = &InteractionEvent> {
        self.events.iter()
    }

    /// Remove and return every queued event, oldest first.
    pub fn drain(&mut self) -> Vec<InteractionEvent> {
        self.events.drain(..).collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

impl InteractionSink for EventQueue {
    fn emit(&mut self, event: InteractionEvent) {
        self.emitted += 1;
        if matches!(event, InteractionEvent::Hover { .. })
            && matches!(self.events.back(), Some(InteractionEvent::Hover { .. }))
        {
            self.events.pop_back();
        }
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

/// Hovered and selected indices owned by one panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    hovered: SharedIndexSet,
    selected: SharedIndexSet,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> &SharedIndexSet {
        &self.hovered
    }

    pub fn selected(&self) -> &SharedIndexSet {
        &self.selected
    }

    /// Replace the hovered set from outside (no event).
    ///
    /// Returns true if the set actually changed.
    pub fn set_hovered(&mut self, hovered: SharedIndexSet) -> bool {
        let changed = !Rc::ptr_eq(&self.hovered, &hovered) && self.hovered != hovered;
        self.hovered = hovered;
        changed
    }

    /// Replace the selected set from outside (no event).
    ///
    /// Returns true if the set actually changed.
    pub fn set_selected(&mut self, selected: SharedIndexSet) -> bool {
        let changed = !Rc::ptr_eq(&self.selected, &selected) && self.selected != selected;
        self.selected = selected;
        changed
    }

    /// Hover a new set and emit a hover event.
    pub fn hover(&mut self, indices: IndexSet, sink: &mut impl InteractionSink) {
        trace!(count = indices.len(), "hover");
        self.hovered = Rc::new(indices);
        sink.emit(InteractionEvent::Hover {
            hovered: Rc::clone(&self.hovered),
        });
    }

    /// Clear the hovered set and emit a hover event.
    pub fn clear_hover(&mut self, sink: &mut impl InteractionSink) {
        self.hover(IndexSet::new(), sink);
    }

    /// Toggle the hovered set into the selection and emit a select event.
    pub fn select_hovered(&mut self, sink: &mut impl InteractionSink) {
        let selected = toggle_selection(&self.selected, &self.hovered);
        trace!(count = selected.len(), "select");
        self.selected = Rc::new(selected);
        sink.emit(InteractionEvent::Select {
            selected: Rc::clone(&self.selected),
        });
    }
}
