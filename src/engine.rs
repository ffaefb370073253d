//! The board engine: drag event handlers over the ordered mirror.
//!
//! DESIGN
//! ======
//! The engine owns a display-ordered mirror of the host's board and applies
//! drag gestures to it. Card relocation across columns happens continuously
//! during drag-over so the UI tracks the pointer; column reordering and
//! same-column card reordering resolve once at drag-end. Accepted mutations
//! are reported as [`Action`]s for the host to persist — the engine itself
//! performs no I/O.
//!
//! ERROR HANDLING
//! ==============
//! Event handlers surface no errors. Every failure mode is an absence
//! (missing payload, unresolved lookup, stale id) and degrades to a silent
//! no-op; the worst case is a visually stale order, never a crash.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::HashSet;

use tracing::{debug, trace};
use uuid::Uuid;

use crate::board::{Board, CardId, Column, ColumnId, array_move};
use crate::drag::{ActiveDrag, DragData, DragKind, DragState, OverTarget};
use crate::geometry::Rect;

/// Actions returned from drag handlers for the host to persist.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The column sequence changed; persist the new board-level order.
    BoardOrderChanged { column_order_ids: Vec<ColumnId> },
    /// A column's card membership or order changed; persist its new order.
    CardOrderChanged { column_id: ColumnId, card_order_ids: Vec<CardId> },
}

/// Headless drag-and-drop engine for one board.
///
/// The mirror is exclusively owned: the upstream [`Board`] is read-only
/// input, replaced wholesale via [`BoardEngine::load_board`] whenever the
/// host hands over a new one.
pub struct BoardEngine {
    /// Columns in display order, each with its cards in display order.
    columns: Vec<Column>,
    /// The gesture currently being tracked, if any.
    drag: DragState,
    /// Columns whose card order changed during the in-flight gesture.
    dirty: HashSet<ColumnId>,
}

impl Default for BoardEngine {
    fn default() -> Self {
        Self { columns: Vec::new(), drag: DragState::Idle, dirty: HashSet::new() }
    }
}

impl BoardEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Rebuild the mirror from a new board. Full replace, never a merge.
    pub fn load_board(&mut self, board: &Board) {
        self.columns = board.materialize();
        self.dirty.clear();
        debug!(board = %board.id, columns = self.columns.len(), "loaded board into the mirror");
    }

    // --- Queries ---

    /// The mirror: columns in display order.
    #[must_use]
    pub fn ordered_columns(&self) -> &[Column] {
        &self.columns
    }

    /// The board-level column order implied by the mirror.
    #[must_use]
    pub fn column_order_ids(&self) -> Vec<ColumnId> {
        self.columns.iter().map(|col| col.id).collect()
    }

    /// The column whose card set contains `card_id`, if any.
    #[must_use]
    pub fn find_column_owning(&self, card_id: CardId) -> Option<&Column> {
        self.columns.iter().find(|col| col.contains_card(card_id))
    }

    /// Look up a column by its own id.
    #[must_use]
    pub fn column(&self, column_id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|col| col.id == column_id)
    }

    /// The gesture currently being tracked, if any.
    #[must_use]
    pub fn active_drag(&self) -> Option<&ActiveDrag> {
        self.drag.active()
    }

    /// Snapshot to render in the floating drag overlay, or `None` when no
    /// drag is active.
    #[must_use]
    pub fn drag_preview(&self) -> Option<&DragData> {
        self.drag.active().map(|drag| &drag.data)
    }

    // --- Drag events ---

    /// Begin a gesture: record the item's id, kind, and full snapshot.
    ///
    /// The snapshot is taken before any mutation so an invalid drop reverts
    /// by discarding the transient state.
    pub fn on_drag_start(&mut self, item: DragData) {
        let drag = ActiveDrag::new(item);
        debug!(item = %drag.id, kind = ?drag.kind, "drag started");
        self.dirty.clear();
        self.drag = DragState::Active(drag);
    }

    /// Continuous hover update for an in-flight card drag.
    ///
    /// Only cross-column relocation happens here; same-column reordering and
    /// column drags resolve at drag-end. `over` is the hovered item (a card,
    /// or a column when hovering its empty body) and `translated` is the
    /// dragged item's current on-screen rect, when the provider knows it.
    pub fn on_drag_over(&mut self, active_id: CardId, over: Option<&OverTarget>, translated: Option<Rect>) {
        if self.drag.active().is_some_and(|drag| drag.kind == DragKind::Column) {
            return;
        }
        let Some(over) = over else { return };

        let Some(active_col_id) = self.owning_column_id(active_id) else {
            trace!(card = %active_id, "drag-over ignored: no column owns the dragged card");
            return;
        };
        let Some(over_col_id) = self.resolve_target_column_id(over.id) else {
            trace!(target = %over.id, "drag-over ignored: hover target unresolved");
            return;
        };
        if active_col_id == over_col_id {
            return;
        }
        let Some(active_index) = self.column_index(active_col_id) else { return };
        let Some(over_index) = self.column_index(over_col_id) else { return };

        // Insertion point, computed against the hover column before any
        // mutation. Dropping past the hovered card's bottom edge shifts
        // insertion one slot further; an unmatched target (empty column
        // body) appends at the end.
        let over_col = &self.columns[over_index];
        let is_below = translated.is_some_and(|rect| rect.top_below(&over.rect));
        let new_card_index = match over_col.card_index(over.id) {
            Some(index) => index + usize::from(is_below),
            None => over_col.cards.len(),
        };

        let Some(removed) = self.columns[active_index].remove_card(active_id) else {
            return;
        };
        self.columns[active_index].sync_card_order();

        // Reinsert the drag-start snapshot, falling back to the card just
        // removed if the gesture was never registered with us.
        let mut payload = match self.drag.active() {
            Some(drag) if drag.id == active_id => match &drag.data {
                DragData::Card(card) => card.clone(),
                DragData::Column(_) => removed,
            },
            _ => removed,
        };
        payload.column_id = over_col_id;

        let dest = &mut self.columns[over_index];
        if dest.remove_card(active_id).is_some() {
            trace!(card = %active_id, "dropped a duplicate copy already in the hover column");
        }
        let index = new_card_index.min(dest.cards.len());
        dest.cards.insert(index, payload);
        dest.sync_card_order();

        self.dirty.insert(active_col_id);
        self.dirty.insert(over_col_id);
        debug!(card = %active_id, from = %active_col_id, to = %over_col_id, index, "moved card across columns");
    }

    /// Complete a gesture and report what changed.
    ///
    /// Transient drag state is cleared on every path, including the ignored
    /// ones, so stale state never survives a finished gesture.
    pub fn on_drag_end(&mut self, active_id: Uuid, over_id: Option<Uuid>) -> Vec<Action> {
        let actions = self.finish_drag(active_id, over_id);
        self.drag = DragState::Idle;
        self.dirty.clear();
        actions
    }

    // --- Internals ---

    fn finish_drag(&mut self, active_id: Uuid, over_id: Option<Uuid>) -> Vec<Action> {
        let (kind, source_column) = match self.drag.active() {
            Some(drag) => {
                let source = match &drag.data {
                    DragData::Card(card) => Some(card.column_id),
                    DragData::Column(_) => None,
                };
                (drag.kind, source)
            }
            None => return Vec::new(),
        };
        match kind {
            DragKind::Column => self.finish_column_drag(active_id, over_id),
            DragKind::Card => self.finish_card_drag(active_id, over_id, source_column),
        }
    }

    /// Relocate a column to the hovered column's slot.
    fn finish_column_drag(&mut self, active_id: Uuid, over_id: Option<Uuid>) -> Vec<Action> {
        let Some(over_id) = over_id else { return Vec::new() };
        if active_id == over_id {
            return Vec::new();
        }
        let Some(old_index) = self.column_index(active_id) else { return Vec::new() };
        let Some(new_index) = self.column_index(over_id) else { return Vec::new() };
        array_move(&mut self.columns, old_index, new_index);
        debug!(column = %active_id, old_index, new_index, "reordered columns");
        vec![Action::BoardOrderChanged { column_order_ids: self.column_order_ids() }]
    }

    /// Cross-column membership was already settled during drag-over; a
    /// gesture that stayed inside its source column resolves here instead.
    fn finish_card_drag(&mut self, active_id: Uuid, over_id: Option<Uuid>, source_column: Option<ColumnId>) -> Vec<Action> {
        if let Some(over_id) = over_id {
            if over_id != active_id {
                self.reorder_within_column(active_id, over_id, source_column);
            }
        }
        self.drain_dirty()
    }

    fn reorder_within_column(&mut self, active_id: Uuid, over_id: Uuid, source_column: Option<ColumnId>) {
        let Some(active_col_id) = self.owning_column_id(active_id) else { return };
        let Some(over_col_id) = self.resolve_target_column_id(over_id) else { return };
        // Only a gesture that both started and ended in this column is a
        // same-column reorder; anything else already moved during drag-over.
        if active_col_id != over_col_id || source_column != Some(active_col_id) {
            return;
        }
        let Some(col_index) = self.column_index(active_col_id) else { return };
        let column = &mut self.columns[col_index];
        let Some(old_index) = column.card_index(active_id) else { return };
        let Some(new_index) = column.card_index(over_id) else { return };
        if old_index == new_index {
            return;
        }
        array_move(&mut column.cards, old_index, new_index);
        column.sync_card_order();
        self.dirty.insert(active_col_id);
        debug!(card = %active_id, column = %active_col_id, old_index, new_index, "reordered card within its column");
    }

    /// Emit one action per column touched by the gesture, in display order.
    fn drain_dirty(&mut self) -> Vec<Action> {
        if self.dirty.is_empty() {
            return Vec::new();
        }
        let actions = self
            .columns
            .iter()
            .filter(|col| self.dirty.contains(&col.id))
            .map(|col| Action::CardOrderChanged {
                column_id: col.id,
                card_order_ids: col.card_order_ids.clone(),
            })
            .collect();
        self.dirty.clear();
        actions
    }

    fn owning_column_id(&self, card_id: CardId) -> Option<ColumnId> {
        self.find_column_owning(card_id).map(|col| col.id)
    }

    /// Resolve a hover id to a column: the column owning it as a card, or
    /// the column itself when the id names one directly.
    fn resolve_target_column_id(&self, id: Uuid) -> Option<ColumnId> {
        self.owning_column_id(id).or_else(|| self.column(id).map(|col| col.id))
    }

    fn column_index(&self, column_id: ColumnId) -> Option<usize> {
        self.columns.iter().position(|col| col.id == column_id)
    }
}
