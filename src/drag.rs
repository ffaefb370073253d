//! Drag payload types and the transient active-drag state.
//!
//! One gesture is tracked at a time. The payload snapshot is captured at
//! drag-start, before any mutation, so an invalid or cancelled drop reverts
//! by simply discarding the transient state.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use uuid::Uuid;

use crate::board::{Card, Column};
use crate::geometry::Rect;

/// What kind of item a gesture is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// A whole column, reordered against its siblings at drag-end.
    Column,
    /// A card, relocated across columns while the gesture is in flight.
    Card,
}

/// Full data snapshot of the item being dragged.
///
/// A payload carrying a parent-column reference is a card drag; anything
/// else is a column drag.
#[derive(Debug, Clone)]
pub enum DragData {
    Column(Column),
    Card(Card),
}

impl DragData {
    /// The dragged item's id.
    #[must_use]
    pub fn id(&self) -> Uuid {
        match self {
            Self::Column(column) => column.id,
            Self::Card(card) => card.id,
        }
    }

    /// Classify the payload.
    #[must_use]
    pub fn kind(&self) -> DragKind {
        match self {
            Self::Column(_) => DragKind::Column,
            Self::Card(_) => DragKind::Card,
        }
    }
}

/// The item currently being dragged: id, kind, and its snapshot.
///
/// Created at drag-start, never mutated, cleared unconditionally at
/// drag-end.
#[derive(Debug, Clone)]
pub struct ActiveDrag {
    pub id: Uuid,
    pub kind: DragKind,
    pub data: DragData,
}

impl ActiveDrag {
    #[must_use]
    pub fn new(data: DragData) -> Self {
        Self { id: data.id(), kind: data.kind(), data }
    }
}

/// Gesture tracking state held by the engine.
#[derive(Debug, Clone, Default)]
pub enum DragState {
    /// No gesture in progress; waiting for the next drag-start.
    #[default]
    Idle,
    /// A gesture is in flight.
    Active(ActiveDrag),
}

impl DragState {
    /// The active drag, if a gesture is in flight.
    #[must_use]
    pub fn active(&self) -> Option<&ActiveDrag> {
        match self {
            Self::Idle => None,
            Self::Active(drag) => Some(drag),
        }
    }
}

/// The item a drag is currently hovering: its id and its on-screen rect.
///
/// For card drags the id is usually a card id; hovering the empty body of a
/// column yields the column's own id instead.
#[derive(Debug, Clone, Copy)]
pub struct OverTarget {
    pub id: Uuid,
    pub rect: Rect,
}
