//! Board model: cards, columns, and ordered materialization.
//!
//! The board arrives from the host as external JSON (camelCase wire names)
//! and is treated as read-only input: the engine materializes it into an
//! owned, ordered mirror and never writes back. Display order is carried by
//! explicit order-id lists rather than collection order, so materialization
//! arranges each collection to follow its list, silently skipping any id
//! that no longer resolves.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a column.
pub type ColumnId = Uuid;

/// Unique identifier for a card.
pub type CardId = Uuid;

/// Error returned when hydrating a [`Board`] from external data.
#[derive(Debug, thiserror::Error)]
pub enum BoardDataError {
    /// The raw text could not be decoded as a board.
    #[error("failed to decode board data: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A card as supplied by the host and stored in the mirror.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique identifier for this card.
    pub id: CardId,
    /// The column that currently owns this card.
    pub column_id: ColumnId,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Open-ended per-card properties (description, cover, members, etc.).
    #[serde(default)]
    pub props: serde_json::Value,
}

/// A column: an ordered container of cards within a board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Unique identifier for this column.
    pub id: ColumnId,
    /// The board this column belongs to.
    #[serde(default)]
    pub board_id: Uuid,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Cards owned by this column, in display order once materialized.
    #[serde(default)]
    pub cards: Vec<Card>,
    /// Explicit display order of this column's card ids.
    #[serde(default)]
    pub card_order_ids: Vec<CardId>,
}

impl Column {
    /// Whether this column's card set contains the given card.
    #[must_use]
    pub fn contains_card(&self, card_id: CardId) -> bool {
        self.cards.iter().any(|card| card.id == card_id)
    }

    /// Index of a card within this column's display order, if present.
    #[must_use]
    pub fn card_index(&self, card_id: CardId) -> Option<usize> {
        self.cards.iter().position(|card| card.id == card_id)
    }

    /// Remove a card by id, returning it if it was present.
    pub fn remove_card(&mut self, card_id: CardId) -> Option<Card> {
        let index = self.card_index(card_id)?;
        Some(self.cards.remove(index))
    }

    /// Recompute `card_order_ids` from the current card vector.
    ///
    /// Must be called after any structural edit so the order list stays a
    /// permutation of the card set.
    pub fn sync_card_order(&mut self) {
        self.card_order_ids = self.cards.iter().map(|card| card.id).collect();
    }
}

/// Top-level container of columns. Read-only input to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Unique identifier for this board.
    pub id: Uuid,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// The board's columns, in no particular order.
    #[serde(default)]
    pub columns: Vec<Column>,
    /// Explicit display order of the board's column ids.
    #[serde(default)]
    pub column_order_ids: Vec<ColumnId>,
}

impl Board {
    /// Hydrate a board from the host's JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDataError::Decode`] for malformed input.
    pub fn from_json(data: &str) -> Result<Self, BoardDataError> {
        Ok(serde_json::from_str(data)?)
    }

    /// Materialize the display-ordered mirror: columns arranged per
    /// `column_order_ids`, each column's cards arranged per its own
    /// `card_order_ids`. Stale order ids are skipped.
    #[must_use]
    pub fn materialize(&self) -> Vec<Column> {
        let columns = order_by_ids(self.columns.clone(), &self.column_order_ids, |col| col.id);
        columns
            .into_iter()
            .map(|mut col| {
                let order = std::mem::take(&mut col.card_order_ids);
                col.cards = order_by_ids(std::mem::take(&mut col.cards), &order, |card| card.id);
                col.card_order_ids = order;
                col
            })
            .collect()
    }
}

/// Arrange `items` to follow `order`, matching on the id extracted by
/// `id_of`. Order ids that resolve to no item are skipped; a duplicated
/// order id yields its item once. Items never referenced by `order` are
/// dropped, which only matters when the order list has drifted from the
/// collection it indexes.
pub fn order_by_ids<T, F>(items: Vec<T>, order: &[Uuid], id_of: F) -> Vec<T>
where
    F: Fn(&T) -> Uuid,
{
    let mut by_id: HashMap<Uuid, T> = items.into_iter().map(|item| (id_of(&item), item)).collect();
    order.iter().filter_map(|id| by_id.remove(id)).collect()
}

/// Move the element at `from` to position `to`, preserving the relative
/// order of everything else. Out-of-range `from` is a no-op; `to` is
/// clamped to the end.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() {
        return;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
}
