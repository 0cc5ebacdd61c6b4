//! Packlist and packlist-item models and DTOs.

use gearlist_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::item::Item;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `packlists` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PackList {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `packlist_items` association table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PackListItem {
    pub id: DbId,
    pub packlist_id: DbId,
    pub item_id: DbId,
    /// How many to pack; independent of `Item::quantity`.
    pub item_quantity: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Packlist with the number of associated items, for the overview page.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PackListSummary {
    pub id: DbId,
    pub name: String,
    pub item_count: i64,
}

/// One association joined with its item.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PackListEntry {
    /// Association id, used by the remove-item endpoint.
    pub entry_id: DbId,
    pub item_quantity: i64,
    #[sqlx(flatten)]
    pub item: Item,
}

/// A packlist with all of its entries.
#[derive(Debug, Clone, Serialize)]
pub struct PackListDetail {
    #[serde(flatten)]
    pub packlist: PackList,
    pub entries: Vec<PackListEntry>,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePackList {
    pub name: String,
}

/// Result of attaching items to a packlist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AddItemsOutcome {
    /// Associations created by this call.
    pub added: usize,
    /// Requested items that were already on the list.
    pub skipped: usize,
}
