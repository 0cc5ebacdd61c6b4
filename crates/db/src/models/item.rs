//! Gear item models and DTOs.

use gearlist_core::csv_transfer::ItemRecord;
use gearlist_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub item_number: String,
    pub name: String,
    pub description: Option<String>,
    pub weight: Option<String>,
    pub season: Option<String>,
    pub keywords: Option<String>,
    pub category: Option<String>,
    /// Storage key of the item image, relative to the upload root.
    pub image_path: Option<String>,
    pub url: Option<String>,
    /// Count owned, independent of any packlist.
    pub quantity: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Item> for ItemRecord {
    fn from(item: &Item) -> Self {
        ItemRecord {
            item_number: item.item_number.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
            weight: item.weight.clone(),
            season: item.season.clone(),
            keywords: item.keywords.clone(),
            category: item.category.clone(),
            image_path: item.image_path.clone(),
            url: item.url.clone(),
            quantity: item.quantity,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for creating an item. The item number is generated by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItem {
    pub name: String,
    pub description: Option<String>,
    pub weight: Option<String>,
    pub season: Option<String>,
    pub keywords: Option<String>,
    pub category: Option<String>,
    pub url: Option<String>,
    /// Defaults to 1 when omitted.
    pub quantity: Option<i64>,
    pub image_path: Option<String>,
}

/// DTO for editing an item.
///
/// Every text field is written as given (`None` clears it). `image_path` is
/// the exception: `None` keeps the stored image, since the edit form only
/// carries a file when the image changes.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateItem {
    pub name: String,
    pub description: Option<String>,
    pub weight: Option<String>,
    pub season: Option<String>,
    pub keywords: Option<String>,
    pub category: Option<String>,
    pub url: Option<String>,
    pub quantity: i64,
    pub image_path: Option<String>,
}

/// Outcome of applying a CSV import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub rows: usize,
    pub created: usize,
    pub updated: usize,
}
