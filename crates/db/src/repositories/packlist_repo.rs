//! Repository for the `packlists` and `packlist_items` tables.
//!
//! Associations are owned by their packlist. Deleting a packlist (or an item,
//! see `ItemRepo::delete`) removes its associations in the same transaction;
//! the schema has no cascading foreign keys to do it implicitly.

use std::collections::BTreeSet;

use gearlist_core::error::CoreError;
use gearlist_core::types::DbId;
use gearlist_core::validation::validate_name;
use sqlx::SqlitePool;

use crate::error::StoreError;
use crate::models::packlist::{
    AddItemsOutcome, CreatePackList, PackList, PackListDetail, PackListEntry, PackListItem,
    PackListSummary,
};

/// Column list for `packlists` queries.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Column list for `packlist_items` queries.
const ENTRY_COLUMNS: &str = "id, packlist_id, item_id, item_quantity, created_at, updated_at";

/// Provides CRUD and membership operations for packlists.
pub struct PackListRepo;

impl PackListRepo {
    // -----------------------------------------------------------------------
    // Packlist CRUD
    // -----------------------------------------------------------------------

    /// Create an empty packlist. Names need not be unique.
    pub async fn create(pool: &SqlitePool, input: &CreatePackList) -> Result<PackList, StoreError> {
        let name = validate_name("Packlist", &input.name)?;

        let query = format!("INSERT INTO packlists (name) VALUES (?1) RETURNING {COLUMNS}");
        let packlist = sqlx::query_as::<_, PackList>(&query)
            .bind(name)
            .fetch_one(pool)
            .await?;
        Ok(packlist)
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<PackList>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM packlists WHERE id = ?1");
        sqlx::query_as::<_, PackList>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All packlists ordered by name, with their association counts.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<PackListSummary>, sqlx::Error> {
        sqlx::query_as::<_, PackListSummary>(
            "SELECT p.id, p.name, COUNT(pi.id) AS item_count \
             FROM packlists p \
             LEFT JOIN packlist_items pi ON pi.packlist_id = p.id \
             GROUP BY p.id, p.name \
             ORDER BY p.name, p.id",
        )
        .fetch_all(pool)
        .await
    }

    /// Entries of a packlist joined with their items, ordered by item name.
    pub async fn list_entries(
        pool: &SqlitePool,
        packlist_id: DbId,
    ) -> Result<Vec<PackListEntry>, sqlx::Error> {
        sqlx::query_as::<_, PackListEntry>(
            "SELECT pi.id AS entry_id, pi.item_quantity, \
                    i.id, i.item_number, i.name, i.description, i.weight, i.season, \
                    i.keywords, i.category, i.image_path, i.url, i.quantity, \
                    i.created_at, i.updated_at \
             FROM packlist_items pi \
             JOIN items i ON i.id = pi.item_id \
             WHERE pi.packlist_id = ?1 \
             ORDER BY i.name, pi.id",
        )
        .bind(packlist_id)
        .fetch_all(pool)
        .await
    }

    /// Find a packlist together with its entries.
    pub async fn find_detail(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<PackListDetail>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(packlist) => {
                let entries = Self::list_entries(pool, packlist.id).await?;
                Ok(Some(PackListDetail { packlist, entries }))
            }
            None => Ok(None),
        }
    }

    /// Delete a packlist and all of its associations in one transaction.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<(), StoreError> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM packlist_items WHERE packlist_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM packlists WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(CoreError::NotFound {
                entity: "PackList",
                id,
            }
            .into());
        }

        tx.commit().await?;
        Ok(())
    }

    /// Remove every association from a packlist, keeping the packlist.
    ///
    /// Returns the number of associations removed.
    pub async fn clear(pool: &SqlitePool, id: DbId) -> Result<u64, StoreError> {
        if Self::find_by_id(pool, id).await?.is_none() {
            return Err(CoreError::NotFound {
                entity: "PackList",
                id,
            }
            .into());
        }

        let removed = sqlx::query("DELETE FROM packlist_items WHERE packlist_id = ?1")
            .bind(id)
            .execute(pool)
            .await?
            .rows_affected();
        Ok(removed)
    }

    // -----------------------------------------------------------------------
    // Membership
    // -----------------------------------------------------------------------

    /// Attach items to a packlist with `item_quantity = 1`.
    ///
    /// Items already on the list are skipped, so repeating a call is a no-op.
    /// The packlist and every item must exist; otherwise nothing is attached.
    pub async fn add_items(
        pool: &SqlitePool,
        packlist_id: DbId,
        item_ids: &[DbId],
    ) -> Result<AddItemsOutcome, StoreError> {
        let unique: BTreeSet<DbId> = item_ids.iter().copied().collect();
        if unique.is_empty() {
            return Err(CoreError::Validation("No items selected".into()).into());
        }

        let mut tx = pool.begin().await?;

        let packlist_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM packlists WHERE id = ?1)")
                .bind(packlist_id)
                .fetch_one(&mut *tx)
                .await?;
        if !packlist_exists {
            return Err(CoreError::Validation(format!(
                "Packlist {packlist_id} does not exist"
            ))
            .into());
        }

        let mut missing = Vec::new();
        for &item_id in &unique {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM items WHERE id = ?1)")
                    .bind(item_id)
                    .fetch_one(&mut *tx)
                    .await?;
            if !exists {
                missing.push(item_id.to_string());
            }
        }
        if !missing.is_empty() {
            return Err(CoreError::Validation(format!(
                "Unknown item ids: {}",
                missing.join(", ")
            ))
            .into());
        }

        let mut added = 0;
        for &item_id in &unique {
            let result = sqlx::query(
                "INSERT INTO packlist_items (packlist_id, item_id) VALUES (?1, ?2) \
                 ON CONFLICT (packlist_id, item_id) DO NOTHING",
            )
            .bind(packlist_id)
            .bind(item_id)
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() > 0 {
                added += 1;
            }
        }

        tx.commit().await?;
        Ok(AddItemsOutcome {
            added,
            skipped: unique.len() - added,
        })
    }

    /// Find a single association by its ID.
    pub async fn find_entry(
        pool: &SqlitePool,
        entry_id: DbId,
    ) -> Result<Option<PackListItem>, sqlx::Error> {
        let query = format!("SELECT {ENTRY_COLUMNS} FROM packlist_items WHERE id = ?1");
        sqlx::query_as::<_, PackListItem>(&query)
            .bind(entry_id)
            .fetch_optional(pool)
            .await
    }

    /// Remove one association from a packlist.
    ///
    /// Fails with `Conflict` if the association belongs to a different
    /// packlist, leaving it untouched.
    pub async fn remove_item(
        pool: &SqlitePool,
        packlist_id: DbId,
        entry_id: DbId,
    ) -> Result<(), StoreError> {
        let entry = Self::find_entry(pool, entry_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "PackListItem",
                id: entry_id,
            })?;

        if entry.packlist_id != packlist_id {
            return Err(CoreError::Conflict(format!(
                "Item entry {entry_id} does not belong to packlist {packlist_id}"
            ))
            .into());
        }

        let removed = sqlx::query("DELETE FROM packlist_items WHERE id = ?1 AND packlist_id = ?2")
            .bind(entry_id)
            .bind(packlist_id)
            .execute(pool)
            .await?
            .rows_affected();

        if removed == 0 {
            return Err(CoreError::NotFound {
                entity: "PackListItem",
                id: entry_id,
            }
            .into());
        }
        Ok(())
    }
}
