//! Repository for the `items` table (the catalog).

use gearlist_core::catalog_query::{CatalogQuery, FILTER_COLUMNS};
use gearlist_core::csv_transfer::ItemRecord;
use gearlist_core::error::CoreError;
use gearlist_core::item_number::{generate_item_number, MAX_GENERATION_ATTEMPTS};
use gearlist_core::types::DbId;
use gearlist_core::validation::{
    normalize_optional, validate_name, validate_quantity, DEFAULT_QUANTITY,
};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use crate::error::StoreError;
use crate::models::item::{CreateItem, ImportSummary, Item, UpdateItem};

/// Column list for `items` queries.
const COLUMNS: &str = "\
    id, item_number, name, description, weight, season, keywords, category, \
    image_path, url, quantity, created_at, updated_at";

/// Whether an upsert created or overwrote a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Upserted {
    Created,
    Updated,
}

/// Provides CRUD operations for catalog items.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item under a freshly generated item number.
    ///
    /// A generated number that collides with an existing one is discarded and
    /// another is drawn, up to [`MAX_GENERATION_ATTEMPTS`] times.
    pub async fn create(pool: &SqlitePool, input: &CreateItem) -> Result<Item, StoreError> {
        let name = validate_name("Item", &input.name)?;
        let quantity = input.quantity.unwrap_or(DEFAULT_QUANTITY);
        validate_quantity(quantity)?;

        let query = format!(
            "INSERT INTO items \
                (item_number, name, description, weight, season, keywords, category, \
                 image_path, url, quantity) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10) \
             ON CONFLICT (item_number) DO NOTHING \
             RETURNING {COLUMNS}"
        );

        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let item_number = generate_item_number();
            let inserted = sqlx::query_as::<_, Item>(&query)
                .bind(&item_number)
                .bind(name)
                .bind(normalize_optional(input.description.clone()))
                .bind(normalize_optional(input.weight.clone()))
                .bind(normalize_optional(input.season.clone()))
                .bind(normalize_optional(input.keywords.clone()))
                .bind(normalize_optional(input.category.clone()))
                .bind(normalize_optional(input.image_path.clone()))
                .bind(normalize_optional(input.url.clone()))
                .bind(quantity)
                .fetch_optional(pool)
                .await?;

            match inserted {
                Some(item) => return Ok(item),
                None => tracing::warn!(attempt, %item_number, "Item number collision, retrying"),
            }
        }

        Err(CoreError::Conflict(format!(
            "Could not allocate a unique item number after {MAX_GENERATION_ATTEMPTS} attempts"
        ))
        .into())
    }

    /// Find an item by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items WHERE id = ?1");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an item by its natural key.
    pub async fn find_by_number(
        pool: &SqlitePool,
        item_number: &str,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items WHERE item_number = ?1");
        sqlx::query_as::<_, Item>(&query)
            .bind(item_number)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the given items, ordered by ID. Unknown IDs are ignored.
    pub async fn find_by_ids(pool: &SqlitePool, ids: &[DbId]) -> Result<Vec<Item>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM items WHERE id IN ("));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY id");

        builder.build_query_as::<Item>().fetch_all(pool).await
    }

    /// List items matching a resolved catalog query.
    ///
    /// The filter is a case-insensitive substring match OR-ed across
    /// name, category and season. The `ORDER BY` clause comes from the
    /// query's whitelist, never from raw input.
    pub async fn list(pool: &SqlitePool, q: &CatalogQuery) -> Result<Vec<Item>, sqlx::Error> {
        match q.like_pattern() {
            Some(pattern) => {
                let predicate = FILTER_COLUMNS
                    .iter()
                    .map(|col| format!("LOWER({col}) LIKE ?1 ESCAPE '\\'"))
                    .collect::<Vec<_>>()
                    .join(" OR ");
                let query = format!(
                    "SELECT {COLUMNS} FROM items WHERE {predicate} ORDER BY {}",
                    q.order_by_clause()
                );
                sqlx::query_as::<_, Item>(&query)
                    .bind(pattern)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM items ORDER BY {}", q.order_by_clause());
                sqlx::query_as::<_, Item>(&query).fetch_all(pool).await
            }
        }
    }

    /// All items in storage order (ascending ID), as used by CSV export.
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items ORDER BY id");
        sqlx::query_as::<_, Item>(&query).fetch_all(pool).await
    }

    /// Overwrite every mutable field of an item.
    ///
    /// `image_path` is only replaced when the input carries one.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateItem,
    ) -> Result<Item, StoreError> {
        let name = validate_name("Item", &input.name)?;
        validate_quantity(input.quantity)?;

        let query = format!(
            "UPDATE items SET \
                name = ?2, description = ?3, weight = ?4, season = ?5, keywords = ?6, \
                category = ?7, url = ?8, quantity = ?9, \
                image_path = COALESCE(?10, image_path), \
                updated_at = CURRENT_TIMESTAMP \
             WHERE id = ?1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(name)
            .bind(normalize_optional(input.description.clone()))
            .bind(normalize_optional(input.weight.clone()))
            .bind(normalize_optional(input.season.clone()))
            .bind(normalize_optional(input.keywords.clone()))
            .bind(normalize_optional(input.category.clone()))
            .bind(normalize_optional(input.url.clone()))
            .bind(input.quantity)
            .bind(normalize_optional(input.image_path.clone()))
            .fetch_optional(pool)
            .await?
            .ok_or(StoreError::Core(CoreError::NotFound { entity: "Item", id }))
    }

    /// Delete an item and every packlist association that references it.
    ///
    /// Both deletes run in one transaction. Returns the number of packlist
    /// associations removed along with the item.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<u64, StoreError> {
        let mut tx = pool.begin().await?;

        let detached = sqlx::query("DELETE FROM packlist_items WHERE item_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            // Dropping `tx` rolls back.
            return Err(CoreError::NotFound { entity: "Item", id }.into());
        }

        tx.commit().await?;
        Ok(detached)
    }

    // -----------------------------------------------------------------------
    // CSV import
    // -----------------------------------------------------------------------

    /// Upsert a batch of CSV records by item number, all-or-nothing.
    ///
    /// Existing items get every field except `id` and `item_number`
    /// overwritten (blank fields clear the stored value). Unknown numbers
    /// become new items that keep the supplied number verbatim. Records are
    /// applied in order, so a number repeated later in the batch overwrites
    /// the earlier row.
    pub async fn import_records(
        pool: &SqlitePool,
        records: &[ItemRecord],
    ) -> Result<ImportSummary, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut summary = ImportSummary {
            rows: records.len(),
            ..ImportSummary::default()
        };

        for record in records {
            match Self::upsert_record(&mut tx, record).await? {
                Upserted::Created => summary.created += 1,
                Upserted::Updated => summary.updated += 1,
            }
        }

        tx.commit().await?;
        Ok(summary)
    }

    async fn upsert_record(
        conn: &mut SqliteConnection,
        record: &ItemRecord,
    ) -> Result<Upserted, sqlx::Error> {
        let existing: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM items WHERE item_number = ?1")
                .bind(&record.item_number)
                .fetch_optional(&mut *conn)
                .await?;

        match existing {
            Some(id) => {
                sqlx::query(
                    "UPDATE items SET \
                        name = ?2, description = ?3, weight = ?4, season = ?5, keywords = ?6, \
                        category = ?7, image_path = ?8, url = ?9, quantity = ?10, \
                        updated_at = CURRENT_TIMESTAMP \
                     WHERE id = ?1",
                )
                .bind(id)
                .bind(&record.name)
                .bind(&record.description)
                .bind(&record.weight)
                .bind(&record.season)
                .bind(&record.keywords)
                .bind(&record.category)
                .bind(&record.image_path)
                .bind(&record.url)
                .bind(record.quantity)
                .execute(&mut *conn)
                .await?;
                Ok(Upserted::Updated)
            }
            None => {
                sqlx::query(
                    "INSERT INTO items \
                        (item_number, name, description, weight, season, keywords, category, \
                         image_path, url, quantity) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                )
                .bind(&record.item_number)
                .bind(&record.name)
                .bind(&record.description)
                .bind(&record.weight)
                .bind(&record.season)
                .bind(&record.keywords)
                .bind(&record.category)
                .bind(&record.image_path)
                .bind(&record.url)
                .bind(record.quantity)
                .execute(&mut *conn)
                .await?;
                Ok(Upserted::Created)
            }
        }
    }
}
