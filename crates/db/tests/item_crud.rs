//! Integration tests for the catalog store.
//!
//! Exercises `ItemRepo` against a real SQLite database:
//! - Item number generation and uniqueness
//! - Full-replace updates and image preservation
//! - Delete cascading to packlist associations
//! - Filter / sort query resolution

use std::collections::HashSet;

use assert_matches::assert_matches;
use gearlist_core::catalog_query::CatalogQuery;
use gearlist_core::error::CoreError;
use gearlist_core::item_number::ITEM_NUMBER_LENGTH;
use gearlist_db::models::item::{CreateItem, UpdateItem};
use gearlist_db::models::packlist::CreatePackList;
use gearlist_db::repositories::{ItemRepo, PackListRepo};
use gearlist_db::StoreError;
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_item(name: &str) -> CreateItem {
    CreateItem {
        name: name.to_string(),
        description: None,
        weight: None,
        season: None,
        keywords: None,
        category: None,
        url: None,
        quantity: None,
        image_path: None,
    }
}

fn categorized(name: &str, category: Option<&str>, season: Option<&str>) -> CreateItem {
    CreateItem {
        category: category.map(str::to_string),
        season: season.map(str::to_string),
        ..new_item(name)
    }
}

fn names(items: &[gearlist_db::models::item::Item]) -> Vec<&str> {
    items.iter().map(|i| i.name.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_generates_number_and_defaults_quantity(pool: SqlitePool) {
    let item = ItemRepo::create(&pool, &new_item("Tent 2P")).await.unwrap();

    assert_eq!(item.name, "Tent 2P");
    assert_eq!(item.quantity, 1);
    assert_eq!(item.item_number.len(), ITEM_NUMBER_LENGTH);
    assert!(item.description.is_none());
    assert!(item.image_path.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_blank_optional_fields_are_stored_as_null(pool: SqlitePool) {
    let input = CreateItem {
        description: Some("   ".into()),
        weight: Some(" 900g ".into()),
        quantity: Some(3),
        ..new_item("Sleeping bag")
    };
    let item = ItemRepo::create(&pool, &input).await.unwrap();

    assert!(item.description.is_none());
    assert_eq!(item.weight.as_deref(), Some("900g"));
    assert_eq!(item.quantity, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_rejects_empty_name(pool: SqlitePool) {
    let result = ItemRepo::create(&pool, &new_item("  ")).await;
    assert_matches!(result, Err(StoreError::Core(CoreError::Validation(_))));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_rejects_negative_quantity(pool: SqlitePool) {
    let input = CreateItem {
        quantity: Some(-1),
        ..new_item("Stove")
    };
    let result = ItemRepo::create(&pool, &input).await;
    assert_matches!(result, Err(StoreError::Core(CoreError::Validation(_))));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ten_thousand_items_have_unique_numbers(pool: SqlitePool) {
    let mut numbers = HashSet::new();
    for i in 0..10_000 {
        let item = ItemRepo::create(&pool, &new_item(&format!("Item {i}")))
            .await
            .unwrap();
        assert!(numbers.insert(item.item_number), "duplicate item number");
    }

    let distinct: i64 = sqlx::query_scalar("SELECT COUNT(DISTINCT item_number) FROM items")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(distinct, 10_000);
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_number(pool: SqlitePool) {
    let item = ItemRepo::create(&pool, &new_item("Headlamp")).await.unwrap();

    let found = ItemRepo::find_by_number(&pool, &item.item_number)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, item.id);

    assert!(ItemRepo::find_by_number(&pool, "no-such-number")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_ids_ignores_unknown_and_orders_by_id(pool: SqlitePool) {
    let a = ItemRepo::create(&pool, &new_item("A")).await.unwrap();
    let b = ItemRepo::create(&pool, &new_item("B")).await.unwrap();

    let items = ItemRepo::find_by_ids(&pool, &[b.id, 9_999, a.id]).await.unwrap();
    assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![a.id, b.id]);

    assert!(ItemRepo::find_by_ids(&pool, &[]).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_overwrites_all_fields_but_keeps_image(pool: SqlitePool) {
    let created = ItemRepo::create(
        &pool,
        &CreateItem {
            description: Some("old".into()),
            keywords: Some("shelter".into()),
            image_path: Some("abc_tent.jpg".into()),
            ..new_item("Tent")
        },
    )
    .await
    .unwrap();

    let update = UpdateItem {
        name: "Tent 3P".into(),
        description: None,
        weight: Some("2kg".into()),
        season: Some("4-season".into()),
        keywords: None,
        category: Some("Shelter".into()),
        url: None,
        quantity: 2,
        image_path: None,
    };
    let updated = ItemRepo::update(&pool, created.id, &update).await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.item_number, created.item_number);
    assert_eq!(updated.name, "Tent 3P");
    assert!(updated.description.is_none());
    assert!(updated.keywords.is_none());
    assert_eq!(updated.weight.as_deref(), Some("2kg"));
    assert_eq!(updated.quantity, 2);
    assert_eq!(updated.image_path.as_deref(), Some("abc_tent.jpg"));

    let replaced = ItemRepo::update(
        &pool,
        created.id,
        &UpdateItem {
            image_path: Some("def_tent.jpg".into()),
            ..update
        },
    )
    .await
    .unwrap();
    assert_eq!(replaced.image_path.as_deref(), Some("def_tent.jpg"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_item_is_not_found(pool: SqlitePool) {
    let update = UpdateItem {
        name: "Ghost".into(),
        description: None,
        weight: None,
        season: None,
        keywords: None,
        category: None,
        url: None,
        quantity: 1,
        image_path: None,
    };
    let result = ItemRepo::update(&pool, 404, &update).await;
    assert_matches!(
        result,
        Err(StoreError::Core(CoreError::NotFound { entity: "Item", id: 404 }))
    );
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_cascades_to_packlist_associations(pool: SqlitePool) {
    let item = ItemRepo::create(&pool, &new_item("Water filter")).await.unwrap();
    let keep = ItemRepo::create(&pool, &new_item("Map")).await.unwrap();

    for name in ["Weekend", "Thru-hike"] {
        let list = PackListRepo::create(&pool, &CreatePackList { name: name.into() })
            .await
            .unwrap();
        PackListRepo::add_items(&pool, list.id, &[item.id, keep.id])
            .await
            .unwrap();
    }

    let detached = ItemRepo::delete(&pool, item.id).await.unwrap();
    assert_eq!(detached, 2);

    let dangling: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM packlist_items WHERE item_id = ?1")
            .bind(item.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(dangling, 0);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM packlist_items")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 2, "other items stay on their lists");

    assert!(ItemRepo::find_by_id(&pool, item.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_missing_item_is_not_found(pool: SqlitePool) {
    assert_matches!(
        ItemRepo::delete(&pool, 77).await,
        Err(StoreError::Core(CoreError::NotFound { entity: "Item", id: 77 }))
    );
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filter_matches_name_category_or_season(pool: SqlitePool) {
    ItemRepo::create(&pool, &categorized("Tent 2P", Some("Shelter"), None))
        .await
        .unwrap();
    ItemRepo::create(&pool, &categorized("Footprint", Some("Tenting"), None))
        .await
        .unwrap();
    ItemRepo::create(&pool, &categorized("Fly", None, Some("Content season")))
        .await
        .unwrap();
    ItemRepo::create(&pool, &categorized("Stove", Some("Kitchen"), Some("Summer")))
        .await
        .unwrap();

    let q = CatalogQuery::from_params(Some("tent"), None, None);
    let items = ItemRepo::list(&pool, &q).await.unwrap();
    assert_eq!(names(&items), vec!["Tent 2P", "Footprint", "Fly"]);

    let q = CatalogQuery::from_params(Some("TENT"), None, None);
    assert_eq!(ItemRepo::list(&pool, &q).await.unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filter_treats_wildcards_literally(pool: SqlitePool) {
    ItemRepo::create(&pool, &new_item("100% wool socks")).await.unwrap();
    ItemRepo::create(&pool, &new_item("1000 fill down")).await.unwrap();

    let q = CatalogQuery::from_params(Some("100%"), None, None);
    let items = ItemRepo::list(&pool, &q).await.unwrap();
    assert_eq!(names(&items), vec!["100% wool socks"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filter_matches_exact_case_non_ascii_text(pool: SqlitePool) {
    ItemRepo::create(&pool, &new_item("Überzelt")).await.unwrap();
    ItemRepo::create(&pool, &categorized("Réchaud", None, Some("ÉTÉ")))
        .await
        .unwrap();

    let q = CatalogQuery::from_params(Some("Über"), None, None);
    assert_eq!(names(&ItemRepo::list(&pool, &q).await.unwrap()), vec!["Überzelt"]);

    let q = CatalogQuery::from_params(Some("ÉTÉ"), None, None);
    assert_eq!(names(&ItemRepo::list(&pool, &q).await.unwrap()), vec!["Réchaud"]);

    let q = CatalogQuery::from_params(Some("ZELT"), None, None);
    assert_eq!(names(&ItemRepo::list(&pool, &q).await.unwrap()), vec!["Überzelt"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sort_by_name_desc_with_id_tiebreak(pool: SqlitePool) {
    let first_b = ItemRepo::create(&pool, &new_item("B")).await.unwrap();
    ItemRepo::create(&pool, &new_item("A")).await.unwrap();
    let second_b = ItemRepo::create(&pool, &new_item("B")).await.unwrap();
    ItemRepo::create(&pool, &new_item("C")).await.unwrap();

    let q = CatalogQuery::from_params(None, Some("name"), Some("desc"));
    let items = ItemRepo::list(&pool, &q).await.unwrap();
    assert_eq!(names(&items), vec!["C", "B", "B", "A"]);
    assert_eq!(items[1].id, first_b.id);
    assert_eq!(items[2].id, second_b.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_sort_column_falls_back_to_id_ascending(pool: SqlitePool) {
    let z = ItemRepo::create(&pool, &new_item("Zip ties")).await.unwrap();
    let a = ItemRepo::create(&pool, &new_item("Axe")).await.unwrap();

    let q = CatalogQuery::from_params(None, Some("nonexistent_column"), None);
    let items = ItemRepo::list(&pool, &q).await.unwrap();
    assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![z.id, a.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sort_by_quantity(pool: SqlitePool) {
    for (name, qty) in [("Stakes", 8), ("Tent", 1), ("Guylines", 4)] {
        ItemRepo::create(
            &pool,
            &CreateItem {
                quantity: Some(qty),
                ..new_item(name)
            },
        )
        .await
        .unwrap();
    }

    let q = CatalogQuery::from_params(None, Some("quantity"), Some("asc"));
    let items = ItemRepo::list(&pool, &q).await.unwrap();
    assert_eq!(names(&items), vec!["Tent", "Guylines", "Stakes"]);
}
