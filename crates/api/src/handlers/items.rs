//! Handlers for the item catalog: listing, add, edit and delete.
//!
//! Add and edit accept `multipart/form-data` so an image can ride along with
//! the text fields. The image is written to the [`ImageStore`] only after the
//! form has validated, and its storage key becomes the item's `image_path`.
//!
//! [`ImageStore`]: crate::uploads::ImageStore

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use gearlist_core::catalog_query::{SortColumn, SortDirection};
use gearlist_core::error::CoreError;
use gearlist_core::types::DbId;
use gearlist_core::validation::{parse_quantity, validate_name, DEFAULT_QUANTITY};
use gearlist_db::models::item::{CreateItem, Item, UpdateItem};
use gearlist_db::models::packlist::PackListSummary;
use gearlist_db::repositories::{ItemRepo, PackListRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::query::ItemListParams;
use crate::response::{DataResponse, FormField, FormSpec, MULTIPART};
use crate::state::AppState;

/// Fields accepted by `POST /add` and `POST /edit/{id}`.
const ITEM_FIELDS: &[FormField] = &[
    FormField::required("name", "text"),
    FormField::optional("description", "textarea"),
    FormField::optional("weight", "text"),
    FormField::optional("season", "text"),
    FormField::optional("keywords", "text"),
    FormField::optional("category", "text"),
    FormField::optional("url", "url"),
    FormField::optional("quantity", "number"),
    FormField::optional("image", "file"),
];

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Payload of `GET /`.
#[derive(Debug, Serialize)]
pub struct ItemListing {
    pub items: Vec<Item>,
    pub packlists: Vec<PackListSummary>,
    pub filter_text: Option<String>,
    pub sort: SortColumn,
    pub order: SortDirection,
}

/// GET /
///
/// List items filtered by `filter_text` and sorted by `sort` / `order`,
/// together with all packlists so items can be attached from the same page.
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ItemListParams>,
) -> AppResult<impl IntoResponse> {
    let query = params.resolve();
    let items = ItemRepo::list(&state.pool, &query).await?;
    let packlists = PackListRepo::list(&state.pool).await?;

    Ok(Json(DataResponse {
        data: ItemListing {
            items,
            packlists,
            filter_text: query.filter_text,
            sort: query.sort,
            order: query.order,
        },
    }))
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// GET /add
pub async fn add_item_form() -> Json<DataResponse<FormSpec>> {
    Json(DataResponse {
        data: FormSpec::post("/add", MULTIPART, ITEM_FIELDS),
    })
}

/// POST /add
pub async fn create_item(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = ItemForm::from_multipart(multipart).await?;
    let quantity = form.quantity()?;
    validate_name("Item", &form.name)?;
    let image_path = store_image(&state, form.image.as_ref()).await?;

    let input = CreateItem {
        name: form.name,
        description: form.description,
        weight: form.weight,
        season: form.season,
        keywords: form.keywords,
        category: form.category,
        url: form.url,
        quantity: Some(quantity),
        image_path,
    };
    let item = ItemRepo::create(&state.pool, &input).await?;

    tracing::info!(item_id = item.id, item_number = %item.item_number, "Item created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

// ---------------------------------------------------------------------------
// Edit
// ---------------------------------------------------------------------------

/// GET /edit/{item_id}
///
/// Return the item so the edit form can be prefilled.
pub async fn edit_item_form(
    State(state): State<AppState>,
    Path(item_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = ItemRepo::find_by_id(&state.pool, item_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Item",
            id: item_id,
        }))?;

    Ok(Json(DataResponse { data: item }))
}

/// POST /edit/{item_id}
///
/// Overwrite every field of the item. Without a new image the stored one is
/// kept.
pub async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    if ItemRepo::find_by_id(&state.pool, item_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Item",
            id: item_id,
        }));
    }

    let form = ItemForm::from_multipart(multipart).await?;
    let quantity = form.quantity()?;
    validate_name("Item", &form.name)?;
    let image_path = store_image(&state, form.image.as_ref()).await?;

    let input = UpdateItem {
        name: form.name,
        description: form.description,
        weight: form.weight,
        season: form.season,
        keywords: form.keywords,
        category: form.category,
        url: form.url,
        quantity,
        image_path,
    };
    let item = ItemRepo::update(&state.pool, item_id, &input).await?;

    tracing::info!(item_id, "Item updated");

    Ok(Json(DataResponse { data: item }))
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// POST /delete/{item_id}
///
/// Delete the item and detach it from every packlist. The image file stays on
/// disk because identical uploads share one key.
pub async fn delete_item(
    State(state): State<AppState>,
    Path(item_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detached = ItemRepo::delete(&state.pool, item_id).await?;

    tracing::info!(item_id, detached, "Item deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Multipart form
// ---------------------------------------------------------------------------

/// An uploaded file field.
struct UploadedFile {
    filename: String,
    data: Vec<u8>,
}

/// Text fields and optional image of the add/edit form.
#[derive(Default)]
struct ItemForm {
    name: String,
    description: Option<String>,
    weight: Option<String>,
    season: Option<String>,
    keywords: Option<String>,
    category: Option<String>,
    url: Option<String>,
    quantity: Option<String>,
    image: Option<UploadedFile>,
}

impl ItemForm {
    async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = ItemForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();

            if name == "image" {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                // Browsers send an empty part when no file was chosen.
                if !filename.is_empty() && !data.is_empty() {
                    form.image = Some(UploadedFile {
                        filename,
                        data: data.to_vec(),
                    });
                }
                continue;
            }

            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            match name.as_str() {
                "name" => form.name = text,
                "description" => form.description = Some(text),
                "weight" => form.weight = Some(text),
                "season" => form.season = Some(text),
                "keywords" => form.keywords = Some(text),
                "category" => form.category = Some(text),
                "url" => form.url = Some(text),
                "quantity" => form.quantity = Some(text),
                _ => {} // ignore unknown fields
            }
        }

        Ok(form)
    }

    fn quantity(&self) -> Result<i64, CoreError> {
        parse_quantity(self.quantity.as_deref(), Some(DEFAULT_QUANTITY))
    }
}

/// Write an uploaded image, if any, and return its storage key.
async fn store_image(state: &AppState, image: Option<&UploadedFile>) -> AppResult<Option<String>> {
    let Some(image) = image else {
        return Ok(None);
    };

    let key = state
        .images
        .save(&image.filename, &image.data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store image: {e}")))?;
    Ok(Some(key))
}
