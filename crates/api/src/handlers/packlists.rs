//! Handlers for packlists and their item associations.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Form, Json};
use gearlist_core::error::CoreError;
use gearlist_core::types::DbId;
use gearlist_db::models::packlist::CreatePackList;
use gearlist_db::repositories::PackListRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::query::{collect_ids, form_value, FormPairs};
use crate::response::{DataResponse, FormField, FormSpec, URLENCODED};
use crate::state::AppState;

const PACKLIST_FIELDS: &[FormField] = &[FormField::required("name", "text")];

/// Body of `POST /packlist/create`. A missing name is reported by the store's
/// validation rather than as a form rejection.
#[derive(Debug, Deserialize)]
pub struct PackListForm {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ClearOutcome {
    pub removed: u64,
}

// ---------------------------------------------------------------------------
// Packlist CRUD
// ---------------------------------------------------------------------------

/// GET /packlists
pub async fn list_packlists(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let packlists = PackListRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: packlists }))
}

/// GET /packlist/create
pub async fn create_form() -> Json<DataResponse<FormSpec>> {
    Json(DataResponse {
        data: FormSpec::post("/packlist/create", URLENCODED, PACKLIST_FIELDS),
    })
}

/// POST /packlist/create
pub async fn create_packlist(
    State(state): State<AppState>,
    Form(form): Form<PackListForm>,
) -> AppResult<impl IntoResponse> {
    let input = CreatePackList { name: form.name };
    let packlist = PackListRepo::create(&state.pool, &input).await?;

    tracing::info!(packlist_id = packlist.id, name = %packlist.name, "Packlist created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: packlist })))
}

/// GET /packlist/{id}
///
/// The packlist with its entries, ordered by item name.
pub async fn get_packlist(
    State(state): State<AppState>,
    Path(packlist_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = PackListRepo::find_detail(&state.pool, packlist_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PackList",
            id: packlist_id,
        }))?;

    Ok(Json(DataResponse { data: detail }))
}

/// POST /packlist/{id}/delete
///
/// Delete the packlist and its associations; the items themselves remain.
pub async fn delete_packlist(
    State(state): State<AppState>,
    Path(packlist_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    PackListRepo::delete(&state.pool, packlist_id).await?;

    tracing::info!(packlist_id, "Packlist deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /packlist/{id}/clear
pub async fn clear_packlist(
    State(state): State<AppState>,
    Path(packlist_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let removed = PackListRepo::clear(&state.pool, packlist_id).await?;

    tracing::info!(packlist_id, removed, "Packlist cleared");

    Ok(Json(DataResponse {
        data: ClearOutcome { removed },
    }))
}

// ---------------------------------------------------------------------------
// Membership
// ---------------------------------------------------------------------------

/// POST /add_to_packlist
///
/// Form fields: `packlist_id` and repeated `selected_items`. Items already on
/// the list are skipped.
pub async fn add_to_packlist(
    State(state): State<AppState>,
    Form(pairs): Form<FormPairs>,
) -> AppResult<impl IntoResponse> {
    let packlist_id = form_value(&pairs, "packlist_id")
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CoreError::Validation("Packlist is required".into()))?;
    let packlist_id: DbId = packlist_id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid packlist_id value '{packlist_id}'")))?;
    let item_ids = collect_ids(&pairs, "selected_items")?;

    let outcome = PackListRepo::add_items(&state.pool, packlist_id, &item_ids).await?;

    tracing::info!(
        packlist_id,
        added = outcome.added,
        skipped = outcome.skipped,
        "Items added to packlist",
    );

    Ok(Json(DataResponse { data: outcome }))
}

/// POST /packlist/{id}/remove_item/{assoc_id}
///
/// Remove one association. An association that belongs to another packlist
/// is rejected with 409 and left in place.
pub async fn remove_item(
    State(state): State<AppState>,
    Path((packlist_id, entry_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    PackListRepo::remove_item(&state.pool, packlist_id, entry_id).await?;

    tracing::info!(packlist_id, entry_id, "Item removed from packlist");

    Ok(StatusCode::NO_CONTENT)
}
