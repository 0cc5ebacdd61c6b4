//! Printable checklist of selected items.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Form, Json};
use gearlist_core::error::CoreError;
use gearlist_core::types::Timestamp;
use gearlist_db::models::item::Item;
use gearlist_db::repositories::ItemRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::query::{collect_ids, FormPairs};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Checklist {
    pub items: Vec<Item>,
    pub generated_at: Timestamp,
}

/// POST /checklist
///
/// Takes repeated `selected_items` ids and returns those items ordered by id.
/// Unknown ids are skipped.
pub async fn checklist(
    State(state): State<AppState>,
    Form(pairs): Form<FormPairs>,
) -> AppResult<impl IntoResponse> {
    let ids = collect_ids(&pairs, "selected_items")?;
    if ids.is_empty() {
        return Err(CoreError::Validation("No items selected".into()).into());
    }

    let items = ItemRepo::find_by_ids(&state.pool, &ids).await?;

    Ok(Json(DataResponse {
        data: Checklist {
            items,
            generated_at: chrono::Utc::now(),
        },
    }))
}
