//! CSV export and import of the whole catalog.
//!
//! Import spools the upload to a temporary file under the configured import
//! directory, parses and validates every row, then applies all rows in one
//! transaction. The spool file is removed when its handle drops, whichever way
//! the request ends.

use std::io::Write;
use std::path::PathBuf;

use axum::extract::{Multipart, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use gearlist_core::csv_transfer::{
    read_csv, write_csv, ItemRecord, CSV_CONTENT_TYPE, EXPORT_FILENAME,
};
use gearlist_db::repositories::ItemRepo;

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, FormField, FormSpec, MULTIPART};
use crate::state::AppState;

const IMPORT_FIELDS: &[FormField] = &[FormField::required("file", "file")];

/// GET /export_csv
///
/// Download every item, ordered by id, as `camping_items.csv`.
pub async fn export_csv(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = ItemRepo::list_all(&state.pool).await?;
    let records: Vec<ItemRecord> = items.iter().map(ItemRecord::from).collect();
    let csv = write_csv(&records)?;

    tracing::info!(rows = records.len(), "Catalog exported");

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        csv,
    ))
}

/// GET /import_csv
pub async fn import_form() -> Json<DataResponse<FormSpec>> {
    Json(DataResponse {
        data: FormSpec::post("/import_csv", MULTIPART, IMPORT_FIELDS),
    })
}

/// POST /import_csv
///
/// Upsert every row by `item_number`. Any malformed row rejects the whole
/// file with a `Row N:` message and nothing is written.
pub async fn import_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut upload: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            upload = Some(data.to_vec());
        }
    }

    let data = upload
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    let records = spool_and_parse(state.config.import_dir.clone(), data).await?;
    let summary = ItemRepo::import_records(&state.pool, &records).await?;

    tracing::info!(
        rows = summary.rows,
        created = summary.created,
        updated = summary.updated,
        "Catalog imported",
    );

    Ok(Json(DataResponse { data: summary }))
}

/// Write the upload to a spool file and parse it back.
///
/// Runs on the blocking pool since both the file I/O and the parser are
/// synchronous.
async fn spool_and_parse(dir: PathBuf, data: Vec<u8>) -> AppResult<Vec<ItemRecord>> {
    tokio::task::spawn_blocking(move || -> AppResult<Vec<ItemRecord>> {
        std::fs::create_dir_all(&dir)
            .map_err(|e| AppError::InternalError(format!("Failed to create import dir: {e}")))?;

        let mut spool = tempfile::Builder::new()
            .prefix("import-")
            .suffix(".csv")
            .tempfile_in(&dir)
            .map_err(|e| AppError::InternalError(format!("Failed to spool upload: {e}")))?;
        spool
            .write_all(&data)
            .and_then(|()| spool.flush())
            .map_err(|e| AppError::InternalError(format!("Failed to spool upload: {e}")))?;
        tracing::debug!(path = %spool.path().display(), bytes = data.len(), "CSV upload spooled");

        let file = spool
            .reopen()
            .map_err(|e| AppError::InternalError(format!("Failed to read spooled upload: {e}")))?;
        Ok(read_csv(file)?)
    })
    .await
    .map_err(|e| AppError::InternalError(format!("CSV import task failed: {e}")))?
}
