//! Route definitions for CSV export and import.

use axum::routing::get;
use axum::Router;

use crate::handlers::csv_transfer;
use crate::state::AppState;

/// ```text
/// GET    /export_csv    -> export_csv
/// GET    /import_csv    -> import_form
/// POST   /import_csv    -> import_csv
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/export_csv", get(csv_transfer::export_csv))
        .route(
            "/import_csv",
            get(csv_transfer::import_form).post(csv_transfer::import_csv),
        )
}
