//! Route definitions for the item catalog.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{checklist, items};
use crate::state::AppState;

/// ```text
/// GET    /                    -> list_items
/// GET    /add                 -> add_item_form
/// POST   /add                 -> create_item
/// GET    /edit/{item_id}      -> edit_item_form
/// POST   /edit/{item_id}      -> update_item
/// POST   /delete/{item_id}    -> delete_item
/// POST   /checklist           -> checklist
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(items::list_items))
        .route("/add", get(items::add_item_form).post(items::create_item))
        .route(
            "/edit/{item_id}",
            get(items::edit_item_form).post(items::update_item),
        )
        .route("/delete/{item_id}", post(items::delete_item))
        .route("/checklist", post(checklist::checklist))
}
