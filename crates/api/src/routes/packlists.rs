//! Route definitions for packlists.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::packlists;
use crate::state::AppState;

/// ```text
/// GET    /packlists                                -> list_packlists
/// GET    /packlist/create                          -> create_form
/// POST   /packlist/create                          -> create_packlist
/// GET    /packlist/{id}                            -> get_packlist
/// POST   /packlist/{id}/delete                     -> delete_packlist
/// POST   /packlist/{id}/clear                      -> clear_packlist
/// POST   /packlist/{id}/remove_item/{assoc_id}     -> remove_item
/// POST   /add_to_packlist                          -> add_to_packlist
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/packlists", get(packlists::list_packlists))
        .route(
            "/packlist/create",
            get(packlists::create_form).post(packlists::create_packlist),
        )
        .route("/packlist/{id}", get(packlists::get_packlist))
        .route("/packlist/{id}/delete", post(packlists::delete_packlist))
        .route("/packlist/{id}/clear", post(packlists::clear_packlist))
        .route(
            "/packlist/{id}/remove_item/{assoc_id}",
            post(packlists::remove_item),
        )
        .route("/add_to_packlist", post(packlists::add_to_packlist))
}
