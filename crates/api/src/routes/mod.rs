pub mod csv_transfer;
pub mod health;
pub mod items;
pub mod packlists;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree, mounted at the root.
///
/// ```text
/// GET       /                                      item listing + packlists
/// GET,POST  /add                                   item form / create
/// GET,POST  /edit/{item_id}                        item form / update
/// POST      /delete/{item_id}                      delete item
/// POST      /checklist                             printable checklist
///
/// GET       /export_csv                            CSV download
/// GET,POST  /import_csv                            import form / upsert
///
/// GET       /packlists                             packlist overview
/// GET,POST  /packlist/create                       packlist form / create
/// GET       /packlist/{id}                         packlist detail
/// POST      /packlist/{id}/delete                  delete packlist
/// POST      /packlist/{id}/clear                   remove all entries
/// POST      /packlist/{id}/remove_item/{assoc_id}  remove one entry
/// POST      /add_to_packlist                       attach selected items
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(items::router())
        .merge(csv_transfer::router())
        .merge(packlists::router())
}
