//! Shared query and form parameter types for API handlers.

use gearlist_core::catalog_query::CatalogQuery;
use gearlist_core::types::DbId;
use serde::Deserialize;

use crate::error::AppError;

/// Query parameters for the item listing (`?filter_text=&sort=&order=`).
///
/// Values are resolved against whitelists by [`CatalogQuery`]; unknown sort
/// keys fall back to `id` rather than failing.
#[derive(Debug, Default, Deserialize)]
pub struct ItemListParams {
    pub filter_text: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

impl ItemListParams {
    pub fn resolve(&self) -> CatalogQuery {
        CatalogQuery::from_params(
            self.filter_text.as_deref(),
            self.sort.as_deref(),
            self.order.as_deref(),
        )
    }
}

/// Urlencoded form body kept as raw pairs, so repeated fields such as
/// `selected_items` survive.
pub type FormPairs = Vec<(String, String)>;

/// First value of a form field, if present.
pub fn form_value<'a>(pairs: &'a [(String, String)], field: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(name, _)| name == field)
        .map(|(_, value)| value.as_str())
}

/// Parse every occurrence of a repeated id field, in submission order.
pub fn collect_ids(pairs: &[(String, String)], field: &str) -> Result<Vec<DbId>, AppError> {
    pairs
        .iter()
        .filter(|(name, _)| name == field)
        .map(|(_, value)| {
            value
                .trim()
                .parse::<DbId>()
                .map_err(|_| AppError::BadRequest(format!("Invalid {field} value '{value}'")))
        })
        .collect()
}
