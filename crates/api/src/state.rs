use std::sync::Arc;

use crate::config::ServerConfig;
use crate::uploads::ImageStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference-counted internally and the rest is
/// behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: gearlist_db::DbPool,
    /// Server configuration (upload limits, import spool directory).
    pub config: Arc<ServerConfig>,
    /// On-disk storage for item images.
    pub images: Arc<ImageStore>,
}
