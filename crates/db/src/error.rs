use gearlist_core::error::CoreError;

/// Error returned by store operations that enforce domain rules.
///
/// Plain lookups return `sqlx::Error` directly; operations that can reject
/// input (validation, missing parents, cross-list removal) return this.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
