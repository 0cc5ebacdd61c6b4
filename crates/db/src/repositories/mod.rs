//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument.

pub mod item_repo;
pub mod packlist_repo;

pub use item_repo::ItemRepo;
pub use packlist_repo::PackListRepo;
