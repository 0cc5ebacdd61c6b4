//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - `FromRow` + `Serialize` entity structs matching database rows
//! - `Deserialize` DTOs for inserts and full-replace updates

pub mod item;
pub mod packlist;
