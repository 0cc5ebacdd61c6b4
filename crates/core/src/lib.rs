//! Domain logic for the gearlist inventory manager.
//!
//! This crate performs no I/O. It owns the error taxonomy, item-number
//! generation, catalog query resolution, the CSV transfer schema, upload
//! key derivation and the shared field validators, so the repository and
//! HTTP layers agree on one set of rules.

pub mod catalog_query;
pub mod csv_transfer;
pub mod error;
pub mod item_number;
pub mod types;
pub mod uploads;
pub mod validation;
