pub mod checklist;
pub mod csv_transfer;
pub mod items;
pub mod packlists;
