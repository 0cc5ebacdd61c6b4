//! CSV transfer schema for the item catalog.
//!
//! The file format is fixed: UTF-8, comma-delimited, mandatory header row with
//! the ten columns in [`CSV_HEADERS`]. Export always writes the columns in
//! that order. Import locates columns by header name (case-insensitive, any
//! order, extra columns ignored) and rejects the whole file if any column is
//! missing or any row is malformed, before anything touches the database.

use std::collections::HashMap;
use std::io::Read;

use serde::Serialize;

use crate::error::CoreError;
use crate::validation::{normalize_optional, parse_quantity, validate_item_number, validate_name};

/// Header row, in export order.
pub const CSV_HEADERS: [&str; 10] = [
    "item_number",
    "name",
    "description",
    "weight",
    "season",
    "keywords",
    "category",
    "image_path",
    "url",
    "quantity",
];

/// Download filename for exports.
pub const EXPORT_FILENAME: &str = "camping_items.csv";

/// Content type for exports.
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// One catalog row in transfer form.
///
/// Field order matches [`CSV_HEADERS`]; `None` is written as an empty field
/// and an empty field is read back as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRecord {
    pub item_number: String,
    pub name: String,
    pub description: Option<String>,
    pub weight: Option<String>,
    pub season: Option<String>,
    pub keywords: Option<String>,
    pub category: Option<String>,
    pub image_path: Option<String>,
    pub url: Option<String>,
    pub quantity: i64,
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Serialize records into a complete CSV document (header included, even when
/// there are no records).
pub fn write_csv<'a, I>(records: I) -> Result<Vec<u8>, CoreError>
where
    I: IntoIterator<Item = &'a ItemRecord>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record(CSV_HEADERS)
        .map_err(|e| CoreError::Internal(format!("CSV write failed: {e}")))?;
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| CoreError::Internal(format!("CSV write failed: {e}")))?;
    }

    writer
        .into_inner()
        .map_err(|e| CoreError::Internal(format!("CSV flush failed: {e}")))
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// Column positions resolved from a header row.
struct HeaderIndex {
    positions: HashMap<&'static str, usize>,
}

impl HeaderIndex {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, CoreError> {
        let by_name: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_lowercase(), i))
            .collect();

        let missing: Vec<&str> = CSV_HEADERS
            .iter()
            .copied()
            .filter(|col| !by_name.contains_key(*col))
            .collect();
        if !missing.is_empty() {
            return Err(CoreError::Validation(format!(
                "CSV is missing required columns: {}",
                missing.join(", ")
            )));
        }

        let positions = CSV_HEADERS
            .iter()
            .map(|col| (*col, by_name[*col]))
            .collect();
        Ok(Self { positions })
    }

    fn field<'r>(&self, record: &'r csv::StringRecord, column: &str) -> &'r str {
        self.positions
            .get(column)
            .and_then(|&i| record.get(i))
            .unwrap_or("")
    }

    fn optional(&self, record: &csv::StringRecord, column: &str) -> Option<String> {
        normalize_optional(Some(self.field(record, column).to_string()))
    }

    fn parse_row(&self, record: &csv::StringRecord) -> Result<ItemRecord, CoreError> {
        let item_number = validate_item_number(self.field(record, "item_number"))?.to_string();
        let name = validate_name("Item", self.field(record, "name"))?.to_string();
        let quantity = parse_quantity(Some(self.field(record, "quantity")), None)?;

        Ok(ItemRecord {
            item_number,
            name,
            description: self.optional(record, "description"),
            weight: self.optional(record, "weight"),
            season: self.optional(record, "season"),
            keywords: self.optional(record, "keywords"),
            category: self.optional(record, "category"),
            image_path: self.optional(record, "image_path"),
            url: self.optional(record, "url"),
            quantity,
        })
    }
}

/// Parse and validate an entire CSV document.
///
/// Returns every data row in file order, or the first error annotated with
/// its 1-based data row number.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<ItemRecord>, CoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| CoreError::Validation(format!("CSV header is unreadable: {e}")))?
        .clone();
    let index = HeaderIndex::resolve(&headers)?;

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = result.map_err(|e| CoreError::Validation(format!("Row {row}: {e}")))?;
        let parsed = index.parse_row(&record).map_err(|e| match e {
            CoreError::Validation(msg) => CoreError::Validation(format!("Row {row}: {msg}")),
            other => other,
        })?;
        records.push(parsed);
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
