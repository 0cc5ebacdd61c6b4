//! Field validators shared by the item form, the CSV importer and the packlist
//! form.
//!
//! All validators return [`CoreError::Validation`] with a message suitable for
//! showing to the user as-is.

use crate::error::CoreError;
use crate::item_number::MAX_ITEM_NUMBER_LENGTH;

/// Quantity assumed when a form omits it.
pub const DEFAULT_QUANTITY: i64 = 1;

/// Require a non-blank display name. Returns the trimmed name.
pub fn validate_name<'a>(entity: &str, name: &'a str) -> Result<&'a str, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{entity} name is required")));
    }
    Ok(trimmed)
}

/// Reject negative quantities.
pub fn validate_quantity(quantity: i64) -> Result<(), CoreError> {
    if quantity < 0 {
        return Err(CoreError::Validation(format!(
            "Quantity must not be negative (got {quantity})"
        )));
    }
    Ok(())
}

/// Parse a quantity submitted as text.
///
/// A missing or blank value falls back to `default`; anything that is not a
/// non-negative integer is rejected.
pub fn parse_quantity(raw: Option<&str>, default: Option<i64>) -> Result<i64, CoreError> {
    let value = raw.map(str::trim).unwrap_or("");
    if value.is_empty() {
        return default
            .ok_or_else(|| CoreError::Validation("Quantity is required".to_string()));
    }
    let quantity = value
        .parse::<i64>()
        .map_err(|_| CoreError::Validation(format!("Quantity '{value}' is not a whole number")))?;
    validate_quantity(quantity)?;
    Ok(quantity)
}

/// Require a caller-supplied item number to be non-blank and reasonably short.
///
/// The number is returned verbatim, surrounding whitespace included, since it
/// is the natural key an import matches on.
pub fn validate_item_number(item_number: &str) -> Result<&str, CoreError> {
    if item_number.trim().is_empty() {
        return Err(CoreError::Validation("Item number is required".to_string()));
    }
    if item_number.len() > MAX_ITEM_NUMBER_LENGTH {
        return Err(CoreError::Validation(format!(
            "Item number '{item_number}' exceeds {MAX_ITEM_NUMBER_LENGTH} characters"
        )));
    }
    Ok(item_number)
}

/// Trim an optional text field and collapse blanks to `None`.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
