//! Shared response envelope types for API handlers.
//!
//! All successful responses use a `{ "data": ... }` envelope. Use
//! [`DataResponse`] instead of ad-hoc `serde_json::json!({ "data": ... })`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

// ---------------------------------------------------------------------------
// Form descriptors
// ---------------------------------------------------------------------------

/// Describes the fields a `POST` endpoint accepts, returned by the matching
/// `GET` so a client can render the form.
#[derive(Debug, Clone, Serialize)]
pub struct FormSpec {
    pub action: String,
    pub method: &'static str,
    pub enctype: &'static str,
    pub fields: &'static [FormField],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FormField {
    pub name: &'static str,
    /// HTML input type (`text`, `number`, `file`, ...).
    pub input: &'static str,
    pub required: bool,
}

pub const MULTIPART: &str = "multipart/form-data";
pub const URLENCODED: &str = "application/x-www-form-urlencoded";

impl FormSpec {
    pub fn post(action: impl Into<String>, enctype: &'static str, fields: &'static [FormField]) -> Self {
        Self {
            action: action.into(),
            method: "POST",
            enctype,
            fields,
        }
    }
}

impl FormField {
    pub const fn required(name: &'static str, input: &'static str) -> Self {
        Self {
            name,
            input,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, input: &'static str) -> Self {
        Self {
            name,
            input,
            required: false,
        }
    }
}
