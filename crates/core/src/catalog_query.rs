//! Catalog listing query resolution.
//!
//! Turns the raw `filter_text`, `sort` and `order` query parameters into a
//! [`CatalogQuery`] whose SQL fragments come only from fixed whitelists. The
//! free-text filter is never spliced into SQL; it is bound as a `LIKE`
//! pattern built by [`CatalogQuery::like_pattern`].

use serde::Serialize;

/// Columns searched by the free-text filter (OR-combined).
pub const FILTER_COLUMNS: &[&str] = &["name", "category", "season"];

/// Escape character used in generated `LIKE` patterns.
pub const LIKE_ESCAPE: char = '\\';

// ---------------------------------------------------------------------------
// Sort column
// ---------------------------------------------------------------------------

/// Sortable item columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    #[default]
    Id,
    Name,
    Weight,
    Season,
    Category,
    Quantity,
}

impl SortColumn {
    /// Resolve a query-string key. Unknown or missing keys fall back to `Id`.
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            Some("name") => Self::Name,
            Some("weight") => Self::Weight,
            Some("season") => Self::Season,
            Some("category") => Self::Category,
            Some("quantity") => Self::Quantity,
            _ => Self::Id,
        }
    }

    /// Column name in the `items` table.
    pub fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Weight => "weight",
            Self::Season => "season",
            Self::Category => "category",
            Self::Quantity => "quantity",
        }
    }
}

// ---------------------------------------------------------------------------
// Sort direction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` in any case selects descending order; anything else is ascending.
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            Some(p) if p.eq_ignore_ascii_case("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

// ---------------------------------------------------------------------------
// Resolved query
// ---------------------------------------------------------------------------

/// A validated catalog listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Trimmed filter text; `None` when blank.
    pub filter_text: Option<String>,
    pub sort: SortColumn,
    pub order: SortDirection,
}

impl CatalogQuery {
    pub fn from_params(filter_text: Option<&str>, sort: Option<&str>, order: Option<&str>) -> Self {
        let filter_text = filter_text
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Self {
            filter_text,
            sort: SortColumn::from_param(sort),
            order: SortDirection::from_param(order),
        }
    }

    /// `ORDER BY` body. Ties are broken by ascending `id` so the result order
    /// is deterministic.
    ///
    /// ```
    /// use gearlist_core::catalog_query::CatalogQuery;
    ///
    /// let q = CatalogQuery::from_params(None, Some("name"), Some("desc"));
    /// assert_eq!(q.order_by_clause(), "name DESC, id ASC");
    ///
    /// let q = CatalogQuery::from_params(None, Some("drop table"), None);
    /// assert_eq!(q.order_by_clause(), "id ASC");
    /// ```
    pub fn order_by_clause(&self) -> String {
        match self.sort {
            SortColumn::Id => format!("id {}", self.order.keyword()),
            other => format!("{} {}, id ASC", other.column(), self.order.keyword()),
        }
    }

    /// `%text%` pattern with `%`, `_` and the escape character escaped, for
    /// use with `LOWER(col) LIKE ? ESCAPE '\'`.
    ///
    /// Only ASCII letters are lowercased, matching SQLite's `LOWER`, so an
    /// exact-case substring such as `Über` still finds `Überzelt`.
    pub fn like_pattern(&self) -> Option<String> {
        self.filter_text.as_deref().map(|text| {
            let mut pattern = String::with_capacity(text.len() + 2);
            pattern.push('%');
            for ch in text.to_ascii_lowercase().chars() {
                if ch == '%' || ch == '_' || ch == LIKE_ESCAPE {
                    pattern.push(LIKE_ESCAPE);
                }
                pattern.push(ch);
            }
            pattern.push('%');
            pattern
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
