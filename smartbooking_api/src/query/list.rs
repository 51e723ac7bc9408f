use url::form_urlencoded;

use super::{Query, SortDirection};

/// Rows-per-page choices offered by the list screens.
pub const ROWS_PER_PAGE_OPTIONS: &[u64] = &[5, 10, 25, 50];

/// Page size used when a screen first opens.
pub const DEFAULT_ROWS_PER_PAGE: u64 = 10;

/// Pagination, sorting and filtering state for one remote list.
///
/// Serializes to `$skip`, `$top`, `$orderby` and `$filter`, always in that
/// order. Empty optional parts are left out entirely.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListQuery {
    /// Number of records to skip.
    pub offset: u64,
    /// Page size. Never zero.
    pub limit: u64,
    /// Field to sort on, if any.
    pub sort_field: Option<String>,
    /// Direction applied to `sort_field`; `None` disables sorting.
    pub sort_direction: SortDirection,
    /// Free-text filter passed through to the backend.
    pub filter_text: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_ROWS_PER_PAGE,
            sort_field: None,
            sort_direction: SortDirection::Ascending,
            filter_text: None,
        }
    }
}

impl Query for ListQuery {
    fn encode(&self) -> String {
        let mut parts = vec![
            format!("$skip={}", self.offset),
            format!("$top={}", self.limit.max(1)),
        ];
        if let Some(order_by) = self.order_by() {
            parts.push(format!("$orderby={}", percent_encode(&order_by)));
        }
        if let Some(filter) = self.filter_text.as_deref().filter(|f| !f.is_empty()) {
            parts.push(format!("$filter={}", percent_encode(filter)));
        }
        parts.join("&")
    }
}

impl ListQuery {
    /// Sets offset and page size. A zero page size is clamped to one.
    pub fn with_page(mut self, offset: u64, limit: u64) -> Self {
        self.offset = offset;
        self.limit = limit.max(1);
        self
    }

    pub fn with_sort(mut self, field: &str, direction: SortDirection) -> Self {
        self.sort_field = Some(field.to_string()).filter(|f| !f.trim().is_empty());
        self.sort_direction = direction;
        self
    }

    /// Sets the filter text and moves back to the first page.
    pub fn with_filter(mut self, text: &str) -> Self {
        self.filter_text = Some(text.to_string()).filter(|t| !t.is_empty());
        self.offset = 0;
        self
    }

    /// Zero-based page index derived from offset and page size.
    pub fn page_index(&self) -> u64 {
        self.offset / self.limit.max(1)
    }

    /// Unencoded `$orderby` value (`"<field> <asc|desc>"`), if sorting applies.
    pub fn order_by(&self) -> Option<String> {
        let field = self.sort_field.as_deref().filter(|f| !f.trim().is_empty())?;
        let keyword = self.sort_direction.as_odata()?;
        Some(format!("{} {}", field, keyword))
    }
}

// Spaces become %20 rather than the form-encoding '+'; a literal '+' is
// already escaped as %2B by the serializer.
fn percent_encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
