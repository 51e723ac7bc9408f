//! Shared query infrastructure: the [`Query`] trait and [`SortDirection`].

use std::str::FromStr;

use url::Url;

/// Trait implemented by query builders that serialize to an OData query string.
pub trait Query {
    /// Encodes the query as a query string without the leading `?`.
    ///
    /// The output is deterministic: equal queries always produce equal strings.
    fn encode(&self) -> String;

    /// Replaces the query component of the given URL with this query, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        let encoded = self.encode();
        if encoded.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(&encoded));
        }
        url
    }
}

/// Sort order requested from the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Ascending order. This is the default.
    #[default]
    Ascending,
    /// Descending order.
    Descending,
    /// Unsorted; the `$orderby` parameter is omitted.
    None,
}

impl SortDirection {
    /// OData keyword for this direction, or `None` when unsorted.
    pub fn as_odata(&self) -> Option<&'static str> {
        match self {
            SortDirection::Ascending => Some("asc"),
            SortDirection::Descending => Some("desc"),
            SortDirection::None => None,
        }
    }

    /// Maps a data grid sort order (`1`, `-1`, `0`) onto a direction.
    pub fn from_grid_order(order: i8) -> Self {
        match order {
            1 => SortDirection::Ascending,
            -1 => SortDirection::Descending,
            _ => SortDirection::None,
        }
    }
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" | "1" => Ok(SortDirection::Ascending),
            "desc" | "descending" | "-1" => Ok(SortDirection::Descending),
            "none" | "0" => Ok(SortDirection::None),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_odata().unwrap_or("none"))
    }
}
