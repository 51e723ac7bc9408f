use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// OData collection envelope: `{"value": [...], "@odata.count": n}`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ODataResponse<T> {
    pub value: Vec<T>,
    #[serde(rename = "@odata.count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

/// A list endpoint body. Some endpoints return a bare array instead of the envelope.
#[derive(Debug)]
pub enum ListBody<T> {
    OData(ODataResponse<T>),
    Bare(Vec<T>),
}

// Picks the shape from the JSON type so a bad record reports its own field
// error instead of a generic "no variant matched".
impl<'de, T: DeserializeOwned> Deserialize<'de> for ListBody<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Array(items) => serde_json::from_value(Value::Array(items))
                .map(ListBody::Bare)
                .map_err(D::Error::custom),
            body @ Value::Object(_) => serde_json::from_value(body)
                .map(ListBody::OData)
                .map_err(D::Error::custom),
            other => Err(D::Error::custom(format!(
                "expected an OData envelope or an array, got {}",
                other
            ))),
        }
    }
}

/// One page of records plus the total number of matching records.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListResult<T> {
    /// Records in server order.
    pub items: Vec<T>,
    /// Total matching records before paging.
    pub total_count: u64,
}

impl<T> Default for ListResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }
}

impl<T> From<ODataResponse<T>> for ListResult<T> {
    fn from(resp: ODataResponse<T>) -> Self {
        let total_count = resp.count.unwrap_or(resp.value.len() as u64);
        Self {
            items: resp.value,
            total_count,
        }
    }
}

impl<T> From<ListBody<T>> for ListResult<T> {
    fn from(body: ListBody<T>) -> Self {
        match body {
            ListBody::OData(resp) => resp.into(),
            ListBody::Bare(items) => Self {
                total_count: items.len() as u64,
                items,
            },
        }
    }
}
