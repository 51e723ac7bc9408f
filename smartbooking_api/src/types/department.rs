use serde::{Deserialize, Serialize};

use super::RecordId;

/// A department as returned by `GET /Department`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    #[serde(deserialize_with = "super::deserialize_id")]
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Create/update payload for a department.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentForm {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    /// Set on create; the backend keeps the original value on update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Default for DepartmentForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            is_active: true,
            created_at: None,
        }
    }
}

impl From<&Department> for DepartmentForm {
    fn from(d: &Department) -> Self {
        Self {
            name: d.name.clone(),
            description: d.description.clone(),
            is_active: d.is_active,
            created_at: d.created_at.clone(),
        }
    }
}
