use smartbooking_api::types::{
    Department, ListBody, ListResult, ODataResponse, User, UserRole, UserStatus,
};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_departments_envelope() {
    let json = load_fixture("departments.json");
    let resp: ODataResponse<Department> = serde_json::from_str(&json).unwrap();
    assert_eq!(resp.count, Some(12));
    assert_eq!(resp.value.len(), 2);

    let ops = &resp.value[0];
    assert_eq!(ops.id, 3);
    assert_eq!(ops.name, "Operations");
    assert!(ops.is_active);
    assert_eq!(ops.created_at.as_deref(), Some("2025-11-24T18:05:42"));

    let finance = &resp.value[1];
    assert_eq!(finance.id, 7);
    assert_eq!(finance.description, None);
    assert!(!finance.is_active);
}

#[test]
fn list_result_uses_count_annotation() {
    let json = load_fixture("departments.json");
    let body: ListBody<Department> = serde_json::from_str(&json).unwrap();
    let result: ListResult<Department> = body.into();
    assert_eq!(result.items.len(), 2);
    assert_eq!(result.total_count, 12);
}

#[test]
fn bare_array_counts_items() {
    let json = load_fixture("departments_bare.json");
    let body: ListBody<Department> = serde_json::from_str(&json).unwrap();
    let result: ListResult<Department> = body.into();
    assert_eq!(result.total_count, 3);
    assert_eq!(result.items[2].name, "Sales");
}

#[test]
fn missing_count_falls_back_to_page_length() {
    let json = r#"{"value": [{"id": 1, "name": "IT", "isActive": true}]}"#;
    let body: ListBody<Department> = serde_json::from_str(json).unwrap();
    let result: ListResult<Department> = body.into();
    assert_eq!(result.total_count, 1);
}

#[test]
fn deserialize_users() {
    let json = load_fixture("users.json");
    let resp: ODataResponse<User> = serde_json::from_str(&json).unwrap();
    assert_eq!(resp.count, Some(8));

    let admin = &resp.value[0];
    assert_eq!(admin.id, 1);
    assert_eq!(admin.role, UserRole::Admin);
    assert_eq!(admin.status, UserStatus::Active);
    assert_eq!(admin.full_name(), "Admin User");
    assert_eq!(admin.initials(), "AU");

    let john = &resp.value[1];
    assert_eq!(john.role, UserRole::Manager);
    assert_eq!(john.status, UserStatus::Inactive);
    assert_eq!(john.phone, None);
}

#[test]
fn deserialize_non_numeric_id_returns_error() {
    let json = r#"{"value": [{"id": "abc", "name": "IT", "isActive": true}]}"#;
    let result = serde_json::from_str::<ODataResponse<Department>>(json);
    assert!(result.is_err());
}

#[test]
fn deserialize_missing_required_fields_returns_error() {
    let json = r#"{"value": [{"id": 1}]}"#;
    let result = serde_json::from_str::<ListBody<Department>>(json);
    assert!(result.is_err());
}

#[test]
fn malformed_record_in_envelope_names_the_field() {
    let json = r#"{"@odata.count": 2, "value": [{"id": 1, "name": "IT", "isActive": true}, {"id": 2, "name": "HR"}]}"#;
    let err = serde_json::from_str::<ListBody<Department>>(json).unwrap_err();
    assert!(err.to_string().contains("isActive"), "unexpected error: {}", err);
}

#[test]
fn malformed_record_in_bare_array_names_the_field() {
    let json = r#"[{"id": 1, "isActive": true}]"#;
    let err = serde_json::from_str::<ListBody<Department>>(json).unwrap_err();
    assert!(err.to_string().contains("name"), "unexpected error: {}", err);
}

#[test]
fn scalar_body_is_rejected() {
    let err = serde_json::from_str::<ListBody<Department>>("42").unwrap_err();
    assert!(err.to_string().contains("expected an OData envelope"));
}
