use std::sync::Arc;

use chrono::{Duration, FixedOffset, NaiveDateTime, Utc};
use serde_json::{json, Value};
use smartbooking_lib::types::DepartmentForm;
use smartbooking_lib::{
    AdminError, Client, DepartmentResource, FormDialog, ListController, LoadOutcome,
    MemoryNotifier, MutationCoordinator, MutationRequest, Session, Severity, SortDirection,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

type Screen = (
    Arc<ListController<DepartmentResource>>,
    MutationCoordinator<DepartmentResource>,
    Arc<MemoryNotifier>,
);

fn screen(server: &MockServer) -> Screen {
    let client = Client::new(&server.uri(), Session::with_token("tok")).unwrap();
    let notifier = Arc::new(MemoryNotifier::new());
    let controller = Arc::new(ListController::new(
        Arc::new(DepartmentResource::departments(client)),
        notifier.clone(),
    ));
    let coordinator = MutationCoordinator::new(controller.clone())
        .with_utc_offset(FixedOffset::east_opt(7 * 3600).unwrap());
    (controller, coordinator, notifier)
}

fn department_page() -> Value {
    json!({
        "@odata.count": 3,
        "value": [
            {"id": 3, "name": "Operations", "isActive": true},
            {"id": 7, "name": "Finance", "isActive": true},
            {"id": 9, "name": "Legal", "isActive": false}
        ]
    })
}

async fn mount_list(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/Department"))
        .respond_with(ResponseTemplate::new(200).set_body_json(department_page()))
        .mount(server)
        .await;
}

fn calls(requests: &[Request]) -> Vec<String> {
    requests
        .iter()
        .map(|r| format!("{} {}", r.method, r.url.path()))
        .collect()
}

#[tokio::test]
async fn bulk_delete_issues_one_call_then_one_reload() {
    let server = MockServer::start().await;
    mount_list(&server).await;
    Mock::given(method("PUT"))
        .and(path("/Department/delete"))
        .and(body_json(json!([3, 7])))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (controller, coordinator, notifier) = screen(&server);
    controller.set_page(0, 10).await;
    controller.toggle_selection(3);
    controller.toggle_selection(7);

    coordinator.delete_selected().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        calls(&requests),
        vec![
            "GET /Department",
            "PUT /Department/delete",
            "GET /Department",
        ]
    );
    let body: Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(body, json!([3, 7]));
    assert_eq!(requests[0].url.query(), requests[2].url.query());

    assert!(controller.selected_ids().is_empty());
    let notes = notifier.notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].severity, Severity::Success);
    assert_eq!(notes[0].detail, "2 departments deleted successfully");
}

#[tokio::test]
async fn empty_bulk_operations_touch_nothing() {
    let server = MockServer::start().await;
    let (controller, coordinator, notifier) = screen(&server);

    coordinator.delete(&[]).await.unwrap();
    coordinator.set_active(&[], true).await.unwrap();
    coordinator
        .execute(MutationRequest::SetActive(Vec::new(), false))
        .await
        .unwrap();
    coordinator.delete_selected().await.unwrap();

    assert!(server.received_requests().await.unwrap().is_empty());
    assert!(notifier.notifications().is_empty());
    assert_eq!(controller.total_count(), 0);
}

#[tokio::test]
async fn blank_name_fails_validation_without_network() {
    let server = MockServer::start().await;
    let (_controller, coordinator, notifier) = screen(&server);

    let mut form = DepartmentForm {
        name: "".to_string(),
        description: Some("Contracts".to_string()),
        ..DepartmentForm::default()
    };
    let err = coordinator.create(&mut form).await.unwrap_err();

    match err {
        AdminError::Validation(errors) => {
            assert_eq!(errors.get("name"), Some("Name is required."));
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(form.description.as_deref(), Some("Contracts"));
    assert!(server.received_requests().await.unwrap().is_empty());
    assert_eq!(notifier.notifications()[0].severity, Severity::Warn);
}

#[tokio::test]
async fn failed_bulk_disable_keeps_selection_and_skips_reload() {
    let server = MockServer::start().await;
    mount_list(&server).await;
    Mock::given(method("PUT"))
        .and(path("/Department/disable"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let (controller, coordinator, notifier) = screen(&server);
    controller.reload().await;
    controller.select_all();

    let err = coordinator.set_active_selected(false).await.unwrap_err();
    assert!(matches!(err, AdminError::Api(_)));
    assert_eq!(controller.selected_ids(), vec![3, 7, 9]);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        calls(&requests),
        vec!["GET /Department", "PUT /Department/disable"]
    );
    let notes = notifier.notifications();
    assert_eq!(notes.last().unwrap().severity, Severity::Error);
    assert_eq!(notes.last().unwrap().detail, "Failed to disable department");
}

#[tokio::test]
async fn dialog_create_stamps_time_resets_form_and_closes() {
    let server = MockServer::start().await;
    mount_list(&server).await;
    Mock::given(method("POST"))
        .and(path("/Department"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 12})))
        .expect(1)
        .mount(&server)
        .await;

    let (controller, coordinator, notifier) = screen(&server);
    controller.set_sort("name", SortDirection::Ascending).await;

    let mut dialog = FormDialog::<DepartmentForm>::new();
    dialog.open_new();
    dialog.form.name = "Procurement".to_string();
    dialog.submit(&coordinator).await.unwrap();

    assert!(!dialog.visible);
    assert_eq!(dialog.form, DepartmentForm::default());

    let requests = server.received_requests().await.unwrap();
    let post = requests
        .iter()
        .find(|r| r.method.to_string() == "POST")
        .unwrap();
    let body: Value = serde_json::from_slice(&post.body).unwrap();
    assert_eq!(body["name"], "Procurement");
    assert_eq!(body["isActive"], true);
    let stamp = body["createdAt"].as_str().unwrap();
    assert_eq!(stamp.len(), "2025-11-24T18:05:42".len());

    // The reload keeps the sort the user picked.
    let last = requests.last().unwrap();
    assert_eq!(last.method.to_string(), "GET");
    assert!(last.url.query().unwrap().contains("$orderby=name%20asc"));
    assert_eq!(
        notifier.notifications().last().unwrap().detail,
        "Department created successfully"
    );
}

#[tokio::test]
async fn dialog_update_failure_stays_open_with_form() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/Department/7"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;

    let (_controller, coordinator, notifier) = screen(&server);
    let mut dialog = FormDialog::<DepartmentForm>::new();
    dialog.open_edit(
        7,
        DepartmentForm {
            name: "Finance & Accounting".to_string(),
            ..DepartmentForm::default()
        },
    );
    let err = dialog.submit(&coordinator).await.unwrap_err();

    assert_eq!(err.to_string(), "API error: Request failed with status 409");
    assert!(dialog.visible);
    assert!(dialog.is_edit());
    assert_eq!(dialog.form.name, "Finance & Accounting");
    assert_eq!(
        notifier.notifications().last().unwrap().detail,
        "Failed to update department"
    );
}

#[tokio::test]
async fn dialog_keeps_field_errors_for_display() {
    let server = MockServer::start().await;
    let (_controller, coordinator, _notifier) = screen(&server);

    let mut dialog = FormDialog::<DepartmentForm>::new();
    dialog.open_new();
    assert!(dialog.submit(&coordinator).await.is_err());
    assert!(dialog.visible);
    assert!(dialog.submitted);
    assert_eq!(dialog.errors.get("name"), Some("Name is required."));

    dialog.hide();
    dialog.open_new();
    assert!(dialog.errors.is_empty());
    assert!(!dialog.submitted);
}

#[tokio::test]
async fn list_failure_keeps_last_good_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Department"))
        .respond_with(ResponseTemplate::new(200).set_body_json(department_page()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Department"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let (controller, _coordinator, notifier) = screen(&server);
    assert_eq!(controller.reload().await, LoadOutcome::Applied);
    assert_eq!(controller.set_filter("fin").await, LoadOutcome::Failed);

    assert_eq!(controller.total_count(), 3);
    assert_eq!(controller.items().len(), 3);
    assert_eq!(controller.query().filter_text.as_deref(), Some("fin"));
    assert_eq!(
        notifier.notifications().last().unwrap().detail,
        "Failed to load departments"
    );
}

#[tokio::test]
async fn default_coordinator_stamps_creation_at_utc_plus_seven() {
    let server = MockServer::start().await;
    mount_list(&server).await;
    Mock::given(method("POST"))
        .and(path("/Department"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(&server.uri(), Session::with_token("tok")).unwrap();
    let controller = Arc::new(ListController::new(
        Arc::new(DepartmentResource::departments(client)),
        Arc::new(MemoryNotifier::new()),
    ));
    let coordinator = MutationCoordinator::new(controller);

    let mut form = DepartmentForm {
        name: "Procurement".to_string(),
        ..DepartmentForm::default()
    };
    let before = Utc::now().naive_utc() + Duration::hours(7);
    coordinator.create(&mut form).await.unwrap();
    let after = Utc::now().naive_utc() + Duration::hours(7);

    let requests = server.received_requests().await.unwrap();
    let post = requests
        .iter()
        .find(|r| r.method.to_string() == "POST")
        .unwrap();
    let body: Value = serde_json::from_slice(&post.body).unwrap();
    let stamp =
        NaiveDateTime::parse_from_str(body["createdAt"].as_str().unwrap(), "%Y-%m-%dT%H:%M:%S")
            .unwrap();
    // The stamp has whole-second precision.
    assert!(stamp >= before - Duration::seconds(1), "{} < {}", stamp, before);
    assert!(stamp <= after, "{} > {}", stamp, after);
}
