//! REST Contract Tests
//!
//! Verify that `ApiClient` speaks the backend's HTTP contract: method, path,
//! query and body per endpoint, plus how error statuses are mapped.

use serde_json::json;
use taskboard_core::{
    ApiClient, ApiError, ClientConfig, NewTask, SubTaskPatch, TaskApi, TaskCategory, TaskStatus,
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(ClientConfig::new(format!("{}/api", server.uri())))
}

fn task_json(id: u32, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "user": 1,
        "title": title,
        "description": "Some description",
        "status": "pending",
        "category": "work",
        "created_at": "2025-03-01T10:00:00Z",
        "updated_at": "2025-03-01T10:00:00Z",
        "subtasks": [
            {"id": 10, "title": "First step", "is_completed": false, "created_at": "2025-03-01T10:00:01Z"}
        ],
        "subtasks_count": 1,
        "completed_subtasks_count": 0
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Login
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_posts_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login/"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"email": "a@b.com"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 1, "email": "a@b.com", "username": "ana"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let user = client(&server).login("a@b.com").await.expect("login should succeed");
    assert_eq!(user.id, 1);
    assert_eq!(user.email, "a@b.com");
    assert_eq!(user.username, "ana");
}

#[tokio::test]
async fn test_login_rejection_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Usuario no encontrado"})))
        .mount(&server)
        .await;

    let err = client(&server).login("nobody@b.com").await.unwrap_err();
    assert_eq!(err, ApiError::Status { status: 404, message: Some("Usuario no encontrado".into()) });
}

#[tokio::test]
async fn test_login_bad_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let err = client(&server).login("a@b.com").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

// ────────────────────────────────────────────────────────────────────────────
// Tasks
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_tasks_filters_by_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/"))
        .and(query_param("user_id", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([task_json(1, "A"), task_json(2, "B")])))
        .expect(1)
        .mount(&server)
        .await;

    let tasks = client(&server).list_tasks(1).await.unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].title, "A");
    assert_eq!(tasks[0].subtasks.len(), 1);
}

#[tokio::test]
async fn test_list_tasks_accepts_wrapped_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "No hay tareas disponibles", "tasks": []})),
        )
        .mount(&server)
        .await;

    let tasks = client(&server).list_tasks(1).await.unwrap();
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn test_create_task_posts_form_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tasks/"))
        .and(body_json(json!({
            "user": 1,
            "title": "Write report",
            "description": "Quarterly numbers",
            "status": "is_completed",
            "category": "urgent"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(task_json(3, "Write report")))
        .expect(1)
        .mount(&server)
        .await;

    let created = client(&server)
        .create_task(&NewTask {
            user: 1,
            title: "Write report".into(),
            description: "Quarterly numbers".into(),
            status: TaskStatus::Completed,
            category: TaskCategory::Urgent,
        })
        .await
        .unwrap();
    assert_eq!(created.id, Some(3));
}

#[tokio::test]
async fn test_create_task_validation_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tasks/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"description": ["La descripción debe tener al menos 10 caracteres"]})),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .create_task(&NewTask {
            user: 1,
            title: "Tit".into(),
            description: "short".into(),
            status: TaskStatus::Pending,
            category: TaskCategory::Work,
        })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.user_message("x"), "La descripción debe tener al menos 10 caracteres");
}

#[tokio::test]
async fn test_delete_task_accepts_confirmation_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/tasks/3/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Tarea eliminada exitosamente"})))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).delete_task(3).await.unwrap();
}

#[tokio::test]
async fn test_delete_missing_task_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/tasks/99/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Task not found"})))
        .mount(&server)
        .await;

    let err = client(&server).delete_task(99).await.unwrap_err();
    assert_eq!(err.user_message("x"), "Task not found");
}

// ────────────────────────────────────────────────────────────────────────────
// Subtasks
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_subtask_patches_only_given_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/subtasks/10/"))
        .and(body_json(json!({"is_completed": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 10, "task": 1, "task_title": "A", "title": "First step", "is_completed": true,
            "created_at": "2025-03-01T10:00:01Z", "updated_at": "2025-03-01T11:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let updated = client(&server).update_subtask(10, &SubTaskPatch::completion(true)).await.unwrap();
    assert!(updated.is_completed);
    assert_eq!(updated.task, Some(1));
}

#[tokio::test]
async fn test_delete_subtask_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/subtasks/10/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).delete_subtask(10).await.unwrap();
}

#[tokio::test]
async fn test_bodyless_requests_send_no_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/subtasks/10/"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let api = client(&server);
    api.list_tasks(1).await.unwrap();
    api.delete_subtask(10).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert!(
            !request.headers.contains_key("content-type"),
            "{} {} carried a content type",
            request.method,
            request.url
        );
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Transport
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Reserve a port, then release it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let api = ApiClient::new(ClientConfig::new(format!("http://127.0.0.1:{port}/api")));

    let err = api.list_tasks(1).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
}
