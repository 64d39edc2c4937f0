//! コマンドフローテスト
//!
//! 状態を持つ偽のカテゴリAPIに対して、作成・更新・削除コマンドが
//! 検証・再読み込みを含めて正しく動くことを検証

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use lifeline_admin::backend::{Backend, BackendKind};
use lifeline_admin::commands;
use lifeline_admin::error::AdminError;
use lifeline_admin_common::{Category, Contact, Error, Location, ResourceService};
use serde_json::{json, Value};

#[derive(Clone, Default)]
struct FakeCategories {
    records: Arc<Mutex<Vec<Value>>>,
    next_id: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
}

impl FakeCategories {
    fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn names(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|r| r["categoryname"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

async fn list(State(s): State<FakeCategories>) -> Json<Value> {
    Json(json!({ "data": *s.records.lock().unwrap() }))
}

async fn create(State(s): State<FakeCategories>, Json(mut body): Json<Value>) -> impl IntoResponse {
    s.writes.fetch_add(1, Ordering::SeqCst);
    let id = s.next_id.fetch_add(1, Ordering::SeqCst) + 1;
    body["_id"] = json!(format!("c{}", id));
    s.records.lock().unwrap().push(body.clone());
    (StatusCode::CREATED, Json(json!({ "data": body })))
}

async fn update(
    State(s): State<FakeCategories>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    s.writes.fetch_add(1, Ordering::SeqCst);
    let mut records = s.records.lock().unwrap();
    match records.iter_mut().find(|r| r["_id"] == id.as_str()) {
        Some(record) => {
            record["categoryname"] = body["categoryname"].clone();
            (StatusCode::OK, Json(json!({ "data": record.clone() })))
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Category not found" })),
        ),
    }
}

async fn remove(State(s): State<FakeCategories>, Path(id): Path<String>) -> impl IntoResponse {
    s.writes.fetch_add(1, Ordering::SeqCst);
    let mut records = s.records.lock().unwrap();
    let before = records.len();
    records.retain(|r| r["_id"] != id.as_str());
    if records.len() == before {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Category not found" })),
        )
    } else {
        (StatusCode::OK, Json(json!({ "message": "Category deleted" })))
    }
}

async fn spawn(state: FakeCategories) -> Backend {
    let router = Router::new()
        .route("/api/category", get(list).post(create))
        .route("/api/category/{id}", axum::routing::put(update).delete(remove))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server error");
    });
    Backend::new(BackendKind::Http, format!("http://{}/api", addr))
}

fn fields(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// 作成 → 一覧に反映
#[tokio::test]
async fn test_create_category() {
    let state = FakeCategories::default();
    let backend = spawn(state.clone()).await;

    commands::create::<Category>(&backend, &fields(&["categoryname=Banners"]), None)
        .await
        .expect("create failed");

    assert_eq!(state.names(), vec!["Banners".to_string()]);
    commands::list::<Category>(&backend).await.expect("list failed");
}

/// 必須項目が空なら通信しない
#[tokio::test]
async fn test_create_with_missing_field_never_calls() {
    let state = FakeCategories::default();
    let backend = spawn(state.clone()).await;

    let err = commands::create::<Category>(&backend, &fields(&["categoryname=   "]), None)
        .await
        .unwrap_err();

    assert!(matches!(err, AdminError::Common(Error::InvalidArgument(_))));
    assert_eq!(err.to_string(), "Please enter a category name");
    assert_eq!(state.writes(), 0);
}

/// 問い合わせの性別が未選択
#[tokio::test]
async fn test_contact_without_gender_is_rejected_locally() {
    let backend = Backend::new(BackendKind::Http, "http://127.0.0.1:9/api");

    let err = commands::create::<Contact>(
        &backend,
        &fields(&[
            "name=Ana",
            "email=ana@example.com",
            "phone=555-0100",
            "message=Hello",
        ]),
        None,
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "All fields are required.");
}

/// URL項目の形式
#[tokio::test]
async fn test_location_invalid_url() {
    let backend = Backend::new(BackendKind::Http, "http://127.0.0.1:9/api");
    let err = commands::create::<Location>(&backend, &fields(&["link=not-a-url"]), None)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Please enter a valid URL");
}

/// 存在しない項目名
#[tokio::test]
async fn test_unknown_field_is_rejected() {
    let state = FakeCategories::default();
    let backend = spawn(state.clone()).await;

    let err = commands::create::<Category>(&backend, &fields(&["colour=red"]), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AdminError::InvalidFieldArgument(_)));

    let err = commands::create::<Category>(&backend, &fields(&["novalue"]), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AdminError::InvalidFieldArgument(_)));
    assert_eq!(state.writes(), 0);
}

/// 更新
#[tokio::test]
async fn test_update_category() {
    let state = FakeCategories::default();
    let backend = spawn(state.clone()).await;
    commands::create::<Category>(&backend, &fields(&["categoryname=Old"]), None)
        .await
        .unwrap();

    commands::update::<Category>(&backend, "c1", &fields(&["categoryname=New"]), None)
        .await
        .expect("update failed");
    assert_eq!(state.names(), vec!["New".to_string()]);

    let err = commands::update::<Category>(&backend, "missing", &fields(&[]), None)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Category not found");
}

/// 削除を2回行うと2回目はサーバーの拒否
#[tokio::test]
async fn test_delete_twice() {
    let state = FakeCategories::default();
    let backend = spawn(state.clone()).await;
    commands::create::<Category>(&backend, &fields(&["categoryname=Gone"]), None)
        .await
        .unwrap();

    commands::delete::<Category>(&backend, "c1", true)
        .await
        .expect("delete failed");
    assert!(state.names().is_empty());

    let err = commands::delete::<Category>(&backend, "c1", true)
        .await
        .unwrap_err();
    assert!(matches!(err, AdminError::Failed(_)));
    assert_eq!(err.to_string(), "Category not found");
}

/// 空のIDは通信しない
#[tokio::test]
async fn test_delete_empty_id() {
    let state = FakeCategories::default();
    let backend = spawn(state.clone()).await;

    let err = commands::delete::<Category>(&backend, " ", true)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Category id is required");
    assert_eq!(state.writes(), 0);
}

/// 読み込み失敗は終了コードに反映
#[tokio::test]
async fn test_list_failure_is_reported() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let backend = Backend::new(BackendKind::Http, format!("http://{}/api", addr));

    let err = commands::list::<Category>(&backend).await.unwrap_err();
    assert!(err.to_string().starts_with("Network request failed"));
}

/// インメモリバックエンド
#[tokio::test]
async fn test_memory_backend_create() {
    let backend = Backend::new(BackendKind::Memory, "unused");
    commands::create::<Category>(&backend, &fields(&["categoryname=Local"]), None)
        .await
        .expect("create failed");
    commands::list::<Category>(&backend).await.expect("list failed");
}

/// インメモリバックエンドは呼び出しをまたいで同じストアを使う
#[tokio::test]
async fn test_memory_backend_keeps_records_between_commands() {
    let backend = Backend::new(BackendKind::Memory, "unused");
    commands::create::<Category>(&backend, &fields(&["categoryname=Local"]), None)
        .await
        .expect("create failed");

    commands::show::<Category>(&backend, "1").await.expect("show failed");
    commands::update::<Category>(&backend, "1", &fields(&["categoryname=Renamed"]), None)
        .await
        .expect("update failed");

    let records = backend.service::<Category>().list().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].categoryname, "Renamed");

    commands::delete::<Category>(&backend, "1", true)
        .await
        .expect("delete failed");
    assert!(backend.service::<Category>().list().await.unwrap().is_empty());
}
