use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use etudiant_etranger::migrations::Migrator;
use etudiant_etranger::routes;
use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use tower::ServiceExt;

pub async fn setup_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn setup_app() -> Router {
    let db = setup_db().await.expect("in-memory database");
    routes::app(&db)
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// POST a payload and return the created body.
pub async fn create(app: &Router, uri: &str, payload: &Value) -> Value {
    let response = app
        .clone()
        .oneshot(json_request("POST", uri, payload))
        .await
        .expect("response");
    assert_eq!(response.status(), axum::http::StatusCode::CREATED, "POST {uri}");
    body_json(response).await
}

/// Extract the assigned id from a created body.
pub fn id_of(body: &Value) -> i64 {
    body["id"].as_i64().expect("assigned id")
}
