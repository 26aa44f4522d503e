//! Merge semantics of PATCH against full-replacement PUT: only fields
//! present on a patch payload change, and a null field means "no change".

use axum::Router;
use axum::http::StatusCode;
use serde_json::{Value, json};
use tower::ServiceExt;

mod common;
use common::{body_json, create, empty_request, id_of, json_request, setup_app};

async fn seed_student(app: &Router) -> i64 {
    id_of(
        &create(
            app,
            "/api/etudiants",
            &json!({
                "last_name": "AAAAAAAAAA",
                "first_name": "AAAAAAAAAA",
                "registration_number": 1,
                "enrollment_date": "1970-01-01",
            }),
        )
        .await,
    )
}

async fn fetch(app: &Router, id: i64) -> Value {
    body_json(
        app.clone()
            .oneshot(empty_request("GET", &format!("/api/etudiants/{id}")))
            .await
            .unwrap(),
    )
    .await
}

#[tokio::test]
async fn patch_changes_only_the_named_field() {
    let app = setup_app().await;
    let id = seed_student(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/etudiants/{id}"),
            &json!({"last_name": "BBBBBBBBBB"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stored = fetch(&app, id).await;
    assert_eq!(stored["last_name"], "BBBBBBBBBB");
    assert_eq!(stored["first_name"], "AAAAAAAAAA");
    assert_eq!(stored["registration_number"].as_i64(), Some(1));
    assert_eq!(stored["enrollment_date"], "1970-01-01");
}

#[tokio::test]
async fn null_in_the_payload_means_no_change() {
    let app = setup_app().await;
    let id = seed_student(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/etudiants/{id}"),
            &json!({"first_name": null, "registration_number": 2}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stored = fetch(&app, id).await;
    assert_eq!(stored["first_name"], "AAAAAAAAAA", "null must not clear the column");
    assert_eq!(stored["registration_number"].as_i64(), Some(2));
}

#[tokio::test]
async fn empty_patch_is_a_noop() {
    let app = setup_app().await;
    let id = seed_student(&app).await;
    let before = fetch(&app, id).await;

    let response = app
        .clone()
        .oneshot(json_request("PATCH", &format!("/api/etudiants/{id}"), &json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(fetch(&app, id).await, before);
}

#[tokio::test]
async fn patch_can_attach_a_reference() {
    let app = setup_app().await;
    let id = seed_student(&app).await;
    let country = id_of(&create(&app, "/api/pays", &json!({"name": "Cameroun"})).await);

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/etudiants/{id}"),
            &json!({"country_id": country}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let patched = body_json(response).await;
    assert_eq!(patched["country"]["name"], "Cameroun");
    assert_eq!(patched["last_name"], "AAAAAAAAAA");
}

#[tokio::test]
async fn patch_id_rules() {
    let app = setup_app().await;
    let id = seed_student(&app).await;

    // matching body id is fine
    let matching = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/etudiants/{id}"),
            &json!({"id": id, "last_name": "BBBBBBBBBB"}),
        ))
        .await
        .unwrap();
    assert_eq!(matching.status(), StatusCode::OK);

    // a different body id is rejected before storage
    let mismatch = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/etudiants/{id}"),
            &json!({"id": id + 1, "last_name": "CCCCCCCCCC"}),
        ))
        .await
        .unwrap();
    assert_eq!(mismatch.status(), StatusCode::BAD_REQUEST);
    assert_eq!(fetch(&app, id).await["last_name"], "BBBBBBBBBB");

    // an unknown target is not found
    let absent = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            "/api/etudiants/404404",
            &json!({"last_name": "X"}),
        ))
        .await
        .unwrap();
    assert_eq!(absent.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn replace_writes_null_for_absent_fields() {
    let app = setup_app().await;
    let id = seed_student(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/etudiants/{id}"),
            &json!({"id": id, "last_name": "BBBBBBBBBB"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stored = fetch(&app, id).await;
    assert_eq!(stored["last_name"], "BBBBBBBBBB");
    assert_eq!(stored["first_name"], Value::Null);
    assert_eq!(stored["registration_number"], Value::Null);
    assert_eq!(stored["enrollment_date"], Value::Null);
}

#[tokio::test]
async fn replace_keeps_the_identity() {
    let app = setup_app().await;
    let id = seed_student(&app).await;

    let replaced = body_json(
        app.clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/etudiants/{id}"),
                &json!({"id": id, "last_name": "BBBBBBBBBB", "registration_number": 9}),
            ))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(replaced["id"].as_i64(), Some(id));
    assert_eq!(replaced["registration_number"].as_i64(), Some(9));
}
