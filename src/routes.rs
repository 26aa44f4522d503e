//! Generic REST handlers shared by all four resources, and the application
//! router wiring them under `/api`.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::domain::{Etudiant, Filiere, Niveau, Pays};
use crate::errors::ApiError;
use crate::filter::apply_filters;
use crate::models::ListParams;
use crate::openapi::ApiDoc;
use crate::pagination::{pagination_headers, parse_page};
use crate::sort::parse_sort;
use crate::traits::{CrudResource, PayloadId};

/// GET `/`: filtered, sorted, paginated collection with count headers.
pub async fn get_all<T: CrudResource + 'static>(
    Query(params): Query<ListParams>,
    State(db): State<DatabaseConnection>,
) -> Result<(HeaderMap, Json<Vec<T>>), ApiError> {
    let condition = apply_filters(params.filter.as_deref(), &T::filterable_columns());
    let order = parse_sort(&params, &T::sortable_columns());
    let page = parse_page(&params);
    let items = T::get_all(&db, condition.clone(), order, page).await?;
    let total = T::total_count(&db, condition).await?;
    Ok((
        pagination_headers(page, total, T::RESOURCE_NAME_PLURAL),
        Json(items),
    ))
}

/// GET `/{id}`: one record with its references hydrated.
pub async fn get_one<T: CrudResource + 'static>(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i64>,
) -> Result<Json<T>, ApiError> {
    Ok(Json(T::get_one(&db, id).await?))
}

/// POST `/`: create; a payload that already carries an id is rejected
/// before storage is touched.
pub async fn create_one<T: CrudResource + 'static>(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<T::CreateModel>,
) -> Result<(StatusCode, Json<T>), ApiError> {
    if payload.payload_id().is_some() {
        return Err(ApiError::bad_request(format!(
            "a new {} cannot already have an id",
            T::RESOURCE_NAME_SINGULAR
        )));
    }
    tracing::debug!(resource = T::RESOURCE_NAME_SINGULAR, "create");
    let created = T::create(&db, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT `/{id}`: full replacement; the payload id must be present and match
/// the path, and the target must already exist.
pub async fn replace_one<T: CrudResource + 'static>(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i64>,
    Json(payload): Json<T::ReplaceModel>,
) -> Result<Json<T>, ApiError> {
    let body_id = payload
        .payload_id()
        .ok_or_else(|| ApiError::bad_request("missing id in payload"))?;
    if body_id != id {
        return Err(ApiError::bad_request(format!(
            "payload id {body_id} does not match path id {id}"
        )));
    }
    tracing::debug!(resource = T::RESOURCE_NAME_SINGULAR, id, "replace");
    Ok(Json(T::replace(&db, id, payload).await?))
}

/// PATCH `/{id}`: partial update with merge semantics; a payload id, when
/// present, must match the path.
pub async fn patch_one<T: CrudResource + 'static>(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i64>,
    Json(payload): Json<T::PatchModel>,
) -> Result<Json<T>, ApiError> {
    if let Some(body_id) = payload.payload_id()
        && body_id != id
    {
        return Err(ApiError::bad_request(format!(
            "payload id {body_id} does not match path id {id}"
        )));
    }
    if !T::exists(&db, id).await? {
        return Err(ApiError::not_found(
            T::RESOURCE_NAME_SINGULAR,
            Some(id.to_string()),
        ));
    }
    tracing::debug!(resource = T::RESOURCE_NAME_SINGULAR, id, "partial update");
    Ok(Json(T::patch(&db, id, payload).await?))
}

/// DELETE `/{id}`: no content, idempotent: deleting an absent row is still
/// a 204.
pub async fn delete_one<T: CrudResource + 'static>(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    tracing::debug!(resource = T::RESOURCE_NAME_SINGULAR, id, "delete");
    T::delete(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The six endpoints every resource exposes.
pub fn crud_router<T: CrudResource + 'static>() -> Router<DatabaseConnection> {
    Router::new()
        .route("/", get(get_all::<T>).post(create_one::<T>))
        .route(
            "/{id}",
            get(get_one::<T>)
                .put(replace_one::<T>)
                .patch(patch_one::<T>)
                .delete(delete_one::<T>),
        )
}

/// Full application router: the four collections under `/api`, the
/// interactive API reference under `/docs`.
pub fn app(db: &DatabaseConnection) -> Router {
    let api = Router::new()
        .nest("/etudiants", crud_router::<Etudiant>())
        .nest("/filieres", crud_router::<Filiere>())
        .nest("/niveaus", crud_router::<Niveau>())
        .nest("/pays", crud_router::<Pays>())
        .with_state(db.clone());
    Router::new()
        .nest("/api", api)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}
