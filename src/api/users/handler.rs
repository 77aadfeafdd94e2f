// User table handlers: thin pass-through to the hosted store

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::api::error::ApiError;
use crate::api::pick_fields;
use crate::config::state::AppState;

const TABLE: &str = "user";
// Fields a client may set on a row; the id stays store-assigned.
const FIELDS: &[&str] = &["nama", "password"];

/// Lists every user, ascending by id.
#[instrument(name = "list_users", skip(state))]
pub async fn list_users_handler(
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let rows: Vec<Value> = state.store.list_all(TABLE).await?;
    info!("Fetched {} user rows", rows.len());

    Ok(Json(Value::Array(rows)))
}

/// Returns the single user with the given id; zero or multiple matches is
/// the store's error, forwarded as-is.
#[instrument(name = "get_user", skip(state))]
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let row: Value = state.store.get_by_id(TABLE, &id).await?;

    Ok(Json(row))
}

/// Creates a user from the body's field set and returns the stored row,
/// assigned id included.
#[instrument(name = "create_user", skip(state, body))]
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let row: Value = state.store.insert(TABLE, pick_fields(&body, FIELDS)).await?;
    info!("Created user row");

    Ok((StatusCode::CREATED, Json(row)))
}

/// Overwrites every listed field of the user with the given id.
#[instrument(name = "update_user", skip(state, body))]
pub async fn update_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let row: Value = state
        .store
        .update(TABLE, &id, pick_fields(&body, FIELDS))
        .await?;
    info!("Updated user row {id}");

    Ok(Json(row))
}

/// Deletes the user with the given id and confirms with a fixed message.
#[instrument(name = "delete_user", skip(state))]
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.store.delete_by_id(TABLE, &id).await?;
    info!("Deleted user row {id}");

    Ok(Json(json!({ "message": "User berhasil dihapus" })))
}
