// Fasum table handlers: same pass-through shape as the user table, with
// the facility's location and coordinate fields

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

const TABLE: &str = "fasum";
const FIELDS: &[&str] = &["nama", "lokasi", "longitude", "latitude"];

/// Lists every facility, ascending by id.
#[instrument(name = "list_fasum", skip(state))]
pub async fn list_fasum_handler(
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let rows: Vec<Value> = state.store.list_all(TABLE).await?;
    info!("Fetched {} fasum rows", rows.len());

    Ok(Json(Value::Array(rows)))
}

/// Returns the single facility with the given id.
#[instrument(name = "get_fasum", skip(state))]
pub async fn get_fasum_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let row: Value = state.store.get_by_id(TABLE, &id).await?;

    Ok(Json(row))
}

/// Creates a facility and returns the stored row, assigned id included.
#[instrument(name = "create_fasum", skip(state, body))]
pub async fn create_fasum_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let row: Value = state.store.insert(TABLE, pick_fields(&body, FIELDS)).await?;
    info!("Created fasum row");

    Ok((StatusCode::CREATED, Json(row)))
}

/// Overwrites every listed field of the facility with the given id.
#[instrument(name = "update_fasum", skip(state, body))]
pub async fn update_fasum_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let row: Value = state
        .store
        .update(TABLE, &id, pick_fields(&body, FIELDS))
        .await?;
    info!("Updated fasum row {id}");

    Ok(Json(row))
}

/// Deletes the facility with the given id and confirms with a fixed message.
#[instrument(name = "delete_fasum", skip(state))]
pub async fn delete_fasum_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.store.delete_by_id(TABLE, &id).await?;
    info!("Deleted fasum row {id}");

    Ok(Json(json!({ "message": "Fasum berhasil dihapus" })))
}
