use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::errors::ApiError;
use crate::services::{query, record_service};
use crate::state::record::Record;
use crate::state::store::SharedStore;

pub const CREATE_DATA: &str = "/create-data";
pub const READ_DATA: &str = "/get-data";
pub const UPDATE_DATA: &str = "/update-data";
pub const DELETE_DATA: &str = "/delete-data";

/// Raw query pairs in request order, duplicates included.
type RawQuery = Query<Vec<(String, String)>>;

/// Build the four data routes. Any other method on these paths gets a 405
/// from the method router.
pub fn routes(store: SharedStore) -> Router {
    Router::new()
        .route(CREATE_DATA, put(create_data))
        .route(READ_DATA, get(read_data))
        .route(UPDATE_DATA, post(update_data))
        .route(DELETE_DATA, delete(delete_data))
        .with_state(store)
}

//
// ─────────────────────────────────────────────────────────────
// PUT /create-data?name=<STRING>[&value=<STRING>]
// Create a record, or return the existing one with that name
// ─────────────────────────────────────────────────────────────
//
async fn create_data(
    State(store): State<SharedStore>,
    Query(pairs): RawQuery,
) -> Result<impl IntoResponse, ApiError>
{
    let intent = query::parse_create(pairs)?;
    let record = record_service::create(&store, intent)?;

    Ok((
        StatusCode::CREATED,
        [
            (header::CONTENT_LOCATION, location_of(&record)),
            (header::LAST_MODIFIED, record.last_modified.clone()),
        ],
        Json(record),
    ))
}

//
// ─────────────────────────────────────────────────────────────
// GET /get-data?id=<INT> | ?name=<STRING>
// JSON array of matches, id=-1 returns everything
// ─────────────────────────────────────────────────────────────
//
async fn read_data(
    State(store): State<SharedStore>,
    Query(pairs): RawQuery,
) -> Result<Json<Vec<Record>>, ApiError>
{
    let selector = query::parse_selector(pairs)?;
    Ok(Json(record_service::read(&store, selector)?))
}

//
// ─────────────────────────────────────────────────────────────
// POST /update-data?name=<STRING>[&value=<STRING>]
// Replace the value of an existing record
// ─────────────────────────────────────────────────────────────
//
async fn update_data(
    State(store): State<SharedStore>,
    Query(pairs): RawQuery,
) -> Result<StatusCode, ApiError>
{
    let intent = query::parse_update(pairs)?;
    record_service::update(&store, intent)?;
    Ok(StatusCode::NO_CONTENT)
}

//
// ─────────────────────────────────────────────────────────────
// DELETE /delete-data?id=<INT> | ?name=<STRING>
// Remove one record, id=-1 removes everything
// ─────────────────────────────────────────────────────────────
//
async fn delete_data(
    State(store): State<SharedStore>,
    Query(pairs): RawQuery,
) -> Result<StatusCode, ApiError>
{
    let selector = query::parse_selector(pairs)?;
    record_service::delete(&store, selector)?;
    Ok(StatusCode::NO_CONTENT)
}

fn location_of(record: &Record) -> String {
    format!("{READ_DATA}?id={}", record.id)
}
