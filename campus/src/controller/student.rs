use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use bson::ser::serialize_to_bson;
use serde_json::Value;

use crate::{error::AppError, service::student::StudentService, state::AppState};

/// Create a student.
///
/// The body is validated against the student schema before anything is
/// written; fields the schema doesn't know are dropped.
///
/// # Returns
/// - `201 Created` - The stored student, including its `_id`
/// - `400 Bad Request` - Malformed JSON or schema violations (with `details`)
/// - `413`/`415` - Oversized body or a missing JSON content type
/// - `503 Service Unavailable` - The store can't be reached
/// - `500 Internal Server Error` - Any other store failure
pub async fn create_student(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;

    let document = serialize_to_bson(&payload)
        .map_err(|err| AppError::BadRequest(format!("Unsupported request body: {err}")))?;

    let student = StudentService::new(&state.store)
        .create_from_document(document)
        .await?;

    Ok((StatusCode::CREATED, Json(student)))
}

/// List every student.
///
/// # Returns
/// - `200 OK` - JSON array of students, empty when none exist
/// - `503 Service Unavailable` - The store can't be reached
pub async fn get_all_students(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let students = StudentService::new(&state.store).list_all().await?;

    Ok((StatusCode::OK, Json(students)))
}

/// Get one student by identity.
///
/// # Returns
/// - `200 OK` - The student
/// - `400 Bad Request` - `id` is not a valid identity
/// - `404 Not Found` - No student has that identity
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let student = StudentService::new(&state.store)
        .get_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student {id} not found")))?;

    Ok((StatusCode::OK, Json(student)))
}
