//! Error types and HTTP response handling.
//!
//! `AppError` is the top-level error of the service. It wraps store and
//! configuration errors and implements `IntoResponse`, so handlers can return
//! it directly and have it mapped onto a status code and an [`ErrorDto`] body.

pub mod config;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use campus_core::{error::DocumentStoreError, schema::ValidationError};
use thiserror::Error;

use crate::{
    error::config::ConfigError,
    model::api::{ErrorDto, FieldErrorDto},
};

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Error reported by the document store.
    ///
    /// Validation failures and malformed identities become 400, an unreachable
    /// store becomes 503 and everything else is a 500.
    #[error(transparent)]
    StoreErr(#[from] DocumentStoreError),

    /// Request body could not be read as JSON. Keeps the rejection's own
    /// status, e.g. 415 when the content type is missing.
    #[error(transparent)]
    JsonErr(#[from] JsonRejection),

    /// Socket error while binding or serving.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Results in 404 Not Found with the provided message.
    #[error("{0}")]
    NotFound(String),

    /// Results in 400 Bad Request with the provided message.
    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, Json(ErrorDto::new(msg))).into_response(),
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto::new(msg))).into_response()
            }
            Self::JsonErr(rejection) => {
                (rejection.status(), Json(ErrorDto::new(rejection.body_text()))).into_response()
            }
            Self::StoreErr(DocumentStoreError::Validation(err)) => validation_response(err),
            Self::StoreErr(DocumentStoreError::InvalidIdentity(msg)) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto::new(msg))).into_response()
            }
            Self::StoreErr(DocumentStoreError::Unavailable(msg)) => {
                tracing::error!("Store unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(ErrorDto::new("Service unavailable")),
                )
                    .into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

fn validation_response(err: ValidationError) -> Response {
    let details = err
        .errors()
        .iter()
        .map(|field| FieldErrorDto {
            path: field.path.clone(),
            message: field.to_string(),
        })
        .collect();

    (
        StatusCode::BAD_REQUEST,
        Json(ErrorDto {
            error: "Validation failed".to_string(),
            details,
        }),
    )
        .into_response()
}

/// Wrapper for turning any displayable error into a 500 response.
///
/// The error is logged in full; the client only sees a generic message.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto::new("Internal server error")),
        )
            .into_response()
    }
}
