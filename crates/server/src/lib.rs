use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::{EngineError, FieldErrors};
use serde::Serialize;

pub use credentials::Credentials;
pub use server::{run, run_with_listener, spawn_with_listener};

mod auth;
mod categories;
mod credentials;
mod server;
mod transactions;

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<FieldErrors>,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Validation(_) => StatusCode::BAD_REQUEST,
        EngineError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
        EngineError::Forbidden(_) => StatusCode::FORBIDDEN,
        EngineError::NotFound { .. } => StatusCode::NOT_FOUND,
        EngineError::Conflict(_) => StatusCode::CONFLICT,
        EngineError::Domain(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Credential(_) | EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn body_for_engine_error(err: EngineError) -> Error {
    match err {
        EngineError::Validation(fields) => Error {
            error: "one or more validation failures have occurred".to_string(),
            fields: Some(fields),
        },
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            Error {
                error: "internal server error".to_string(),
                fields: None,
            }
        }
        EngineError::Credential(err) => {
            tracing::error!("credential service error: {err}");
            Error {
                error: "internal server error".to_string(),
                fields: None,
            }
        }
        other => Error {
            error: other.to_string(),
            fields: None,
        },
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), body_for_engine_error(err)),
            ServerError::Generic(err) => (
                StatusCode::BAD_REQUEST,
                Error {
                    error: err,
                    fields: None,
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

pub(crate) fn kind_to_engine(kind: api_types::EntryKind) -> engine::EntryKind {
    match kind {
        api_types::EntryKind::Income => engine::EntryKind::Income,
        api_types::EntryKind::Expense => engine::EntryKind::Expense,
    }
}

pub(crate) fn kind_to_api(kind: engine::EntryKind) -> api_types::EntryKind {
    match kind {
        engine::EntryKind::Income => api_types::EntryKind::Income,
        engine::EntryKind::Expense => api_types::EntryKind::Expense,
    }
}
