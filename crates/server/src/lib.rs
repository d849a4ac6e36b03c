use api_types::ApiResponse;
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use engine::EngineError;

pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod server;
mod transactions;

pub mod types {
    pub mod transaction {
        pub use api_types::transaction::{
            TransactionNew, TransactionPage, TransactionSearch, TransactionTotals,
            TransactionType, TransactionView,
        };
    }
}

pub(crate) const INVALID_REQUEST: &str = "Invalid request data";
pub(crate) const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

pub enum ServerError {
    Engine(EngineError),
    /// The request could not be decoded at all.
    Malformed(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Validation(_) | EngineError::InvalidAmount(_) => StatusCode::BAD_REQUEST,
        EngineError::InvalidData(_) | EngineError::Database(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn body_for_engine_error(err: EngineError) -> ApiResponse<()> {
    match err {
        EngineError::Validation(errors) => {
            ApiResponse::error(INVALID_REQUEST, Some(errors.into_fields()))
        }
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            ApiResponse::error(UNEXPECTED_ERROR, None)
        }
        EngineError::InvalidData(detail) => {
            tracing::error!("invalid stored data: {detail}");
            ApiResponse::error(UNEXPECTED_ERROR, None)
        }
        other => ApiResponse::error(other.to_string(), None),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), body_for_engine_error(err)),
            ServerError::Malformed(message) => {
                (StatusCode::BAD_REQUEST, ApiResponse::error(message, None))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::Malformed(value.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(value: QueryRejection) -> Self {
        Self::Malformed(value.body_text())
    }
}
