use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog::CatalogError;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload")]
    MalformedPayload,

    #[error("Not found")]
    NotFound,

    #[error("Invalid session or credentials")]
    Unauthorized,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Admin interface is disabled")]
    AdminDisabled,

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MalformedPayload => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::UsernameTaken => StatusCode::CONFLICT,
            AppError::AdminDisabled => StatusCode::FORBIDDEN,
            AppError::Catalog(CatalogError::FilmNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Catalog(e) => {
                error!("Catalog failure: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal(e) => {
                error!("Internal failure: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.to_string()).into_response()
    }
}
