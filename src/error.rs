use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The requested row does not exist. Rendered as a bare 404.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// A path segment that does not parse as an id; no route matches it.
    #[error("no route for path: {0}")]
    UnmatchedPath(String),

    /// Unparseable or incomplete request body. Rendered as a 500.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Internal(anyhow::Error::new(err))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::UnmatchedPath(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedInput(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound { entity, id } => {
                tracing::debug!(entity, id, "not found");
                StatusCode::NOT_FOUND.into_response()
            },
            AppError::UnmatchedPath(msg) => {
                tracing::debug!(error = %msg, "unmatched path");
                StatusCode::NOT_FOUND.into_response()
            },
            AppError::MalformedInput(msg) => {
                tracing::error!(error = %msg, "malformed request");
                (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response()
            },
            AppError::Internal(err) => {
                tracing::error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            },
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
