pub mod assets;
pub mod media;
pub mod server;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Handler errors, rendered as plain text / 接口错误（纯文本响应）
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing `objname` query parameter (400)
    #[error("No object name set, invalid request.")]
    MissingObjectName,

    /// Listing or signing failed (500)
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingObjectName => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        (status, self.to_string()).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
