use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub type ServeResult<T> = Result<T, ServeError>;

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("login required")]
    Unauthorized,

    #[error("invalid token header: {0}")]
    InvalidTokenHeader(#[from] axum::http::header::ToStrError),

    #[error("{0}")]
    NotFound(String),

    #[error("invalid email or password")]
    CredentialMismatch,

    #[error("another member already has the email {0}")]
    AlreadyRegistered(String),

    #[error("{0}")]
    InvalidFormat(String),

    #[error("no attendance entry matches code {0}")]
    CodeNotFound(String),

    #[error("a credit for {0} was already redeemed on this account")]
    AlreadyRedeemed(String),

    #[error("sheet request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("sheet API returned status {status}")]
    SheetApi { status: u16 },

    #[error("failed to append row: {0}")]
    Persistence(String),

    #[error("{0}")]
    ServerError(String),
}

impl ServeError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServeError::Unauthorized
            | ServeError::InvalidTokenHeader(_)
            | ServeError::CredentialMismatch => StatusCode::UNAUTHORIZED,
            ServeError::NotFound(_) | ServeError::CodeNotFound(_) => StatusCode::NOT_FOUND,
            ServeError::AlreadyRegistered(_)
            | ServeError::InvalidFormat(_)
            | ServeError::AlreadyRedeemed(_) => StatusCode::BAD_REQUEST,
            ServeError::Network(_) | ServeError::SheetApi { .. } | ServeError::Persistence(_) => {
                StatusCode::BAD_GATEWAY
            }
            ServeError::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "message": self.to_string() }));

        (status, body).into_response()
    }
}
