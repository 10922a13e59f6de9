use actix_web::http::StatusCode;
use actix_web::ResponseError;

use super::super::helpers::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum PublishError {
    #[error("{0}")]
    ValidationError(String),
    /// The passcode did not match. The response carries no detail about
    /// why; the caller's origin is logged instead.
    #[error("The passcode was rejected.")]
    AuthorizationDenied,
    /// The authenticator itself is broken (unreadable secret, bad clock).
    /// Kept apart from a denial so operators can tell "wrong key" from
    /// "broken server".
    #[error("The passcode authenticator is unavailable.")]
    AuthenticatorUnavailable(#[source] anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for PublishError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for PublishError {
    fn status_code(&self) -> StatusCode {
        match self {
            PublishError::ValidationError(_) => StatusCode::BAD_REQUEST,
            PublishError::AuthorizationDenied => StatusCode::FORBIDDEN,
            PublishError::AuthenticatorUnavailable(_) | PublishError::UnexpectedError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
