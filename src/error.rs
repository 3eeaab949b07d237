use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

use crate::types::envelope::ApiFailure;

pub const BASIC_REALM: &str = r#"Basic realm="copydesk""#;

#[derive(Debug, ThisError)]
pub enum CopydeskError {
    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An axum extractor refused the request (body too large, bad JSON, ...).
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Invalid credentials")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(String),

    #[error("Too many login attempts")]
    RateLimited,
}

impl From<argon2::password_hash::Error> for CopydeskError {
    fn from(e: argon2::password_hash::Error) -> Self {
        CopydeskError::PasswordHash(e.to_string())
    }
}

impl From<figment::Error> for CopydeskError {
    fn from(e: figment::Error) -> Self {
        CopydeskError::Config(Box::new(e))
    }
}

impl From<JsonRejection> for CopydeskError {
    fn from(rejection: JsonRejection) -> Self {
        let status = rejection.status();
        let message = match status {
            StatusCode::PAYLOAD_TOO_LARGE => "request body too large".to_string(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE => {
                "expected request with `Content-Type: application/json`".to_string()
            }
            _ => rejection.body_text(),
        };
        CopydeskError::Rejected { status, message }
    }
}

impl From<QueryRejection> for CopydeskError {
    fn from(rejection: QueryRejection) -> Self {
        CopydeskError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for CopydeskError {
    fn from(rejection: PathRejection) -> Self {
        CopydeskError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl CopydeskError {
    pub fn status(&self) -> StatusCode {
        match self {
            CopydeskError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CopydeskError::Unauthorized => StatusCode::UNAUTHORIZED,
            CopydeskError::NotFound(_) => StatusCode::NOT_FOUND,
            CopydeskError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            CopydeskError::Rejected { status, .. } => *status,
            CopydeskError::Database(_)
            | CopydeskError::PasswordHash(_)
            | CopydeskError::Task(_)
            | CopydeskError::Config(_)
            | CopydeskError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CopydeskError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!(error = %self, "request failed");
            "An internal server error occurred.".to_string()
        } else {
            self.to_string()
        };

        let mut resp = (status, Json(ApiFailure::new(message))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            resp.headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static(BASIC_REALM));
        }
        resp
    }
}
