use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use headers::Authorization;
use headers::authorization::Basic;
use tracing::debug;

use crate::auth::password::verify_password_blocking;
use crate::db::AdminCredential;
use crate::error::CopydeskError;
use crate::router::AppState;
use crate::types::requests::validate_ident;

/// Check a username/password pair against the stored hash.
///
/// Every credential check in the service goes through here so failures
/// count against the same per-username quota, whether they arrive through
/// the login route or as Basic auth. Unknown users and wrong passwords are
/// indistinguishable to the caller.
pub async fn authenticate(
    state: &AppState,
    username: &str,
    password: &str,
) -> Result<AdminCredential, CopydeskError> {
    if validate_ident("username", username).is_err() {
        return Err(CopydeskError::Unauthorized);
    }
    state.login_limiter.ensure_unlocked(username)?;

    let cred = state.store.find_credential(username).await?;
    let verified = match &cred {
        Some(c) => {
            verify_password_blocking(password.to_string(), c.password_hash.clone()).await?
        }
        None => false,
    };

    match cred {
        Some(cred) if verified => Ok(cred),
        _ => {
            debug!(username, "admin credential check failed");
            state.login_limiter.record_failure(username)?;
            Err(CopydeskError::Unauthorized)
        }
    }
}

/// Extractor for admin-only routes.
/// Requires `Authorization: Basic <base64(username:password)>`.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AdminCredential);

impl<S> FromRequestParts<S> for RequireAdmin
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = CopydeskError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(basic)) =
            TypedHeader::<Authorization<Basic>>::from_request_parts(parts, state)
                .await
                .map_err(|_| CopydeskError::Unauthorized)?;

        let app = AppState::from_ref(state);
        let cred = authenticate(&app, basic.username(), basic.password()).await?;
        Ok(Self(cred))
    }
}
