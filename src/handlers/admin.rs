use axum::{Json, extract::State};
use serde::Serialize;
use tracing::info;

use crate::auth::password::{MIN_PASSWORD_LEN, validate_password_strength};
use crate::middleware::admin_auth::{RequireAdmin, authenticate};
use crate::middleware::extract::AppJson;
use crate::types::envelope::ApiSuccess;
use crate::types::requests::{ChangePasswordRequest, LoginRequest};
use crate::{CopydeskError, router::AppState};

#[derive(Debug, Serialize)]
pub struct AdminInfo {
    pub username: String,
}

/// POST /api/admin/login -> verifies credentials; the editor then sends
/// them as Basic auth on each write.
pub async fn login_handler(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginRequest>,
) -> Result<Json<ApiSuccess<AdminInfo>>, CopydeskError> {
    let body = body.validated()?;
    let cred = authenticate(&state, &body.username, &body.password).await?;

    info!(admin = %cred.username, "admin login");
    Ok(Json(ApiSuccess::new(AdminInfo {
        username: cred.username,
    })))
}

/// PUT /api/admin/password -> replaces the caller's own password.
pub async fn change_password_handler(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(body): AppJson<ChangePasswordRequest>,
) -> Result<Json<ApiSuccess<AdminInfo>>, CopydeskError> {
    authenticate(&state, &admin.username, &body.current_password).await?;
    validate_password_strength(&body.new_password, MIN_PASSWORD_LEN)?;

    let changed = state
        .store
        .update_credential_password(&admin.username, &body.new_password)
        .await?;
    if changed == 0 {
        return Err(CopydeskError::NotFound(format!("admin {}", admin.username)));
    }

    info!(admin = %admin.username, "admin password changed");
    Ok(Json(ApiSuccess::new(AdminInfo {
        username: admin.username,
    })))
}
