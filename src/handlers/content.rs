use axum::{Json, extract::State};
use tracing::info;

use crate::db::{ContentEntry, UpsertOutcome};
use crate::middleware::admin_auth::RequireAdmin;
use crate::middleware::extract::{AppJson, AppPath, AppQuery};
use crate::types::envelope::ApiSuccess;
use crate::types::requests::{ContentQuery, UpdateContentRequest};
use crate::{CopydeskError, router::AppState};

/// GET /api/content?section=hero
pub async fn list_content_handler(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ContentQuery>,
) -> Result<Json<ApiSuccess<Vec<ContentEntry>>>, CopydeskError> {
    let section = query
        .section
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let entries = state.store.list_content(section).await?;
    Ok(Json(ApiSuccess::new(entries)))
}

/// GET /api/content/{section}/{key}
pub async fn get_content_handler(
    State(state): State<AppState>,
    AppPath((section, key)): AppPath<(String, String)>,
) -> Result<Json<ApiSuccess<ContentEntry>>, CopydeskError> {
    let entry = state
        .store
        .find_content(&section, &key)
        .await?
        .ok_or_else(|| CopydeskError::NotFound(format!("content {section}/{key}")))?;
    Ok(Json(ApiSuccess::new(entry)))
}

/// PUT /api/content -> inserts or replaces one (section, key) value.
pub async fn update_content_handler(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(body): AppJson<UpdateContentRequest>,
) -> Result<Json<ApiSuccess<UpsertOutcome>>, CopydeskError> {
    let body = body.validated()?;
    let outcome = state
        .store
        .upsert_content(&body.section, &body.key, &body.value)
        .await?;

    info!(
        admin = %admin.username,
        section = %body.section,
        key = %body.key,
        id = outcome.id,
        "content updated"
    );
    Ok(Json(ApiSuccess::new(outcome)))
}
