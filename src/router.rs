use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use tower_http::trace::TraceLayer;

use crate::CopydeskError;
use crate::config::Config;
use crate::db::ContentStore;
use crate::handlers::admin::{change_password_handler, login_handler};
use crate::handlers::content::{get_content_handler, list_content_handler, update_content_handler};
use crate::handlers::health::health_handler;
use crate::middleware::login_limit::LoginLimiter;

#[derive(Clone)]
pub struct AppState {
    pub store: ContentStore,
    pub login_limiter: LoginLimiter,
}

impl AppState {
    pub fn new(store: ContentStore, cfg: &Config) -> Self {
        Self {
            store,
            login_limiter: LoginLimiter::per_minute(cfg.login_attempts_per_minute),
        }
    }
}

pub fn copydesk_router(state: AppState, cfg: &Config) -> Router {
    let api = Router::new()
        .route(
            "/content",
            get(list_content_handler).put(update_content_handler),
        )
        .route("/content/{section}/{key}", get(get_content_handler))
        .route("/admin/login", post(login_handler))
        .route("/admin/password", put(change_password_handler));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(cfg.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn route_not_found() -> CopydeskError {
    CopydeskError::NotFound("route".to_string())
}
