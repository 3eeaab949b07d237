use copydesk::CopydeskError;
use copydesk::config::Config;
use copydesk::db::ContentStore;
use copydesk::db::seed::BOOTSTRAP_USERNAME;
use copydesk::router::{AppState, copydesk_router};
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), CopydeskError> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        listen_addr = %cfg.listen_addr,
        loglevel = %cfg.loglevel,
        body_limit_bytes = cfg.body_limit_bytes,
        login_attempts_per_minute = cfg.login_attempts_per_minute
    );

    let store = ContentStore::connect(&cfg.database_url).await?;
    let report = store.initialize().await?;
    info!(
        content_seeded = report.content_seeded,
        "content store ready"
    );
    if report.bootstrap_created {
        warn!(
            username = BOOTSTRAP_USERNAME,
            "bootstrap admin created with the default password; change it via PUT /api/admin/password"
        );
    }

    let state = AppState::new(store, &cfg);
    let app = copydesk_router(state, &cfg);

    let listener = TcpListener::bind(cfg.listen_addr.as_str()).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
