//! # libcatd: library catalog daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use tracing_subscriber::EnvFilter;

use libcat_adapter_http_axum::state::AppState;
use libcat_adapter_storage_sqlite_sqlx::{
    SqliteAuthorRepository, SqliteBookInstanceRepository, SqliteBookRepository,
    SqliteSessionStore, SqliteTagRepository, SqliteUserRepository,
};
use libcat_app::services::catalog_service::CatalogService;
use libcat_app::services::session_service::SessionService;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = libcat_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Repositories
    let book_repo = SqliteBookRepository::new(pool.clone());
    let author_repo = SqliteAuthorRepository::new(pool.clone());
    let copy_repo = SqliteBookInstanceRepository::new(pool.clone());
    let tag_repo = SqliteTagRepository::new(pool.clone());
    let session_store = SqliteSessionStore::new(pool.clone());
    let user_repo = SqliteUserRepository::new(pool);

    // Services
    let catalog_service = CatalogService::new(book_repo, author_repo, copy_repo, tag_repo)
        .with_default_page_size(config.catalog.default_page_size);
    let session_service = SessionService::new(session_store, user_repo);

    // HTTP
    let state = AppState::new(catalog_service, session_service)
        .with_login_url(&config.catalog.login_url);
    let app = libcat_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "libcatd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("libcatd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let interrupt = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received, draining connections");
}
