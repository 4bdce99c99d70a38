/*
 * Responsibility
 * - Logging / panic hook setup
 * - Config → collaborators (identity verifier, record store) → Router
 * - Middleware (preflight, request id, tracing, limits)
 * - axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, StoreBackend};
use crate::repos::{PostgresStore, PostgrestStore, RecordStore};
use crate::services::auth::build_identity_verifier;
use crate::{api, middleware, state::AppState};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,journal_entry=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash the whole process so it gets noticed.
        // Production: default behavior, the server keeps running.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    if config.supabase_url.is_empty() {
        tracing::warn!("SUPABASE_URL is not set; auth and REST gateway calls will fail");
    }

    let state = build_state(&config).await?;
    tracing::info!(
        env = ?config.app_env,
        addr = %config.addr,
        identity = state.identity.backend_name(),
        store = state.store.backend_name(),
        "starting journal entry service"
    );

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    // One client (connection pool) for the process; credentials are attached per request.
    let http = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build HTTP client")?;

    let identity = build_identity_verifier(config, http.clone());

    let store: Arc<dyn RecordStore> = match &config.store {
        StoreBackend::Postgrest => Arc::new(PostgrestStore::new(
            http,
            config.supabase_url.clone(),
            config.supabase_anon_key.clone(),
            config.journal_table.clone(),
        )),
        StoreBackend::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = PgPoolOptions::new()
                .max_connections(*max_connections)
                .connect(database_url)
                .await
                .context("failed to connect to DATABASE_URL")?;
            Arc::new(PostgresStore::new(pool, &config.journal_table))
        }
    };

    Ok(AppState::new(identity, store))
}

pub(crate) fn build_router(state: AppState) -> Router {
    let router = api::routes(state.clone()).with_state(state);
    let router = middleware::cors::apply(router);
    middleware::http::apply(router)
}
