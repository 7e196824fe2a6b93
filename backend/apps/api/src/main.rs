//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors are rendered by
//! `auth::AuthError` through `kernel::error::AppError`.

mod app;
mod config;

use anyhow::Context;
use auth::{
    AuthAppState, InMemorySessionRepository, SessionManager, StaticCredentialRepository,
    spawn_sweeper,
};
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let dev = env::args().skip(1).any(|arg| arg == "--dev");
    let config = ServerConfig::from_env()?;

    // Employee credential; malformed values stop startup
    let record = config
        .credential
        .clone()
        .into_record()
        .context("invalid employee credential")?;

    tracing::info!(
        username = %record.username,
        iterations = record.password_hash.iterations(),
        "Employee credential loaded"
    );

    // Sessions live in memory only; a restart signs everyone out
    let sessions = Arc::new(SessionManager::new(
        InMemorySessionRepository::new(),
        config.auth.session_ttl,
    ));

    if let Some(every) = config.auth.session_sweep_interval {
        spawn_sweeper(sessions.clone(), every);
        tracing::info!(interval_secs = every.as_secs(), "Session sweeper started");
    }

    let state = AuthAppState::new(
        StaticCredentialRepository::single(record),
        sessions,
        config.auth.clone(),
    );

    // Build router
    let app = app::build_router(state, &config, dev);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(
        %addr,
        dev,
        production = config.production,
        secure_cookie = config.auth.cookie_secure,
        "Memorial Transportation server listening"
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
