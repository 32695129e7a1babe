mod config;
mod db;
mod llm;
mod rate_limit;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use tower_http::trace::TraceLayer;

use crate::llm::LlmChat;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env();
    let port = config.port;

    let pool = match config.database_url.as_deref() {
        Some(database_url) => match db::init_pool(database_url, config.db_max_connections).await {
            Ok(pool) => Some(pool),
            Err(e) => {
                tracing::error!(error = %e, "database init failed");
                return;
            }
        },
        None => {
            tracing::warn!("DATABASE_URL not set — catalog is memory-only");
            None
        }
    };

    // Initialize LLM client (non-fatal: AI features fall back if config missing).
    let llm: Option<Arc<dyn LlmChat>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured — AI features disabled");
            None
        }
    };

    if config.live.upstream_url.is_none() {
        tracing::warn!("LIVE_UPSTREAM_URL not set — Live Tutor disabled");
    }

    let state = state::AppState::new(pool.clone(), llm, config);

    if let Some(pool) = &pool {
        if let Err(e) = services::persistence::hydrate(&state, pool).await {
            tracing::error!(error = %e, "catalog hydrate failed");
            return;
        }
    }

    // Spawn background persistence task.
    let _persistence = services::persistence::spawn_persistence_task(state.clone());

    let app = match routes::leptos_app(state) {
        Ok(app) => app.layer(TraceLayer::new_for_http()),
        Err(e) => {
            tracing::error!(error = %e, "router setup failed");
            return;
        }
    };

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %port, "failed to bind");
            return;
        }
    };

    tracing::info!(%port, "knix listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
    }
}
