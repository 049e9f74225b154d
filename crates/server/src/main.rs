use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::{extract::State, http::StatusCode, routing::get, Router};
use server_api::ApiContext;
use storage::Storage;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;
mod controllers;
mod views;

use app_state::AppState;
use config::{load_settings, prepare_database_url};
use controllers::{api, statistics, systems};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings();
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let database_url = prepare_database_url(&settings.database_url)?;
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            %error,
            "failed to open inventory database; verify parent directory exists and permissions are correct"
        );
        error
    })?;

    let state = AppState::new(ApiContext::new(storage), settings.skin.clone());
    let app = build_router(Arc::new(state), Some(settings.static_dir.as_path()));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, skin = %settings.skin, "impulse console listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>, static_dir: Option<&Path>) -> Router {
    let mut router = Router::new()
        .route("/healthz", get(healthz))
        .route("/statistics", get(statistics::index))
        .route("/statistics/os_distribution", get(statistics::os_distribution))
        .route(
            "/statistics/os_family_distribution",
            get(statistics::os_family_distribution),
        )
        .route("/systems", get(systems::index))
        .route("/systems/view", get(systems::name_required))
        .route("/systems/view/", get(systems::name_required))
        .route("/systems/view/:name", get(systems::view))
        .route("/systems/edit", get(systems::name_required))
        .route("/systems/edit/", get(systems::name_required))
        .route("/systems/edit/:name", get(systems::edit))
        .route("/api/systems", get(api::list_systems))
        .route("/api/systems/:name", get(api::system))
        .route(
            "/api/statistics/os_distribution",
            get(api::os_distribution),
        )
        .route(
            "/api/statistics/os_family_distribution",
            get(api::os_family_distribution),
        );

    if let Some(dir) = static_dir {
        router = router.nest_service("/css", ServeDir::new(dir.join("css")));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

async fn healthz(State(state): State<Arc<AppState>>) -> (StatusCode, &'static str) {
    match state.api.storage.health_check().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(error) => {
            error!(%error, "health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
