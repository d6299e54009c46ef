// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::application::chart_service::ChartService;
use crate::infrastructure::chartjs_backend::ChartJsBackend;
use crate::infrastructure::config::{load_charts_config, load_service_config};
use crate::infrastructure::forecast_api::ForecastApiRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    export_chart, get_chart, health_check, render_charts, reset_chart,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let service_config = load_service_config()?;
    let charts_config = load_charts_config()?;

    // Create collaborators (infrastructure layer)
    let repository = Arc::new(ForecastApiRepository::new(service_config.api.base_url));
    let backend = Arc::new(ChartJsBackend::new(charts_config.surface_targets()));

    // Create service (application layer)
    let chart_service = ChartService::new(repository, backend, charts_config);

    // Create application state
    let state = Arc::new(AppState { chart_service });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/charts/render", post(render_charts))
        .route("/charts/:slot", get(get_chart).delete(reset_chart))
        .route("/charts/:slot/export", get(export_chart))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = "0.0.0.0:8080".parse().unwrap();
    println!("Starting incidence-observatory service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
