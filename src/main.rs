use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use laureate::config::Config;
use laureate::engine::{CertificateEngine, DirSource, HttpSource, StandardSource};
use laureate::roster::Roster;
use laureate::routes;
use laureate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "laureate=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    let config = Arc::new(config);

    let roster = Roster::load(&config.roster_path)?;
    tracing::info!(
        "Loaded {} students from {}",
        roster.len(),
        config.roster_path.display()
    );

    let source = match &config.asset_base_url {
        Some(base) => StandardSource::Http(HttpSource::new(base.clone())),
        None => StandardSource::Dir(DirSource::new(config.asset_dir.clone())),
    };
    let engine = CertificateEngine::new(source, config.asset_timeout);

    let state = Arc::new(AppState {
        roster,
        engine,
        config: config.clone(),
    });

    let app = Router::new()
        .route("/", get(routes::index))
        .route("/api/verify-student", get(routes::verify_student))
        .route(
            "/api/generate-certificate",
            post(routes::generate_certificate),
        )
        .nest_service(
            "/assets",
            tower_http::services::ServeDir::new(config.asset_dir.clone()),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Laureate listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
