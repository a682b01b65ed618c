use std::env;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wisata_api::routes::create_router;
use wisata_api::state::AppState;
use wisata_core::config::LayeredConfig;
use wisata_core::formats::geojson::GeoJsonLoader;
use wisata_retrieval::PlaceDirectory;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wisata_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = LayeredConfig::with_defaults().load_from_env();

    let app_version =
        env::var("APP_VERSION").unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());
    let git_sha = env::var("GIT_SHA").ok();

    tracing::info!(
        data = %config.data_path.value.display(),
        port = config.port.value,
        version = %app_version,
        "Starting wisata API server"
    );

    // Blocking one-time load; the resulting directory is immutable for the
    // rest of the process lifetime.
    let dataset = match GeoJsonLoader::load(&config.data_path.value) {
        Ok(dataset) => dataset,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load dataset");
            tracing::error!(
                "Remediation:\n\
                1. Point WISATA_DATA at a readable GeoJSON file\n\
                2. Check that the file is valid GeoJSON"
            );
            std::process::exit(1);
        }
    };

    let directory = match PlaceDirectory::from_dataset(dataset) {
        Ok(directory) => Arc::new(directory),
        Err(e) => {
            tracing::error!(error = %e, "Dataset cannot serve queries");
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState::new(
        directory,
        config.default_k.value,
        config.method.value,
        app_version,
        git_sha,
    ));

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port.value);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, addr = %addr, "Failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!("Listening on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
