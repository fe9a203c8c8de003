use axum::http::{header, HeaderName, HeaderValue, Method};
use log::*;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub mod controller;
mod error;
pub(crate) mod extractors;
pub mod liveness;
pub(crate) mod params;
pub mod router;

pub use error::{Error, Result};
pub(crate) use service::AppState;

/// Binds the configured interface/port and serves the API router until
/// the process is stopped.
pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let cors = cors_layer(&app_state.config);
    let host = app_state
        .config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_owned());
    let port = app_state.config.port;

    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}")).await?;
    info!("chirp API listening on {host}:{port}");

    axum::serve(listener, router::define_routes(app_state).layer(cors)).await
}

fn cors_layer(config: &service::config::Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-version"),
        ])
        // Login returns the session token in this header, so browsers
        // must be allowed to read it cross-origin.
        .expose_headers([header::AUTHORIZATION])
}
