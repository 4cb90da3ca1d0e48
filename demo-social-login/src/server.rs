use axum::Router;
use http::{HeaderValue, Method, header::CONTENT_TYPE};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;

/// `PORT`, default 5000.
pub(crate) fn listen_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000)
}

/// CORS for a client served from another origin, e.g. a dev server on
/// `http://localhost:3000`. Enabled by `CORS_ALLOWED_ORIGIN`.
pub(crate) fn cors_layer() -> Result<Option<CorsLayer>, Box<dyn std::error::Error>> {
    let Ok(origin) = std::env::var("CORS_ALLOWED_ORIGIN") else {
        return Ok(None);
    };

    tracing::info!("CORS enabled for {}", origin);
    Ok(Some(
        CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([CONTENT_TYPE])
            .allow_credentials(true),
    ))
}

pub(crate) async fn serve(port: u16, app: Router) -> Result<(), std::io::Error> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server listening on {}", addr);
    axum::serve(listener, app).await
}
