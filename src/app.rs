use std::net::SocketAddr;

use anyhow::Context;
use axum::{extract::Request, routing::get, Json, Router, ServiceExt};
use serde::Serialize;
use tower::Layer;
use tower_http::{
    cors::CorsLayer,
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::state::AppState;
use crate::{error, posts, users};

/// Every route the service answers, as shown by the sitemap.
const ENDPOINTS: &[(&str, &str)] = &[
    ("GET", "/"),
    ("GET", "/users"),
    ("GET", "/user/{id}"),
    ("POST", "/user"),
    ("GET", "/user/posts/{id}"),
    ("POST", "/user/post"),
    ("DELETE", "/user/post/{id}"),
];

#[derive(Debug, Serialize)]
pub struct Endpoint {
    pub method: &'static str,
    pub path: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Sitemap {
    pub msg: &'static str,
    pub endpoints: Vec<Endpoint>,
}

pub async fn sitemap() -> Json<Sitemap> {
    Json(Sitemap {
        msg: "Available endpoints",
        endpoints: ENDPOINTS
            .iter()
            .map(|&(method, path)| Endpoint { method, path })
            .collect(),
    })
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(sitemap))
        .merge(users::router())
        .merge(posts::router())
        .fallback(error::not_found)
        .method_not_allowed_fallback(error::method_not_allowed)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

/// Full service: the router behind trailing-slash normalization, which has to
/// run before routing and so wraps the router instead of living inside it.
pub fn build_app(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

pub async fn serve(app: NormalizePath<Router>, server: &ServerConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", server.host, server.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", server.host, server.port))?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;
    Ok(())
}
