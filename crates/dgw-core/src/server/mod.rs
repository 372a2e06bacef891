//! HTTP surface: `GET /{dialog_type}` redirects to the verified archive.

mod error;

pub use error::{ApiError, ErrorBody};

use anyhow::{Context, Result};
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::resolver::{ResolveError, Resolver};

/// Builds the router with the resolver injected as shared state.
pub fn router(resolver: Arc<Resolver>) -> Router {
    let router = Router::new()
        .route("/", get(list_types))
        .route("/{dialog_type}", get(redirect_dialog))
        .fallback(fallback)
        .with_state(resolver);
    layered(router)
}

/// Wraps a router with request tracing and panic-to-500 conversion.
pub fn layered(router: Router) -> Router {
    router
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(
            |_panic: Box<dyn std::any::Any + Send + 'static>| {
                tracing::error!("request handler panicked");
                ApiError::internal().into_response()
            },
        ))
}

async fn redirect_dialog(
    State(resolver): State<Arc<Resolver>>,
    uri: Uri,
    dialog_type: Result<Path<String>, PathRejection>,
) -> Response {
    // A segment that does not decode to UTF-8 can never be on the allow-list.
    let dialog_type = match dialog_type {
        Ok(Path(t)) => t,
        Err(rejection) => {
            tracing::debug!(path = %uri.path(), "rejected: {}", rejection.body_text());
            let err = ResolveError::InvalidType {
                dialog_type: uri.path().trim_start_matches('/').to_string(),
            };
            return ApiError::from_resolve(&err, resolver.allow_list()).into_response();
        }
    };
    match resolver.resolve(&dialog_type).await {
        Ok(location) => {
            tracing::info!(dialog_type = %dialog_type, url = %location, "redirecting");
            (
                StatusCode::FOUND,
                [(header::LOCATION, location.as_str().to_string())],
            )
                .into_response()
        }
        Err(e) => ApiError::from_resolve(&e, resolver.allow_list()).into_response(),
    }
}

async fn list_types(State(resolver): State<Arc<Resolver>>) -> Json<serde_json::Value> {
    Json(json!({ "dialog_types": resolver.allow_list().to_vec() }))
}

async fn fallback() -> ApiError {
    ApiError::not_found()
}

/// Binds `bind_addr:port` and serves until Ctrl-C or SIGTERM.
pub async fn serve(cfg: &GatewayConfig, resolver: Arc<Resolver>) -> Result<()> {
    let listener = TcpListener::bind((cfg.bind_addr.as_str(), cfg.port))
        .await
        .with_context(|| format!("binding {}:{}", cfg.bind_addr, cfg.port))?;
    serve_on(listener, resolver, shutdown_signal()).await
}

/// Serves on an already bound listener until `shutdown` completes.
pub async fn serve_on<F>(listener: TcpListener, resolver: Arc<Resolver>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!("HTTP server bound on {}", addr);
    axum::serve(listener, router(resolver))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;
    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("HTTP server shutting down gracefully");
}
