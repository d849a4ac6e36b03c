use std::{net::SocketAddr, sync::Arc};

use api_types::ApiResponse;
use axum::{
    Json, Router,
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
    routing::get,
};

use crate::transactions;
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
    let message = format!("The requested endpoint '{method} {}' was not found", uri.path());
    tracing::debug!("{message}");
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error(message, None)),
    )
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route(
            "/api/v1/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route("/api/v1/transactions/totals", get(transactions::totals))
        .fallback(not_found)
        .with_state(state)
}

pub async fn run(engine: Engine, addr: SocketAddr) {
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
