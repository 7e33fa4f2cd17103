mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::middleware;
use crate::features::identity::clients::FirebaseAuthClient;
use crate::features::identity::routes as identity_routes;
use crate::features::identity::SessionService;
use crate::features::records::routes as records_routes;
use crate::features::records::RecordService;
use crate::modules::store::FirestoreClient;
use crate::shared::constants::HOME_PATH;
use crate::shared::templates::TemplateEngine;
use axum::response::Redirect;
use axum::Router;
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Configuration loaded successfully");

    // Remote document store client (read-only)
    let store = Arc::new(FirestoreClient::new(config.store.clone()));
    tracing::info!(
        "Document store client initialized for project: {}",
        config.store.project_id
    );

    // Identity provider client and session service
    let identity_client = Arc::new(FirebaseAuthClient::new(config.identity.clone()));
    let session_service = Arc::new(SessionService::new(identity_client));
    tracing::info!("Session service initialized");

    // Record service shared by every record table
    let record_service = Arc::new(RecordService::new(store));
    tracing::info!("Record service initialized");

    // Template engine for the server-rendered pages
    let templates = Arc::new(TemplateEngine::new()?);
    tracing::info!("Template engine initialized");

    // Protected routes (require an authenticated session)
    let protected_routes = records_routes::routes(
        Arc::clone(&record_service),
        Arc::clone(&templates),
    )
    .route_layer(axum::middleware::from_fn_with_state(
        Arc::clone(&session_service),
        middleware::session_gate,
    ));

    // Simple health check endpoint (no auth required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Public routes (no auth required)
    let public_routes = identity_routes::routes(Arc::clone(&session_service), templates)
        .route("/", axum::routing::get(|| async { Redirect::to(HOME_PATH) }));

    let app = Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .merge(health_route)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));

    axum::serve(listener, app).await?;

    Ok(())
}
