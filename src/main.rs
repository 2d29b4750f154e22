mod core;
mod features;
mod shared;

use crate::core::config::Config;
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::convert::routes as convert_routes;
use crate::features::convert::{ConversionService, FallbackService, RemoteConvertService};
use crate::features::images::routes as images_routes;
use crate::features::images::ImageService;
use crate::features::rate_limits::RateLimitService;
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

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

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
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

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    // Initialize rate limiting (process-local, fixed window)
    let rate_limit_service = Arc::new(RateLimitService::new(config.rate_limit.clone()));
    tracing::info!(
        "Rate limiter initialized: {} requests per {}s window",
        config.rate_limit.max_requests,
        config.rate_limit.window_secs
    );

    // Initialize conversion strategies. Remote conversion is only active
    // when a credential is configured; its failures are never masked by the
    // fallback converter.
    let remote_service = match RemoteConvertService::from_config(&config.openai)
        .map_err(|e| anyhow::anyhow!("Failed to initialize remote converter: {}", e))?
    {
        Some(service) => {
            tracing::info!("Remote conversion enabled (model: {})", config.openai.model);
            Some(Arc::new(service))
        }
        None => {
            tracing::info!("OPENAI_API_KEY not set, using offline fallback conversion");
            None
        }
    };
    let conversion_service = Arc::new(ConversionService::new(
        remote_service,
        Arc::new(FallbackService::new()),
    ));
    tracing::info!("Conversion service initialized");

    // Initialize Image Service
    let image_service = Arc::new(
        ImageService::new(config.gemini.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize image service: {}", e))?,
    );
    if config.gemini.api_key.is_some() {
        tracing::info!("Image generation enabled (model: {})", config.gemini.model);
    } else {
        tracing::info!("GEMINI_API_KEY not set, image generation will return errors");
    }

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger =
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));

    // Simple health check endpoint
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let api_routes = Router::new()
        .merge(convert_routes::routes(
            Arc::clone(&conversion_service),
            Arc::clone(&rate_limit_service),
        ))
        .merge(images_routes::routes(image_service));

    let mut app = Router::new()
        .merge(swagger)
        .merge(api_routes)
        .merge(health_route);

    // Site-wide basic auth gate, enabled only when credentials are configured
    if let Some(credentials) = config.site_auth.credentials() {
        tracing::info!("Site basic auth enabled");
        app = app.layer(from_fn(middleware::basic_auth_middleware(Arc::new(
            credentials,
        ))));
    } else {
        tracing::info!("Site basic auth disabled (no credentials configured)");
    }

    let app = app
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
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
