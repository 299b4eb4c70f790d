//! Application assembly: routes, middleware and the server loop.
//!
//! # Examples
//!
//! Hello world API.
//!
//! ```rust
//! # use hello_world_service::api::hello_world::hello_world_api::GreetingResponse;
//! # tokio_test::block_on(async {
//! # let url = hello_world_service::app::spawn_app().await.unwrap();
//! let response = reqwest::get(format!("{}/helloworld", url)).await.unwrap();
//! assert_eq!(200, response.status());
//! assert_eq!(GreetingResponse::new("Hello World!".to_string()), response.json::<GreetingResponse>().await.unwrap());
//! # });
//! ```
//!
//! Unknown paths are left to the router.
//!
//! ```rust
//! # tokio_test::block_on(async {
//! # let url = hello_world_service::app::spawn_app().await.unwrap();
//! let response = reqwest::get(format!("{}/unknown", url)).await.unwrap();
//! assert_eq!(404, response.status());
//! # });
//! ```

use std::iter;

use crate::infra::config::{Config, ServerConfig};
use crate::infra::error::{InternalError, PanicHandler};
use crate::infra::middleware::MakeRequestIdSpan;
use crate::infra::openapi::ApiDoc;
use crate::infra::shutdown::shutdown_signal;
use axum::error_handling::HandleErrorLayer;
use axum::response::IntoResponse;
use axum::{BoxError, Router};
use http::header::AUTHORIZATION;
use http::StatusCode;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Constructs the full axum application.
pub fn app(config: &Config) -> Router {
    let mut router = Router::new().merge(crate::api::api());
    if config.docs.enabled {
        router = router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }
    with_middleware(router, &config.server)
}

/// Wraps a router in the middleware stack shared by every route.
pub(crate) fn with_middleware(router: Router, config: &ServerConfig) -> Router {
    // Fallible middleware from tower, mapped to infallible response with [`HandleErrorLayer`].
    let tower_middleware = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(|e: BoxError| async move {
            InternalError::from(e).into_response()
        }))
        .load_shed()
        .concurrency_limit(config.concurrency_limit);

    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(MakeRequestIdSpan)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(()),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(SetSensitiveRequestHeadersLayer::new(iter::once(
            AUTHORIZATION,
        )))
        .layer(tower_middleware)
        .layer(CatchPanicLayer::custom(PanicHandler))
}

/// Starts the axum server and serves until a shutdown signal arrives.
pub async fn run_app(listener: TcpListener, config: Config) -> std::io::Result<()> {
    let app = app(&config).into_make_service();

    tracing::info!("Starting axum on {}", listener.local_addr()?);
    let exit_result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    match &exit_result {
        Ok(_) => tracing::info!("Successfully shut down"),
        Err(e) => tracing::error!("Shutdown failed: {}", e),
    }

    exit_result
}

/// Spawn a server on a random port.
pub async fn spawn_app() -> color_eyre::Result<String> {
    let config = crate::infra::config::load_config()?;
    spawn_app_with_config(config).await
}

/// Spawn a server on a random port with a custom configuration.
pub async fn spawn_app_with_config(config: Config) -> color_eyre::Result<String> {
    let address = "127.0.0.1";
    let listener = TcpListener::bind(format!("{address}:0")).await?;
    let port = listener.local_addr()?.port();
    tokio::spawn(run_app(listener, config));
    Ok(format!("http://{address}:{port}"))
}
