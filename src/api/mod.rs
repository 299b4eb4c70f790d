//! The HTTP API.

use axum::Router;

pub mod hello_world;

/// Constructs the API routes.
pub fn api() -> Router {
    Router::new().merge(hello_world::hello_world_api::routes())
}
