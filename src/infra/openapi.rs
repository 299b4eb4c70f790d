//! OpenAPI configuration.

use crate::api::hello_world::hello_world_api;
use utoipa::OpenApi;

/// OpenApi configuration.
#[derive(OpenApi)]
#[openapi(
    paths(hello_world_api::hello_world),
    components(schemas(hello_world_api::GreetingResponse, crate::infra::error::ErrorBody))
)]
#[derive(Clone, Copy, Debug)]
pub struct ApiDoc;
