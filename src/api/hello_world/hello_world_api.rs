//! Implementation of the hello world API. An API that always returns the same greeting.

use crate::core::greeting::greeting_service;
use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The hello world API endpoints.
pub fn routes() -> Router {
    Router::new().route("/helloworld", get(hello_world))
}

/// This is a response to the hello world endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GreetingResponse {
    /// Always "Hello World!".
    #[schema(example = "Hello World!")]
    message: String,
}

impl GreetingResponse {
    /// Constructs a new greeting response.
    pub fn new(message: String) -> Self {
        Self { message }
    }

    /// Returns the message.
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }
}

/// A handler for requests to the hello world endpoint.
#[utoipa::path(
    get,
    path = "/helloworld",
    responses(
        (status = 200, description = "Success", body = GreetingResponse),
    )
)]
pub async fn hello_world() -> Json<GreetingResponse> {
    Json(GreetingResponse {
        message: greeting_service::hello_world(),
    })
}
