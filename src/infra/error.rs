//! Types for reporting errors that happened during a request.
//!
//! The greeting itself never fails. Only the surrounding middleware
//! produces these: overload shedding and caught panics.

use axum::{http::HeaderValue, response::IntoResponse, BoxError, Json};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tower_http::catch_panic::ResponseForPanic;
use utoipa::ToSchema;

/// A standard error response body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// A description of the error.
    message: String,
    /// When the error happened.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    timestamp: OffsetDateTime,
}

impl ErrorBody {
    pub(crate) fn new(message: String) -> Self {
        Self {
            message,
            timestamp: OffsetDateTime::now_utc(),
        }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// When the error happened.
    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }
}

/// An internal error.
/// The client cannot do anything about this.
#[derive(Debug, thiserror::Error)]
pub enum InternalError {
    /// Too many requests are in flight.
    #[error("service overloaded")]
    Overloaded,
    /// Other miscellaneous errors.
    #[error("{0}")]
    Other(String),
}

impl From<BoxError> for InternalError {
    fn from(e: BoxError) -> Self {
        if e.is::<tower::load_shed::error::Overloaded>() {
            InternalError::Overloaded
        } else {
            InternalError::Other(format!("Tower middleware failed: {e}"))
        }
    }
}

impl IntoResponse for InternalError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("internal error: {}", self);
        let (status, message) = match self {
            Self::Overloaded => (StatusCode::SERVICE_UNAVAILABLE, "service overloaded"),
            Self::Other(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal error"),
        };
        let mut response = (status, Json(ErrorBody::new(message.to_string()))).into_response();
        response
            .headers_mut()
            .insert("Retry-After", HeaderValue::from_static("5"));
        response
    }
}

/// A handler for converting panics into proper responses for the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanicHandler;

impl ResponseForPanic for PanicHandler {
    type ResponseBody = axum::body::Body;

    fn response_for_panic(
        &mut self,
        _: Box<dyn std::any::Any + Send + 'static>,
    ) -> http::Response<Self::ResponseBody> {
        InternalError::Other("Panic".to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(response: axum::response::Response) -> ErrorBody {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn internal_error_hides_details() {
        let response = InternalError::Other("secret".to_string()).into_response();
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());
        assert_eq!("5", response.headers()["retry-after"]);
        let body = body_of(response).await;
        assert_eq!("internal error", body.message());
        let age = OffsetDateTime::now_utc() - body.timestamp();
        assert!(age >= time::Duration::ZERO);
        assert!(age < time::Duration::seconds(5));
    }

    #[tokio::test]
    async fn overload_is_503() {
        let e: BoxError = Box::new(tower::load_shed::error::Overloaded::new());
        let response = InternalError::from(e).into_response();
        assert_eq!(StatusCode::SERVICE_UNAVAILABLE, response.status());
        assert_eq!("5", response.headers()["retry-after"]);
        assert_eq!("service overloaded", body_of(response).await.message());
    }

    #[tokio::test]
    async fn panic_becomes_internal_error() {
        let response = PanicHandler.response_for_panic(Box::new("boom"));
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());
    }
}
