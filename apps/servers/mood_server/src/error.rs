use axum::body::Body;
use axum::extract::rejection::PathRejection;
use axum::http::{Response, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use mood_store::StoreError;
use serde::Serialize;

#[derive(thiserror::Error, Debug)]
pub enum MoodError {
	#[error("Use POST to change mood")]
	InvalidOperation,

	#[error("Invalid action")]
	UnknownAction,

	#[error("{0}")]
	InvalidPath(String),

	#[error("Redis connection failed")]
	StoreUnavailable(#[from] StoreError),

	#[error("Redis connection failed")]
	StoreUnhealthy(StoreError),

	#[error("Request timed out")]
	RequestTimeout,

	#[error("Service temporarily overloaded")]
	ServiceOverloaded,

	#[error("Unexpected Tower Service error: {0}")]
	TowerError(#[from] tower::BoxError),
}

#[derive(Serialize)]
struct ErrorBody {
	error: String,
}

impl MoodError {
	#[must_use]
	pub const fn status_code(&self) -> StatusCode {
		match self {
			Self::InvalidOperation => StatusCode::BAD_REQUEST,
			Self::UnknownAction => StatusCode::NOT_FOUND,
			Self::InvalidPath(_) => StatusCode::BAD_REQUEST,
			Self::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
			Self::StoreUnhealthy(_) => StatusCode::SERVICE_UNAVAILABLE,
			Self::RequestTimeout => StatusCode::GATEWAY_TIMEOUT,
			Self::ServiceOverloaded => StatusCode::SERVICE_UNAVAILABLE,
			Self::TowerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl From<PathRejection> for MoodError {
	fn from(rejection: PathRejection) -> Self {
		Self::InvalidPath(rejection.body_text())
	}
}

impl IntoResponse for MoodError {
	fn into_response(self) -> Response<Body> {
		let message = match self {
			// Internal detail stays in the logs.
			Self::StoreUnavailable(ref e) => {
				tracing::error!(error = %e, "Mood store call failed");
				self.to_string()
			}
			Self::StoreUnhealthy(ref e) => {
				tracing::warn!(error = %e, "Mood store failed health check");
				self.to_string()
			}
			Self::TowerError(ref e) => {
				tracing::error!(error = %e, "Unhandled tower error");
				"Internal Server Error".to_string()
			}
			_ => self.to_string(),
		};

		(self.status_code(), Json(ErrorBody { error: message })).into_response()
	}
}
