use crate::{AppState, MoodError};
use axum::extract::State;
use axum::{http::StatusCode, response::Json};
use serde::Serialize;
use tracing::instrument;

#[derive(Serialize)]
pub struct HealthResponse {
	status: &'static str,
	version: &'static str,
}

#[axum::debug_handler]
#[instrument(name = "health", skip(state))]
pub async fn health(State(state): State<AppState>) -> Result<(StatusCode, Json<HealthResponse>), MoodError> {
	state.store.ping().await.map_err(MoodError::StoreUnhealthy)?;

	let response = HealthResponse {
		status: "healthy",
		version: env!("CARGO_PKG_VERSION"),
	};

	Ok((StatusCode::OK, Json(response)))
}
