use crate::metrics::http::record_store_operation;
use crate::{AppState, MoodError};
use axum::extract::{rejection::PathRejection, Json, Path, State};
use mood_store::{Action, MoodReport};
use tracing::instrument;

/// `GET /{id}/status`
#[axum::debug_handler]
#[instrument(name = "mood_status", skip(state))]
pub async fn status(State(state): State<AppState>, path: Result<Path<(String, String)>, PathRejection>) -> Result<Json<MoodReport>, MoodError> {
	let Path((id, action)) = path?;
	if action.parse::<Action>() != Ok(Action::Status) {
		return Err(MoodError::InvalidOperation);
	}

	let stored = record_store_operation("get", state.store.get(&id).await)?;

	Ok(Json(MoodReport::from_stored(id, stored)))
}

/// `POST /{id}/feed` and `POST /{id}/slap`
#[axum::debug_handler]
#[instrument(name = "mood_update", skip(state))]
pub async fn update(State(state): State<AppState>, path: Result<Path<(String, String)>, PathRejection>) -> Result<Json<MoodReport>, MoodError> {
	let Path((id, action)) = path?;
	let mood = action.parse::<Action>().ok().and_then(Action::mood).ok_or(MoodError::UnknownAction)?;

	record_store_operation("set", state.store.set(&id, mood).await)?;
	tracing::info!(id = %id, mood = %mood, "Mood updated");

	Ok(Json(MoodReport::written(id, mood)))
}
