use crate::MoodError;
use tower::BoxError;

/// Maps failures raised by the tower middleware stack onto API errors.
pub async fn handle_tower_error(error: BoxError) -> MoodError {
	if error.is::<tower::timeout::error::Elapsed>() {
		tracing::warn!("Request timeout: {}", error);
		MoodError::RequestTimeout
	} else if error.is::<tower::load_shed::error::Overloaded>() {
		tracing::warn!("Service overloaded: {}", error);
		MoodError::ServiceOverloaded
	} else {
		MoodError::TowerError(error)
	}
}
