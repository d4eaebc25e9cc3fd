use super::error::Result;
use super::model::Mood;
use async_trait::async_trait;

/// Single-key persistence for mood records.
///
/// Implementations hold one value per identifier and resolve concurrent
/// writes to the same key however the backend does (last write wins for
/// Redis). Neither call retries.
#[async_trait]
pub trait MoodStore: Send + Sync + 'static {
	/// Returns the raw stored value for `id`, or `None` when no record exists.
	///
	/// # Errors
	/// Returns an error if the backend cannot be reached.
	async fn get(&self, id: &str) -> Result<Option<String>>;

	/// Overwrites the record for `id`.
	///
	/// # Errors
	/// Returns an error if the backend cannot be reached.
	async fn set(&self, id: &str, mood: Mood) -> Result<()>;

	/// Liveness check used by the health endpoint.
	///
	/// # Errors
	/// Returns an error if the backend cannot be reached.
	async fn ping(&self) -> Result<()> {
		Ok(())
	}
}

/// Namespaced key for an identifier.
#[must_use]
pub fn store_key(prefix: &str, id: &str) -> String {
	format!("{prefix}{id}")
}
