use thiserror::Error;

/// Failures raised by a [`crate::MoodStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
	#[error("Redis error: {0}")]
	Redis(#[from] redis::RedisError),

	#[error("Store unavailable: {0}")]
	Unavailable(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
	#[error("Unknown action: {0}")]
	UnknownAction(String),

	#[error("Unknown mood: {0}")]
	UnknownMood(String),
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
