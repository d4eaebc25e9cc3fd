use super::error::Result;
use super::model::Mood;
use super::store::{store_key, MoodStore};
use async_trait::async_trait;
use dashmap::DashMap;

/// Process-local store, for tests and running without Redis.
#[derive(Debug, Default)]
pub struct InMemoryMoodStore {
	entries: DashMap<String, String>,
	key_prefix: String,
}

impl InMemoryMoodStore {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with_prefix(key_prefix: impl Into<String>) -> Self {
		Self {
			entries: DashMap::new(),
			key_prefix: key_prefix.into(),
		}
	}

	/// Writes directly under `key`, bypassing prefixing and the mood vocabulary.
	pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
		self.entries.insert(key.into(), value.into());
	}

	#[must_use]
	pub fn get_raw(&self, key: &str) -> Option<String> {
		self.entries.get(key).map(|entry| entry.value().clone())
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

#[async_trait]
impl MoodStore for InMemoryMoodStore {
	async fn get(&self, id: &str) -> Result<Option<String>> {
		Ok(self.get_raw(&store_key(&self.key_prefix, id)))
	}

	async fn set(&self, id: &str, mood: Mood) -> Result<()> {
		self.entries.insert(store_key(&self.key_prefix, id), mood.as_str().to_string());
		Ok(())
	}
}
