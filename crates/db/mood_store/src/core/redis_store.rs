use super::error::Result;
use super::model::Mood;
use super::store::{store_key, MoodStore};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tokio::sync::OnceCell;
use tracing::{debug, instrument};

#[derive(Clone, Debug)]
pub struct RedisStoreConfig {
	pub redis_url: String,
	pub key_prefix: String,
}

impl Default for RedisStoreConfig {
	fn default() -> Self {
		Self {
			redis_url: "redis://127.0.0.1:6379".to_string(),
			key_prefix: String::new(),
		}
	}
}

/// Redis-backed store.
///
/// The connection manager is opened on first use and shared by every request
/// afterwards. A failed first connect leaves the cell empty, so the next
/// request tries again. Once open, the manager re-establishes a dropped
/// connection by itself; the call that observes the drop still fails.
pub struct RedisMoodStore {
	client: Client,
	connection: OnceCell<ConnectionManager>,
	config: RedisStoreConfig,
}

impl RedisMoodStore {
	/// Parses the connection string.
	///
	/// # Errors
	/// Returns an error if the connection string is malformed. No network
	/// traffic happens here.
	pub fn new(config: RedisStoreConfig) -> Result<Self> {
		let client = Client::open(config.redis_url.as_str())?;
		Ok(Self {
			client,
			connection: OnceCell::new(),
			config,
		})
	}

	async fn connection(&self) -> Result<ConnectionManager> {
		let conn = self
			.connection
			.get_or_try_init(|| async {
				debug!("Opening redis connection manager");
				self.client.get_connection_manager().await
			})
			.await?;

		Ok(conn.clone())
	}

	fn make_key(&self, id: &str) -> String {
		store_key(&self.config.key_prefix, id)
	}
}

#[async_trait]
impl MoodStore for RedisMoodStore {
	#[instrument(skip(self))]
	async fn get(&self, id: &str) -> Result<Option<String>> {
		let mut con = self.connection().await?;
		let value: Option<String> = con.get(self.make_key(id)).await?;
		Ok(value)
	}

	#[instrument(skip(self))]
	async fn set(&self, id: &str, mood: Mood) -> Result<()> {
		let mut con = self.connection().await?;
		let _: () = con.set(self.make_key(id), mood.as_str()).await?;
		Ok(())
	}

	async fn ping(&self) -> Result<()> {
		let mut con = self.connection().await?;
		let _: String = redis::cmd("PING").query_async(&mut con).await?;
		Ok(())
	}
}
