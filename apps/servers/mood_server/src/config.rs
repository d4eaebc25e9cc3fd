use clap::Parser;
use mood_store::RedisStoreConfig;
use serde::{Deserialize, Serialize};

#[derive(Parser, Clone, Debug, Serialize, Deserialize)]
#[command(author, version, about, long_about = None)]
pub struct Config {
	/// Use JSON formatting for tracing
	#[arg(long, env = "LOG_JSON", default_value = "false")]
	pub log_json: bool,

	/// Log level
	#[arg(long, env = "RUST_LOG")]
	pub rust_log: Option<String>,

	/// Redis connection string
	#[arg(long, env = "REDIS_URL", default_value = "redis://127.0.0.1:6379")]
	pub redis_url: String,

	/// Prefix prepended to every mood key
	#[arg(long, env = "KEY_PREFIX", default_value = "")]
	pub key_prefix: String,

	/// Keep moods in process memory instead of Redis
	#[arg(long, env = "IN_MEMORY_STORE", default_value = "false")]
	pub in_memory: bool,

	/// Server host
	#[arg(long, env = "HOST", default_value = "0.0.0.0")]
	pub host: String,

	/// Server port
	#[arg(long, env = "PORT", default_value = "3000")]
	pub port: u16,

	/// Per-request timeout in milliseconds
	#[arg(long, env = "TASK_TIMEOUT_MS", default_value = "30000")]
	pub task_timeout_ms: u64,

	/// Maximum number of in-flight requests
	#[arg(long, env = "MAX_CONCURRENT_REQ", default_value = "1024")]
	pub max_concurrent_req: usize,

	/// Check a running server's /health endpoint and exit
	#[arg(long)]
	pub health_check: bool,

	/// Host checked by --health-check
	#[arg(long, env = "HEALTH_CHECK_HOST", default_value = "127.0.0.1")]
	pub health_check_host: String,
}

impl Config {
	#[must_use]
	pub fn bind_addr(&self) -> String {
		format!("{}:{}", self.host, self.port)
	}
}

impl From<&Config> for RedisStoreConfig {
	fn from(config: &Config) -> Self {
		Self {
			redis_url: config.redis_url.clone(),
			key_prefix: config.key_prefix.clone(),
		}
	}
}
