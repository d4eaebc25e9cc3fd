use crate::http::resilience::handle_tower_error;
use crate::metrics::http::metrics_middleware;
use crate::routes::{health::get_health, metrics::get_metrics, mood::mood_routes};
use axum::{error_handling::HandleErrorLayer, middleware::from_fn, Router};
use mood_store::{InMemoryMoodStore, MoodStore, RedisMoodStore, RedisStoreConfig};
use std::sync::Arc;
use std::time::Duration;
use tower::{limit::ConcurrencyLimitLayer, load_shed::LoadShedLayer, timeout::TimeoutLayer, ServiceBuilder};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{filter::EnvFilter, fmt::format::JsonFields, util::SubscriberInitExt, Layer};

pub mod config;
pub mod error;
pub mod handlers;
pub mod health;
pub mod http;
pub mod metrics;
pub mod routes;

pub use config::*;
pub use error::MoodError;
pub use health::perform_health_check;

#[derive(Clone)]
pub struct AppState {
	pub config: Arc<Config>,
	pub store: Arc<dyn MoodStore>,
}

impl AppState {
	#[must_use]
	pub fn new(config: Arc<Config>, store: Arc<dyn MoodStore>) -> Self {
		Self { config, store }
	}

	/// Picks the store backend from config. Redis is not contacted until the
	/// first request needs it.
	///
	/// # Errors
	/// Returns an error if the Redis connection string is malformed.
	pub fn build(config: Arc<Config>) -> anyhow::Result<Self> {
		let store: Arc<dyn MoodStore> = if config.in_memory {
			tracing::warn!("Using in-memory mood store, moods will not survive a restart");
			Arc::new(InMemoryMoodStore::with_prefix(config.key_prefix.clone()))
		} else {
			Arc::new(RedisMoodStore::new(RedisStoreConfig::from(config.as_ref()))?)
		};

		Ok(Self::new(config, store))
	}
}

/// The full HTTP application: mood, health and metrics routes behind the
/// tracing, metrics and resilience layers.
#[must_use]
pub fn app(state: AppState) -> Router {
	let config = state.config.clone();

	Router::new()
		.merge(mood_routes())
		.merge(get_health())
		.merge(get_metrics())
		.with_state(state)
		.layer(
			ServiceBuilder::new()
				.layer(from_fn(metrics_middleware))
				.layer(TraceLayer::new_for_http())
				.layer(HandleErrorLayer::new(handle_tower_error))
				.layer(LoadShedLayer::new())
				.layer(ConcurrencyLimitLayer::new(config.max_concurrent_req))
				.layer(TimeoutLayer::new(Duration::from_millis(config.task_timeout_ms))),
		)
}

/// Installs the global subscriber. Does nothing when `RUST_LOG` is unset or
/// does not parse.
#[must_use]
pub fn init_tracing(config: &Config) -> Option<()> {
	use std::str::FromStr;
	use tracing_subscriber::layer::SubscriberExt;

	let filter = EnvFilter::from_str(config.rust_log.as_deref()?).ok()?;

	tracing_subscriber::registry()
		.with(if config.log_json {
			Box::new(
				tracing_subscriber::fmt::layer()
					.fmt_fields(JsonFields::default())
					.event_format(tracing_subscriber::fmt::format().json().flatten_event(true).with_span_list(false))
					.with_filter(filter),
			) as Box<dyn Layer<_> + Send + Sync>
		} else {
			Box::new(
				tracing_subscriber::fmt::layer()
					.event_format(tracing_subscriber::fmt::format().pretty())
					.with_filter(filter),
			)
		})
		.init();

	Some(())
}
