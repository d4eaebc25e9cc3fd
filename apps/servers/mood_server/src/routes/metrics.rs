use crate::metrics::http::metrics_handler;
use axum::{routing::get, Router};

pub fn get_metrics<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
{
	Router::new().route("/metrics", get(metrics_handler))
}
