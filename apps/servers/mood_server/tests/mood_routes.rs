#[cfg(test)]
mod tests {
	use async_trait::async_trait;
	use axum::body::{to_bytes, Body};
	use axum::http::{header::CONTENT_TYPE, Method, Request, StatusCode};
	use axum::Router;
	use clap::Parser;
	use mood_server::{app, AppState, Config};
	use mood_store::{InMemoryMoodStore, Mood, MoodStore, StoreError};
	use serde_json::{json, Value};
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::sync::Arc;
	use std::time::Duration;
	use tower::ServiceExt;

	/// Every call fails, as if Redis were down.
	#[derive(Default)]
	struct FailingStore {
		calls: AtomicUsize,
	}

	#[async_trait]
	impl MoodStore for FailingStore {
		async fn get(&self, _id: &str) -> Result<Option<String>, StoreError> {
			self.calls.fetch_add(1, Ordering::SeqCst);
			Err(StoreError::Unavailable("connection refused".to_string()))
		}

		async fn set(&self, _id: &str, _mood: Mood) -> Result<(), StoreError> {
			self.calls.fetch_add(1, Ordering::SeqCst);
			Err(StoreError::Unavailable("connection refused".to_string()))
		}

		async fn ping(&self) -> Result<(), StoreError> {
			Err(StoreError::Unavailable("connection refused".to_string()))
		}
	}

	/// Never answers within any sane deadline.
	struct StalledStore;

	#[async_trait]
	impl MoodStore for StalledStore {
		async fn get(&self, _id: &str) -> Result<Option<String>, StoreError> {
			tokio::time::sleep(Duration::from_secs(60)).await;
			Ok(None)
		}

		async fn set(&self, _id: &str, _mood: Mood) -> Result<(), StoreError> {
			tokio::time::sleep(Duration::from_secs(60)).await;
			Ok(())
		}
	}

	fn test_config(args: &[&str]) -> Arc<Config> {
		let argv = std::iter::once("mood_server").chain(args.iter().copied());
		Arc::new(Config::parse_from(argv))
	}

	fn test_app(store: Arc<dyn MoodStore>) -> Router {
		app(AppState::new(test_config(&[]), store))
	}

	async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
		let request = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
		let response = app.clone().oneshot(request).await.unwrap();
		let status = response.status();
		let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
		let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
		(status, body)
	}

	// ============================================================================
	// READ PATH
	// ============================================================================

	#[tokio::test]
	async fn test_unwritten_id_reports_unknown() {
		let app = test_app(Arc::new(InMemoryMoodStore::new()));

		let (status, body) = send(&app, Method::GET, "/alice/status").await;

		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, json!({ "id": "alice", "mood": "unknown" }));
	}

	#[tokio::test]
	async fn test_get_with_write_action_is_rejected() {
		let store = Arc::new(InMemoryMoodStore::new());
		let app = test_app(store.clone());

		let (status, body) = send(&app, Method::GET, "/alice/feed").await;

		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(body, json!({ "error": "Use POST to change mood" }));
		assert!(store.is_empty());
	}

	#[tokio::test]
	async fn test_get_with_unknown_action_is_rejected() {
		let app = test_app(Arc::new(InMemoryMoodStore::new()));

		let (status, body) = send(&app, Method::GET, "/alice/poke").await;

		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(body, json!({ "error": "Use POST to change mood" }));
	}

	#[tokio::test]
	async fn test_externally_seeded_value_is_echoed() {
		let store = Arc::new(InMemoryMoodStore::new());
		store.insert_raw("alice", "grumpy");
		let app = test_app(store);

		let (status, body) = send(&app, Method::GET, "/alice/status").await;

		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, json!({ "id": "alice", "mood": "grumpy" }));
	}

	// ============================================================================
	// WRITE PATH
	// ============================================================================

	#[tokio::test]
	async fn test_feed_makes_happy() {
		let app = test_app(Arc::new(InMemoryMoodStore::new()));

		let (status, body) = send(&app, Method::POST, "/alice/feed").await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, json!({ "id": "alice", "mood": "happy" }));

		let (_, body) = send(&app, Method::GET, "/alice/status").await;
		assert_eq!(body, json!({ "id": "alice", "mood": "happy" }));
	}

	#[tokio::test]
	async fn test_slap_makes_sad() {
		let app = test_app(Arc::new(InMemoryMoodStore::new()));

		let (status, body) = send(&app, Method::POST, "/bob/slap").await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, json!({ "id": "bob", "mood": "sad" }));

		let (_, body) = send(&app, Method::GET, "/bob/status").await;
		assert_eq!(body, json!({ "id": "bob", "mood": "sad" }));
	}

	#[tokio::test]
	async fn test_repeated_writes_are_idempotent() {
		let app = test_app(Arc::new(InMemoryMoodStore::new()));

		for _ in 0..3 {
			let (status, _) = send(&app, Method::POST, "/alice/feed").await;
			assert_eq!(status, StatusCode::OK);
		}

		let (_, body) = send(&app, Method::GET, "/alice/status").await;
		assert_eq!(body["mood"], "happy");
	}

	#[tokio::test]
	async fn test_last_write_wins() {
		let app = test_app(Arc::new(InMemoryMoodStore::new()));

		send(&app, Method::POST, "/alice/feed").await;
		send(&app, Method::POST, "/alice/slap").await;
		let (_, body) = send(&app, Method::GET, "/alice/status").await;
		assert_eq!(body["mood"], "sad");

		send(&app, Method::POST, "/alice/feed").await;
		let (_, body) = send(&app, Method::GET, "/alice/status").await;
		assert_eq!(body["mood"], "happy");
	}

	#[tokio::test]
	async fn test_ids_do_not_interfere() {
		let app = test_app(Arc::new(InMemoryMoodStore::new()));

		send(&app, Method::POST, "/alice/feed").await;
		send(&app, Method::POST, "/bob/slap").await;

		let (_, alice) = send(&app, Method::GET, "/alice/status").await;
		let (_, bob) = send(&app, Method::GET, "/bob/status").await;
		let (_, carol) = send(&app, Method::GET, "/carol/status").await;

		assert_eq!(alice["mood"], "happy");
		assert_eq!(bob["mood"], "sad");
		assert_eq!(carol["mood"], "unknown");
	}

	#[tokio::test]
	async fn test_invalid_write_action_leaves_mood_untouched() {
		let app = test_app(Arc::new(InMemoryMoodStore::new()));
		send(&app, Method::POST, "/alice/slap").await;

		let (status, body) = send(&app, Method::POST, "/alice/poke").await;
		assert_eq!(status, StatusCode::NOT_FOUND);
		assert_eq!(body, json!({ "error": "Invalid action" }));

		let (_, body) = send(&app, Method::GET, "/alice/status").await;
		assert_eq!(body["mood"], "sad");
	}

	#[tokio::test]
	async fn test_post_status_is_not_a_write() {
		let store = Arc::new(FailingStore::default());
		let app = test_app(store.clone());

		let (status, body) = send(&app, Method::POST, "/alice/status").await;

		assert_eq!(status, StatusCode::NOT_FOUND);
		assert_eq!(body, json!({ "error": "Invalid action" }));
		assert_eq!(store.calls.load(Ordering::SeqCst), 0, "Rejected actions must not reach the store");
	}

	#[tokio::test]
	async fn test_key_prefix_namespaces_records() {
		let store = Arc::new(InMemoryMoodStore::with_prefix("mood:"));
		let app = test_app(store.clone());

		send(&app, Method::POST, "/alice/feed").await;

		assert_eq!(store.get_raw("mood:alice").as_deref(), Some("happy"));
		assert_eq!(store.get_raw("alice"), None);
	}

	// ============================================================================
	// MALFORMED PATHS
	// ============================================================================

	#[tokio::test]
	async fn test_non_utf8_id_is_rejected_as_json() {
		let store = Arc::new(FailingStore::default());
		let app = test_app(store.clone());

		for method in [Method::GET, Method::POST] {
			let request = Request::builder().method(method).uri("/%FF/status").body(Body::empty()).unwrap();
			let response = app.clone().oneshot(request).await.unwrap();

			assert_eq!(response.status(), StatusCode::BAD_REQUEST);
			assert_eq!(response.headers()[CONTENT_TYPE], "application/json");

			let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
			let body: Value = serde_json::from_slice(&bytes).unwrap();
			assert!(body["error"].as_str().unwrap().contains("Invalid UTF-8"));
		}

		assert_eq!(store.calls.load(Ordering::SeqCst), 0);
	}

	// ============================================================================
	// STORE FAILURES
	// ============================================================================

	#[tokio::test]
	async fn test_read_failure_maps_to_500() {
		let app = test_app(Arc::new(FailingStore::default()));

		let (status, body) = send(&app, Method::GET, "/alice/status").await;

		assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(body, json!({ "error": "Redis connection failed" }));
	}

	#[tokio::test]
	async fn test_write_failure_maps_to_500() {
		let store = Arc::new(FailingStore::default());
		let app = test_app(store.clone());

		let (status, body) = send(&app, Method::POST, "/alice/feed").await;

		assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(body, json!({ "error": "Redis connection failed" }));
		assert_eq!(store.calls.load(Ordering::SeqCst), 1, "Store calls are never retried");
	}

	#[tokio::test]
	async fn test_stalled_store_times_out() {
		let config = test_config(&["--task-timeout-ms", "50"]);
		let app = app(AppState::new(config, Arc::new(StalledStore)));

		let (status, body) = send(&app, Method::GET, "/alice/status").await;

		assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
		assert_eq!(body, json!({ "error": "Request timed out" }));
	}

	// ============================================================================
	// HEALTH AND METRICS
	// ============================================================================

	#[tokio::test]
	async fn test_health_ok_for_reachable_store() {
		let app = test_app(Arc::new(InMemoryMoodStore::new()));

		let (status, body) = send(&app, Method::GET, "/health").await;

		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["status"], "healthy");
	}

	#[tokio::test]
	async fn test_health_unavailable_for_failing_store() {
		let app = test_app(Arc::new(FailingStore::default()));

		let (status, body) = send(&app, Method::GET, "/health").await;

		assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
		assert_eq!(body, json!({ "error": "Redis connection failed" }));
	}

	#[tokio::test]
	async fn test_metrics_use_route_templates() {
		let app = test_app(Arc::new(InMemoryMoodStore::new()));
		send(&app, Method::POST, "/metrics-sample/feed").await;

		let request = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
		let response = app.clone().oneshot(request).await.unwrap();
		assert_eq!(response.status(), StatusCode::OK);

		let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
		let text = String::from_utf8(bytes.to_vec()).unwrap();

		assert!(text.contains("http_requests_total"));
		assert!(text.contains("route=\"/:id/:action\""));
		assert!(!text.contains("metrics-sample"));
		assert!(text.contains("mood_store_operations_total"));
	}
}
