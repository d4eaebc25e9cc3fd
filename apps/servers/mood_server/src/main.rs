use anyhow::Result;
use clap::Parser;
use mood_server::{app, init_tracing, perform_health_check, AppState, Config};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
	dotenv::dotenv().ok();
	let config = Config::parse();

	// Handle health check flag
	if config.health_check {
		return perform_health_check(&config).await;
	}

	let _ = init_tracing(&config);

	let config = Arc::new(config);
	let shutdown_token = CancellationToken::new();

	let app_state = AppState::build(config.clone())?;
	let router = app(app_state);

	let listener = TcpListener::bind(config.bind_addr()).await?;
	tracing::info!("listening on {}", listener.local_addr()?);

	let signal_shutdown_token = shutdown_token.clone();
	tokio::spawn(async move {
		tokio::signal::ctrl_c().await.ok();
		tracing::info!("Received Ctrl+C, initiating shutdown...");
		signal_shutdown_token.cancel();
	});

	let server_token = shutdown_token.clone();
	axum::serve(listener, router)
		.with_graceful_shutdown(async move {
			server_token.cancelled().await;
		})
		.await?;
	tracing::info!("Server stopped");

	Ok(())
}
