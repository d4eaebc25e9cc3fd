use crate::Config;
use anyhow::{bail, Result};
use std::time::Duration;

/// Checks a running server's `/health` endpoint. Used by container health checks.
///
/// # Errors
/// Returns an error if the server is unreachable or reports itself unhealthy.
pub async fn perform_health_check(config: &Config) -> Result<()> {
	let url = format!("http://{}:{}/health", config.health_check_host, config.port);

	let response = reqwest::Client::new().get(&url).timeout(Duration::from_secs(10)).send().await?;

	if !response.status().is_success() {
		bail!("Health check failed: HTTP {}", response.status());
	}

	println!("Health check passed");
	Ok(())
}
