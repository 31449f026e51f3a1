//! Check command - Verifies the Redis store is reachable.

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Cache, HealthCheck};

/// Execute the check command
pub async fn execute(config: Config) -> AppResult<()> {
    let cache = Cache::connect(&config).await?;
    cache.ping().await?;

    tracing::info!("Redis store is reachable");
    Ok(())
}
