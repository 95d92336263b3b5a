//! Periodic removal of expired allow-list entries.
//!
//! Expired entries are already refused at lookup time; the sweep only keeps
//! the table from growing without bound.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use linkvault_auth::Clock;
use linkvault_core::AppError;
use linkvault_db::RefreshTokenStore;

use crate::metrics::track_tokens_pruned;

pub async fn prune_once(
    store: &dyn RefreshTokenStore,
    clock: &dyn Clock,
) -> Result<u64, AppError> {
    let pruned = store.prune_expired(clock.now()).await?;
    track_tokens_pruned(pruned);

    if pruned > 0 {
        info!(pruned, "Pruned expired refresh tokens");
    } else {
        debug!("No expired refresh tokens to prune");
    }

    Ok(pruned)
}

/// Runs [`prune_once`] every `period`, starting immediately. Failures are
/// logged and the loop keeps going.
pub fn spawn_prune_task(
    store: Arc<dyn RefreshTokenStore>,
    clock: Arc<dyn Clock>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if let Err(e) = prune_once(store.as_ref(), clock.as_ref()).await {
                error!(error = %e.error, "Refresh token prune failed");
            }
        }
    })
}
