//! Periodic pruning of the processed-delivery log.

use ids_db::DeliveryRepository;

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::task::JoinHandle;

pub const CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Spawn the cleanup loop. The first pass runs immediately.
pub fn spawn_delivery_cleanup(
    deliveries: Arc<DeliveryRepository>,
    max_age_secs: i64,
    interval: Duration,
) -> JoinHandle<()> {
    info!(
        "Delivery cleanup enabled: retention={}s, interval={}s",
        max_age_secs,
        interval.as_secs()
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            cleanup_deliveries(&deliveries, max_age_secs).await;
        }
    })
}

/// One cleanup pass; returns how many records were removed
pub async fn cleanup_deliveries(deliveries: &DeliveryRepository, max_age_secs: i64) -> u64 {
    match deliveries.cleanup_old_entries(max_age_secs).await {
        Ok(0) => {
            debug!("Delivery cleanup: nothing to remove");
            0
        }
        Ok(removed) => {
            info!("Delivery cleanup removed {} records", removed);
            removed
        }
        Err(e) => {
            warn!("Delivery cleanup failed: {}", e);
            0
        }
    }
}
