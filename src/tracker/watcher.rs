use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{interval, MissedTickBehavior};

use super::error::RunError;
use super::pipeline::run_serialized;
use crate::config::Config;
use crate::position::{OpenNotifyClient, PositionSource};
use crate::store::{SampleStore, SqliteStore};

/// Runs the pipeline every `period` until Ctrl-C.
pub async fn watch(config: &Config, period: Duration) -> Result<u64, RunError> {
    let store = SqliteStore::connect(&config.store.uri).map_err(RunError::Connection)?;
    let source = OpenNotifyClient::new(&config.position)?;
    let store = Mutex::new(store);

    log::info!(
        "Watching {} every {}",
        source.url(),
        humantime::format_duration(period)
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };
    let recorded = watch_until(&store, &source, period, shutdown).await;

    let store = store.into_inner();
    match store.count() {
        Ok(total) => log::info!("Sample store now holds {} samples", total),
        Err(e) => log::warn!("Failed to count stored samples: {}", e),
    }
    if let Err(e) = store.close() {
        log::warn!("Failed to close sample store cleanly: {}", e);
    }
    Ok(recorded)
}

/// Runs the pipeline every `period` until `shutdown` resolves. A failed run
/// is logged and the next tick proceeds. Returns the number of samples recorded.
pub async fn watch_until<S, P, F>(store: &Mutex<S>, source: &P, period: Duration, shutdown: F) -> u64
where
    S: SampleStore,
    P: PositionSource,
    F: Future<Output = ()>,
{
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    let mut recorded = 0;
    loop {
        let should_stop = tokio::select! {
            _ = ticker.tick() => false,
            _ = &mut shutdown => true,
        };
        if should_stop {
            log::info!("Stopping after {} recorded samples", recorded);
            return recorded;
        }

        match run_serialized(store, source).await {
            Ok(_) => recorded += 1,
            Err(e) => log::error!("Tracking run failed: {}", e),
        }
    }
}
