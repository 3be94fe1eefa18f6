use tokio::sync::Mutex;

use super::error::RunError;
use super::sample::Sample;
use super::speed;
use crate::config::Config;
use crate::position::{OpenNotifyClient, PositionFix, PositionSource};
use crate::store::{SampleStore, SqliteStore};

/// One complete run against the configured store and position service.
pub async fn run(config: &Config) -> Result<Sample, RunError> {
    let mut store = SqliteStore::connect(&config.store.uri).map_err(RunError::Connection)?;
    let source = OpenNotifyClient::new(&config.position)?;

    let sample = run_once(&mut store, &source).await?;

    if let Err(e) = store.close() {
        log::warn!("Failed to close sample store cleanly: {}", e);
    }
    Ok(sample)
}

/// Fetch, read the latest sample, compute, append. Nothing is written
/// unless every earlier step succeeded.
pub async fn run_once<S, P>(store: &mut S, source: &P) -> Result<Sample, RunError>
where
    S: SampleStore,
    P: PositionSource,
{
    let fix = source.fetch().await?;
    record(store, &fix)
}

/// Reads the latest sample, computes the speed of `fix` against it and
/// appends the result.
pub fn record<S: SampleStore>(store: &mut S, fix: &PositionFix) -> Result<Sample, RunError> {
    let speed_m_s = match store.latest()? {
        Some(prior) => speed::compute(&prior, fix)?,
        None => {
            log::info!("No previous sample, recording first position");
            0.0
        }
    };

    let sample = store.append(fix.position, fix.timestamp, speed_m_s)?;
    log::info!(
        "Recorded sample at {} ({:.4}, {:.4}) speed {:.1} m/s",
        sample.timestamp,
        sample.position.latitude_deg,
        sample.position.longitude_deg,
        sample.speed_m_s
    );
    Ok(sample)
}

/// Fetches without holding the store, then records under an exclusive lock
/// so runs sharing the store within this process never read the same prior
/// sample.
pub async fn run_serialized<S, P>(store: &Mutex<S>, source: &P) -> Result<Sample, RunError>
where
    S: SampleStore,
    P: PositionSource,
{
    let fix = source.fetch().await?;
    let mut guard = store.lock().await;
    record(&mut *guard, &fix)
}
