use super::error::ComputationError;
use super::sample::Observation;
use crate::geometry::great_circle_distance;

/// Signed seconds from `prior` to `current`, millisecond resolution.
pub fn elapsed_seconds(prior: &impl Observation, current: &impl Observation) -> f64 {
    (current.timestamp() - prior.timestamp()).num_milliseconds() as f64 / 1000.0
}

/// Ground-track speed in m/s between two observations.
///
/// Identical timestamps are an error. A `current` that predates `prior`
/// yields a negative speed, which is returned as is.
pub fn compute(
    prior: &impl Observation,
    current: &impl Observation,
) -> Result<f64, ComputationError> {
    let elapsed_s = elapsed_seconds(prior, current);
    if elapsed_s == 0.0 {
        return Err(ComputationError::ZeroElapsed {
            at: current.timestamp(),
        });
    }
    if elapsed_s < 0.0 {
        log::warn!(
            "Sample at {} predates the previous one at {}, speed will be negative",
            current.timestamp(),
            prior.timestamp()
        );
    }

    let distance_m = great_circle_distance(prior.position(), current.position());
    let speed = distance_m / elapsed_s;
    if !speed.is_finite() {
        return Err(ComputationError::NonFinite {
            distance_m,
            elapsed_s,
        });
    }

    Ok(speed)
}
