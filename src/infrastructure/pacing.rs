//! Minimum-duration pacing for loading phases.
//!
//! Every loading phase of the jar (the crumple and throw animations, the
//! transformation, and the random reveal) is held on screen for a fixed amount
//! of time. [`at_least`] is the single join primitive behind that: it runs an
//! operation and a floor timer side by side and resolves only once both have
//! finished, so a fast operation never flashes past and a slow one is never cut
//! short.

use std::future::Future;
use std::time::Duration;

/// Default duration of the crumple animation.
pub const DEFAULT_CRUMPLE: Duration = Duration::from_millis(1500);

/// Default duration of the throw animation.
pub const DEFAULT_THROW: Duration = Duration::from_millis(1000);

/// Default minimum duration of the transforming phase.
pub const DEFAULT_TRANSFORM_FLOOR: Duration = Duration::from_millis(2600);

/// Durations of the timed phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// How long PROCESSING_CRUMPLE lasts before the throw starts.
    pub crumple: Duration,
    /// How long PROCESSING_THROW lasts before the review prompt.
    pub throw: Duration,
    /// Minimum time TRANSFORMING stays visible.
    pub transform_floor: Duration,
}

impl Pacing {
    /// Builds pacing from millisecond values, as found in configuration files.
    #[must_use]
    pub const fn from_millis(crumple: u64, throw: u64, transform_floor: u64) -> Self {
        Self {
            crumple: Duration::from_millis(crumple),
            throw: Duration::from_millis(throw),
            transform_floor: Duration::from_millis(transform_floor),
        }
    }

    /// Pacing with every delay set to zero.
    #[must_use]
    pub const fn instant() -> Self {
        Self::from_millis(0, 0, 0)
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            crumple: DEFAULT_CRUMPLE,
            throw: DEFAULT_THROW,
            transform_floor: DEFAULT_TRANSFORM_FLOOR,
        }
    }
}

/// Runs `future` and a `floor` timer concurrently and waits for both.
///
/// Returns the future's output no earlier than `floor` after the call. There
/// is no cancellation: the output is always awaited, however long it takes.
///
/// # Examples
///
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// use emotion_jar::infrastructure::at_least;
/// use std::time::Duration;
///
/// let value = at_least(async { 7 }, Duration::from_millis(1)).await;
/// assert_eq!(value, 7);
/// # }
/// ```
pub async fn at_least<F>(future: F, floor: Duration) -> F::Output
where
    F: Future,
{
    let (output, ()) = futures_util::future::join(future, tokio::time::sleep(floor)).await;
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn instant_operation_waits_for_floor() {
        let started = Instant::now();
        let value = at_least(async { "done" }, Duration::from_millis(2600)).await;
        assert_eq!(value, "done");
        assert!(started.elapsed() >= Duration::from_millis(2600));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_operation_is_not_cut_short() {
        let started = Instant::now();
        let value = at_least(
            async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                42
            },
            Duration::from_millis(2600),
        )
        .await;
        assert_eq!(value, 42);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(10));
        assert!(elapsed < Duration::from_secs(11));
    }

    #[test]
    fn default_pacing_matches_animation_lengths() {
        let pacing = Pacing::default();
        assert_eq!(pacing.crumple, Duration::from_millis(1500));
        assert_eq!(pacing.throw, Duration::from_millis(1000));
        assert_eq!(pacing.transform_floor, Duration::from_millis(2600));
    }
}
