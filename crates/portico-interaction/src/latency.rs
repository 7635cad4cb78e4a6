//! Simulated backend latency.

use std::time::Duration;

use rand::Rng;

/// How long a simulated round-trip should take.
///
/// Tests use [`LatencyProfile::Off`]; interactive use gets the bounded random
/// delays the real backends would impose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyProfile {
    /// No delay at all.
    Off,
    /// A fixed delay.
    Fixed(Duration),
    /// A uniformly random delay between `min` and `max` milliseconds.
    UniformMs { min: u64, max: u64 },
}

impl LatencyProfile {
    /// Suspends the caller for the configured delay.
    pub async fn wait(&self) {
        match self {
            Self::Off => {}
            Self::Fixed(duration) => tokio::time::sleep(*duration).await,
            Self::UniformMs { min, max } => {
                let ms = rand::thread_rng().gen_range(*min..=*max);
                tokio::time::sleep(Duration::from_millis(ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_off_does_not_sleep() {
        let start = Instant::now();
        LatencyProfile::Off.wait().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_fixed_sleeps_at_least_the_duration() {
        let start = Instant::now();
        LatencyProfile::Fixed(Duration::from_millis(20)).wait().await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
