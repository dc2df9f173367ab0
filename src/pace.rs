// Delay policies applied before each call to the remote service.

use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Decides how long to wait before the next remote request.
pub trait Pacer {
    fn next_delay(&mut self) -> Duration;

    /// Block the current thread for [`Pacer::next_delay`].
    fn pause(&mut self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            debug!("Sleeping {} ms", delay.as_millis());
            thread::sleep(delay);
        }
    }
}

/// Never waits.
#[derive(Debug, Default)]
pub struct NoDelay;

impl Pacer for NoDelay {
    fn next_delay(&mut self) -> Duration {
        Duration::ZERO
    }
}

/// Always waits the same amount.
#[derive(Debug)]
pub struct FixedDelay(pub Duration);

impl Pacer for FixedDelay {
    fn next_delay(&mut self) -> Duration {
        self.0
    }
}

/// Waits a uniformly random duration within `min..=max`.
#[derive(Debug)]
pub struct JitteredDelay {
    min: Duration,
    max: Duration,
    rng: StdRng,
}

impl JitteredDelay {
    /// Callers must ensure `min <= max`.
    pub fn new(min: Duration, max: Duration) -> Self {
        Self::with_rng(min, max, StdRng::from_os_rng())
    }

    pub fn with_rng(min: Duration, max: Duration, rng: StdRng) -> Self {
        Self { min, max, rng }
    }
}

impl Pacer for JitteredDelay {
    fn next_delay(&mut self) -> Duration {
        let min = self.min.as_millis() as u64;
        let max = self.max.as_millis() as u64;
        Duration::from_millis(self.rng.random_range(min..=max))
    }
}

/// Pick the simplest policy that covers the `min..=max` window.
pub fn pacer_for(min: Duration, max: Duration) -> Box<dyn Pacer> {
    if max.is_zero() {
        Box::new(NoDelay)
    } else if min >= max {
        Box::new(FixedDelay(max))
    } else {
        Box::new(JitteredDelay::new(min, max))
    }
}
