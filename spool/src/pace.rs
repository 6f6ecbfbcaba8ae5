use std::time::Duration;

/// Decides how long a role idles between two steps.
pub trait Pace: Send + Sync {
    fn pause(&self);
}

/// Returns immediately.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDelay;

impl Pace for NoDelay {
    fn pause(&self) {}
}

/// Sleeps for the same duration every time.
#[derive(Clone, Copy, Debug)]
pub struct Fixed(pub Duration);

impl Pace for Fixed {
    fn pause(&self) {
        if !self.0.is_zero() {
            std::thread::sleep(self.0);
        }
    }
}

/// Sleeps for a uniformly random number of milliseconds in `min..=max`.
#[derive(Clone, Copy, Debug)]
pub struct Jitter {
    min_ms: u64,
    max_ms: u64,
}

impl Jitter {
    pub fn new(min: Duration, max: Duration) -> Self {
        let (min_ms, max_ms) = (min.as_millis() as u64, max.as_millis() as u64);
        assert!(min_ms <= max_ms, "invalid jitter range");
        Self { min_ms, max_ms }
    }

    pub fn next_delay(&self) -> Duration {
        Duration::from_millis(fastrand::u64(self.min_ms..=self.max_ms))
    }
}

impl Pace for Jitter {
    fn pause(&self) {
        let delay = self.next_delay();
        tracing::trace!("pausing, delay={}ms", delay.as_millis());
        std::thread::sleep(delay);
    }
}

impl<F> Pace for F
where
    F: Fn() + Send + Sync,
{
    fn pause(&self) {
        self()
    }
}
