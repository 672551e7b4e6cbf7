use std::time::Duration;

/// Fixed pause between consecutive upstream requests of a stage
///
/// The crawl is sequential, so a plain sleep between items is the whole
/// rate limit. The pacer counts its pauses so callers can check where
/// they were applied.
#[derive(Debug, Clone)]
pub struct Pacer {
    interval: Duration,
    pauses: u32,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pauses: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of pauses taken so far
    pub fn pauses(&self) -> u32 {
        self.pauses
    }

    /// Suspends the crawl for one interval
    pub async fn pause(&mut self) {
        if !self.interval.is_zero() {
            tokio::time::sleep(self.interval).await;
        }
        self.pauses += 1;
    }
}
