use std::time::Duration as StdDuration;

use chrono::Duration;

/// The configuration of the Synth data layer.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// How many days after publishing a snippet becomes downloadable
    pub downloadable_delay_in_days: i64,
    /// How many snippets a recommendation query returns at most
    pub recommendation_limit: usize,
    /// How many seconds the scheduler waits between sweeps
    pub sweep_interval_in_seconds: u64,
}

impl StoreConfig {
    /// The delay between a snippet going public and becoming downloadable
    pub fn downloadable_delay(&self) -> Duration {
        Duration::days(self.downloadable_delay_in_days)
    }

    /// How long the scheduler sleeps between sweeps
    pub fn sweep_interval(&self) -> StdDuration {
        StdDuration::from_secs(self.sweep_interval_in_seconds)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            // Grace period between a snippet going public and the file
            // being served to buyers
            downloadable_delay_in_days: 3,
            // Enough to fill the marketplace front page
            recommendation_limit: 10,
            // At demo scale a flip landing a minute late is not noticeable
            sweep_interval_in_seconds: 60,
        }
    }
}
