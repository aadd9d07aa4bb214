use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::work::{Work, WorkError, WorkId};

/// Sleeps for a fixed delay, then fails with probability `failure_rate`.
///
/// With a seed, whether unit `id` fails depends only on the seed and the id, never on the order
/// in which units happen to be scheduled.
#[derive(Debug, Clone, PartialEq)]
pub struct SleepWork {
  delay: Duration,
  failure_rate: f64,
  seed: Option<u64>,
}

impl SleepWork {
  /// `failure_rate` is clamped into `[0.0, 1.0]`; NaN is treated as `0.0`.
  pub fn new(delay: Duration, failure_rate: f64) -> Self {
    let failure_rate = if failure_rate.is_nan() {
      0.0
    } else {
      failure_rate.clamp(0.0, 1.0)
    };
    SleepWork {
      delay,
      failure_rate,
      seed: None,
    }
  }

  pub fn with_seed(mut self, seed: u64) -> Self {
    self.seed = Some(seed);
    self
  }

  pub fn delay(&self) -> Duration {
    self.delay
  }

  pub fn failure_rate(&self) -> f64 {
    self.failure_rate
  }

  pub fn should_fail(&self, id: WorkId) -> bool {
    match self.seed {
      Some(seed) => SmallRng::seed_from_u64(seed ^ id.0 as u64).random_bool(self.failure_rate),
      None => rand::rng().random_bool(self.failure_rate),
    }
  }
}

#[async_trait]
impl Work for SleepWork {
  async fn run(&self, id: WorkId) -> Result<(), WorkError> {
    tokio::time::sleep(self.delay).await;
    if self.should_fail(id) {
      tracing::debug!("work {} failed after {:?}", id, self.delay);
      return Err(WorkError::Failed { id });
    }
    Ok(())
  }
}
