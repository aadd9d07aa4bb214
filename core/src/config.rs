mod config_option;


pub use self::config_option::*;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::work::SleepWork;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
  #[error("failure rate must be within [0.0, 1.0], got {0}")]
  InvalidFailureRate(f64),
}

static_assertions::assert_impl_all!(ConfigError: Send, Sync);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
  pub count: usize,
  pub unit_delay: Duration,
  pub failure_rate: f64,
  pub seed: Option<u64>,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      count: 10,
      unit_delay: Duration::from_millis(100),
      failure_rate: 0.1,
      seed: None,
    }
  }
}

impl Config {
  pub fn from(options: impl IntoIterator<Item = ConfigOption>) -> Config {
    let mut config = Config::default();
    for option in options {
      option.apply(&mut config);
    }
    config
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&self.failure_rate) {
      return Err(ConfigError::InvalidFailureRate(self.failure_rate));
    }
    Ok(())
  }

  /// Builds the unit of work described by this configuration.
  pub fn work(&self) -> SleepWork {
    let work = SleepWork::new(self.unit_delay, self.failure_rate);
    match self.seed {
      Some(seed) => work.with_seed(seed),
      None => work,
    }
  }
}
