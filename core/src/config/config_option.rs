use std::time::Duration;

use crate::config::Config;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigOption {
  SetCount(usize),
  SetUnitDelay(Duration),
  SetFailureRate(f64),
  SetSeed(u64),
}

impl ConfigOption {
  pub fn apply(&self, config: &mut Config) {
    match self {
      ConfigOption::SetCount(count) => {
        config.count = *count;
      }
      ConfigOption::SetUnitDelay(delay) => {
        config.unit_delay = *delay;
      }
      ConfigOption::SetFailureRate(rate) => {
        config.failure_rate = *rate;
      }
      ConfigOption::SetSeed(seed) => {
        config.seed = Some(*seed);
      }
    }
  }

  pub fn with_count(count: usize) -> ConfigOption {
    ConfigOption::SetCount(count)
  }

  pub fn with_unit_delay(delay: Duration) -> ConfigOption {
    ConfigOption::SetUnitDelay(delay)
  }

  pub fn with_failure_rate(rate: f64) -> ConfigOption {
    ConfigOption::SetFailureRate(rate)
  }

  pub fn with_seed(seed: u64) -> ConfigOption {
    ConfigOption::SetSeed(seed)
  }
}
