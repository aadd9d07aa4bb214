use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RunnerError {
  #[error("invalid configuration: {0}")]
  InvalidConfig(#[from] ConfigError),
}

static_assertions::assert_impl_all!(RunnerError: Send, Sync);
