mod collecting_runner;
mod run_report;
mod runner_error;
mod sequential_runner;
mod wait_group_go_runner;
mod wait_group_runner;


pub use self::{
  collecting_runner::*, run_report::*, runner_error::*, sequential_runner::*, wait_group_go_runner::*,
  wait_group_runner::*,
};

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::work::{WorkError, WorkHandle, WorkOutcome};

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RunnerKind {
  /// One unit after another.
  Sequential,
  /// `add` before each spawn, `done` on each completion, then `wait`.
  WaitGroup,
  /// Same barrier, launched through `WaitGroup::go`.
  WaitGroupGo,
  /// Outcomes travel over a bounded conduit; draining it is the barrier.
  Collecting,
}

/// Runs `count` units of the given work and reports how long it took and which units failed.
#[async_trait]
pub trait Runner: Debug + Send + Sync {
  fn kind(&self) -> RunnerKind;

  async fn run(&self, work: WorkHandle, count: usize) -> Result<RunReport, RunnerError>;
}

pub fn runner_for(kind: RunnerKind) -> Box<dyn Runner> {
  match kind {
    RunnerKind::Sequential => Box::new(SequentialRunner::new()),
    RunnerKind::WaitGroup => Box::new(WaitGroupRunner::new()),
    RunnerKind::WaitGroupGo => Box::new(WaitGroupGoRunner::new()),
    RunnerKind::Collecting => Box::new(CollectingRunner::new()),
  }
}

/// Validates `config` and runs its work once with the runner of the given kind.
pub async fn run_with(kind: RunnerKind, config: &Config) -> Result<RunReport, RunnerError> {
  config.validate()?;
  let work = WorkHandle::new(config.work());
  runner_for(kind).run(work, config.count).await
}

/// Runs the configured work with every runner in declaration order.
pub async fn run_all(config: &Config) -> Result<Vec<RunReport>, RunnerError> {
  let mut reports = Vec::new();
  for kind in RunnerKind::iter() {
    reports.push(run_with(kind, config).await?);
  }
  Ok(reports)
}

/// Failures shared between concurrently running units.
#[derive(Debug, Clone, Default)]
pub(crate) struct FailureLog {
  failures: Arc<Mutex<Vec<WorkError>>>,
}

impl FailureLog {
  pub(crate) async fn record(&self, outcome: WorkOutcome) {
    if let Err(err) = outcome {
      tracing::warn!("{}", err);
      self.failures.lock().await.push(err);
    }
  }

  pub(crate) async fn take(&self) -> Vec<WorkError> {
    std::mem::take(&mut *self.failures.lock().await)
  }
}
