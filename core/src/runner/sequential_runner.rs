use async_trait::async_trait;
use tokio::time::Instant;

use crate::runner::{RunReport, Runner, RunnerError, RunnerKind};
use crate::work::{WorkHandle, WorkId};

/// Runs every unit in turn on the calling task. Total time grows linearly with the count.
#[derive(Debug, Clone, Default)]
pub struct SequentialRunner;

impl SequentialRunner {
  pub fn new() -> Self {
    SequentialRunner
  }
}

#[async_trait]
impl Runner for SequentialRunner {
  fn kind(&self) -> RunnerKind {
    RunnerKind::Sequential
  }

  async fn run(&self, work: WorkHandle, count: usize) -> Result<RunReport, RunnerError> {
    let start = Instant::now();
    let mut failures = Vec::new();
    for i in 0..count {
      let id = WorkId(i);
      tracing::debug!("work {} started", id);
      if let Err(err) = work.run_caught(id).await {
        tracing::warn!("{}", err);
        failures.push(err);
      }
    }
    let report = RunReport::new(self.kind(), count, failures, start.elapsed());
    report.log();
    Ok(report)
  }
}
