use async_trait::async_trait;
use nexus_fanout_utils_rs::concurrent::WaitGroup;
use tokio::time::Instant;

use crate::runner::{FailureLog, RunReport, Runner, RunnerError, RunnerKind};
use crate::work::{WorkHandle, WorkId};

/// [`WaitGroupRunner`](crate::runner::WaitGroupRunner) with launch and count folded into
/// [`WaitGroup::go`].
#[derive(Debug, Clone, Default)]
pub struct WaitGroupGoRunner;

impl WaitGroupGoRunner {
  pub fn new() -> Self {
    WaitGroupGoRunner
  }
}

#[async_trait]
impl Runner for WaitGroupGoRunner {
  fn kind(&self) -> RunnerKind {
    RunnerKind::WaitGroupGo
  }

  async fn run(&self, work: WorkHandle, count: usize) -> Result<RunReport, RunnerError> {
    let start = Instant::now();
    let wg = WaitGroup::new();
    let failures = FailureLog::default();

    for i in 0..count {
      let id = WorkId(i);
      let work = work.clone();
      let failures = failures.clone();
      tracing::debug!("work {} started", id);
      wg.go(async move {
        failures.record(work.run_caught(id).await).await;
      });
    }

    wg.wait().await;
    let report = RunReport::new(self.kind(), count, failures.take().await, start.elapsed());
    report.log();
    Ok(report)
  }
}
