use async_trait::async_trait;
use nexus_fanout_utils_rs::concurrent::WaitGroup;
use tokio::time::Instant;

use crate::runner::{FailureLog, RunReport, Runner, RunnerError, RunnerKind};
use crate::work::{WorkHandle, WorkId};

/// Spawns every unit at once and blocks on a [`WaitGroup`].
///
/// The counter is incremented on the caller's side before each spawn and decremented by the unit
/// itself once it completes.
#[derive(Debug, Clone, Default)]
pub struct WaitGroupRunner;

impl WaitGroupRunner {
  pub fn new() -> Self {
    WaitGroupRunner
  }
}

#[async_trait]
impl Runner for WaitGroupRunner {
  fn kind(&self) -> RunnerKind {
    RunnerKind::WaitGroup
  }

  async fn run(&self, work: WorkHandle, count: usize) -> Result<RunReport, RunnerError> {
    let start = Instant::now();
    let wg = WaitGroup::new();
    let failures = FailureLog::default();

    for i in 0..count {
      let id = WorkId(i);
      wg.add(1);
      let wg = wg.clone();
      let work = work.clone();
      let failures = failures.clone();
      tokio::spawn(async move {
        let _done = wg.guard();
        tracing::debug!("work {} started", id);
        failures.record(work.run_caught(id).await).await;
      });
    }

    wg.wait().await;
    let report = RunReport::new(self.kind(), count, failures.take().await, start.elapsed());
    report.log();
    Ok(report)
  }
}
