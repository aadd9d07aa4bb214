use async_trait::async_trait;
use nexus_fanout_utils_rs::collections::{BlockingQueueReader, BlockingQueueWriter, MpscBoundedChannelQueue};
use tokio::time::Instant;

use crate::runner::{RunReport, Runner, RunnerError, RunnerKind};
use crate::work::{WorkHandle, WorkId, WorkOutcome};

/// Spawns every unit and gathers their outcomes over a conduit sized to the run.
///
/// Receiving exactly `count` outcomes doubles as the completion barrier. Because the conduit holds
/// every outcome, no unit ever waits on the collector.
#[derive(Debug, Clone, Default)]
pub struct CollectingRunner;

impl CollectingRunner {
  pub fn new() -> Self {
    CollectingRunner
  }
}

#[async_trait]
impl Runner for CollectingRunner {
  fn kind(&self) -> RunnerKind {
    RunnerKind::Collecting
  }

  async fn run(&self, work: WorkHandle, count: usize) -> Result<RunReport, RunnerError> {
    if count == 0 {
      return Ok(RunReport::empty(self.kind()));
    }

    let start = Instant::now();
    let mut conduit = MpscBoundedChannelQueue::<WorkOutcome>::new(count);

    for i in 0..count {
      let id = WorkId(i);
      let work = work.clone();
      let mut conduit = conduit.clone();
      tracing::debug!("work {} started", id);
      tokio::spawn(async move {
        let outcome = work.run_caught(id).await;
        if let Err(err) = conduit.put(outcome).await {
          tracing::error!("work {} could not deliver its outcome: {}", id, err);
        }
      });
    }

    let mut failures = Vec::new();
    for _ in 0..count {
      // This runner holds a sender and never closes its conduit, so `take` always yields an outcome.
      let Ok(Some(outcome)) = conduit.take().await else {
        break;
      };
      if let Err(err) = outcome {
        tracing::warn!("{}", err);
        failures.push(err);
      }
    }

    let report = RunReport::new(self.kind(), count, failures, start.elapsed());
    report.log();
    Ok(report)
  }
}
