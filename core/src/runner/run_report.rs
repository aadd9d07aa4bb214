use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::runner::RunnerKind;
use crate::work::{WorkError, WorkId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
  pub kind: RunnerKind,
  pub launched: usize,
  pub failures: Vec<WorkError>,
  pub elapsed: Duration,
}

impl RunReport {
  pub fn new(kind: RunnerKind, launched: usize, failures: Vec<WorkError>, elapsed: Duration) -> Self {
    RunReport {
      kind,
      launched,
      failures,
      elapsed,
    }
  }

  pub fn empty(kind: RunnerKind) -> Self {
    Self::new(kind, 0, Vec::new(), Duration::ZERO)
  }

  pub fn failure_count(&self) -> usize {
    self.failures.len()
  }

  pub fn succeeded(&self) -> usize {
    self.launched - self.failures.len()
  }

  /// Ids of the failed units in ascending order.
  pub fn failed_ids(&self) -> Vec<WorkId> {
    let mut ids = self.failures.iter().map(WorkError::id).collect::<Vec<_>>();
    ids.sort_unstable();
    ids
  }

  pub(crate) fn log(&self) {
    tracing::info!(
      "{} runner finished: launched={}, failed={}, elapsed={:?}",
      self.kind,
      self.launched,
      self.failure_count(),
      self.elapsed
    );
  }
}
