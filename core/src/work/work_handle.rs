use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;

use crate::work::{Work, WorkError, WorkId, WorkOutcome};

#[derive(Debug, Clone)]
pub struct WorkHandle(Arc<dyn Work>);

impl WorkHandle {
  pub fn new(work: impl Work) -> Self {
    WorkHandle(Arc::new(work))
  }

  /// Runs the unit and folds a panic into [`WorkError::Panicked`], so every call yields an outcome.
  pub async fn run_caught(&self, id: WorkId) -> WorkOutcome {
    let outcome = match AssertUnwindSafe(self.0.run(id)).catch_unwind().await {
      Ok(Ok(())) => Ok(id),
      Ok(Err(err)) => Err(err),
      Err(payload) => Err(WorkError::Panicked {
        id,
        message: panic_message(payload.as_ref()),
      }),
    };
    tracing::debug!("work {} finished: {:?}", id, outcome);
    outcome
  }
}

#[async_trait]
impl Work for WorkHandle {
  async fn run(&self, id: WorkId) -> Result<(), WorkError> {
    self.0.run(id).await
  }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
  if let Some(message) = payload.downcast_ref::<&str>() {
    message.to_string()
  } else if let Some(message) = payload.downcast_ref::<String>() {
    message.clone()
  } else {
    "unknown panic payload".to_string()
  }
}
