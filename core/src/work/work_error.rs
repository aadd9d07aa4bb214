use nexus_fanout_utils_rs::collections::Element;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::work::WorkId;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum WorkError {
  #[error("work {id} failed")]
  Failed { id: WorkId },
  #[error("work {id} panicked: {message}")]
  Panicked { id: WorkId, message: String },
}

impl WorkError {
  pub fn id(&self) -> WorkId {
    match self {
      WorkError::Failed { id } | WorkError::Panicked { id, .. } => *id,
    }
  }
}

impl Element for WorkError {}

static_assertions::assert_impl_all!(WorkError: Send, Sync);
