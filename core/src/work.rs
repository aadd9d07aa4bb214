mod sleep_work;
mod work_error;
mod work_handle;

#[cfg(test)]
mod tests;

pub use self::{sleep_work::*, work_error::*, work_handle::*};

use std::fmt::{Debug, Display, Formatter};

use async_trait::async_trait;
use nexus_fanout_utils_rs::collections::Element;
use serde::{Deserialize, Serialize};

/// Index of a unit of work within a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkId(pub usize);

impl Display for WorkId {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "#{}", self.0)
  }
}

impl Element for WorkId {}

/// What a single unit of work reports back to its runner.
pub type WorkOutcome = Result<WorkId, WorkError>;

/// One independent unit of work. A runner calls [`Work::run`] once per id.
#[async_trait]
pub trait Work: Debug + Send + Sync + 'static {
  async fn run(&self, id: WorkId) -> Result<(), WorkError>;
}
