use std::time::Duration;

use async_trait::async_trait;
use rstest::rstest;
use tokio::time::Instant;

use crate::work::{SleepWork, Work, WorkError, WorkHandle, WorkId};

#[derive(Debug)]
struct PanickingWork;

#[async_trait]
impl Work for PanickingWork {
  async fn run(&self, id: WorkId) -> Result<(), WorkError> {
    panic!("unit {} exploded", id.0);
  }
}

#[tokio::test(start_paused = true)]
async fn test_sleep_work_sleeps_for_delay() {
  let work = SleepWork::new(Duration::from_millis(250), 0.0);
  let start = Instant::now();
  assert!(work.run(WorkId(0)).await.is_ok());
  assert_eq!(start.elapsed(), work.delay());
}

#[tokio::test(start_paused = true)]
async fn test_sleep_work_always_fails_at_rate_one() {
  let work = SleepWork::new(Duration::from_millis(1), 1.0);
  assert_eq!(
    work.run(WorkId(3)).await,
    Err(WorkError::Failed { id: WorkId(3) })
  );
}

#[rstest]
#[case(-1.0, 0.0)]
#[case(0.3, 0.3)]
#[case(7.0, 1.0)]
#[case(f64::NAN, 0.0)]
fn test_failure_rate_is_clamped(#[case] rate: f64, #[case] expected: f64) {
  assert_eq!(SleepWork::new(Duration::ZERO, rate).failure_rate(), expected);
}

#[test]
fn test_seeded_decisions_are_reproducible() {
  let a = SleepWork::new(Duration::ZERO, 0.5).with_seed(99);
  let b = SleepWork::new(Duration::ZERO, 0.5).with_seed(99);
  let decisions_a = (0..64).map(|i| a.should_fail(WorkId(i))).collect::<Vec<_>>();
  let decisions_b = (0..64).rev().map(|i| b.should_fail(WorkId(i))).rev().collect::<Vec<_>>();
  assert_eq!(decisions_a, decisions_b);
  assert!(decisions_a.iter().any(|failed| *failed));
  assert!(decisions_a.iter().any(|failed| !*failed));
}

#[test]
fn test_seeded_failure_count_follows_rate() {
  let work = SleepWork::new(Duration::ZERO, 0.1).with_seed(2024);
  let failures = (0..2000).filter(|i| work.should_fail(WorkId(*i))).count();
  assert!((100..=300).contains(&failures), "failures = {}", failures);
}

#[tokio::test]
async fn test_run_caught_reports_success_and_failure() {
  let ok = WorkHandle::new(SleepWork::new(Duration::ZERO, 0.0));
  assert_eq!(ok.run_caught(WorkId(1)).await, Ok(WorkId(1)));

  let failing = WorkHandle::new(SleepWork::new(Duration::ZERO, 1.0));
  assert_eq!(
    failing.run_caught(WorkId(2)).await,
    Err(WorkError::Failed { id: WorkId(2) })
  );
}

#[tokio::test]
async fn test_run_caught_converts_panic() {
  let handle = WorkHandle::new(PanickingWork);
  match handle.run_caught(WorkId(5)).await {
    Err(WorkError::Panicked { id, message }) => {
      assert_eq!(id, WorkId(5));
      assert_eq!(message, "unit 5 exploded");
    }
    other => panic!("expected Panicked, got {:?}", other),
  }
}

#[test]
fn test_work_error_display() {
  let err = WorkError::Failed { id: WorkId(4) };
  assert_eq!(err.to_string(), "work #4 failed");
  assert_eq!(err.id(), WorkId(4));
}
