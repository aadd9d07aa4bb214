use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;
use tokio::task::JoinHandle;


/// A counting barrier modeled after Go's `sync.WaitGroup`.
///
/// Callers `add` before launching work, each unit calls `done` when it finishes, and
/// `wait` suspends until the counter drops back to zero. Clones share the same counter.
#[derive(Debug, Clone)]
pub struct WaitGroup {
  inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
  count: AtomicUsize,
  notify: Notify,
}

impl Default for WaitGroup {
  fn default() -> Self {
    Self::new()
  }
}

impl WaitGroup {
  pub fn new() -> Self {
    Self::with_count(0)
  }

  pub fn with_count(count: usize) -> Self {
    WaitGroup {
      inner: Arc::new(Inner {
        count: AtomicUsize::new(count),
        notify: Notify::new(),
      }),
    }
  }

  pub fn add(&self, n: usize) {
    self.inner.count.fetch_add(n, Ordering::SeqCst);
  }

  /// Decrements the counter, releasing every waiter when it reaches zero.
  ///
  /// # Panics
  /// Panics if called more times than the counter was incremented.
  pub fn done(&self) {
    let prev = self
      .inner
      .count
      .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| count.checked_sub(1))
      .unwrap_or_else(|_| panic!("WaitGroup::done called more times than add"));
    tracing::debug!("done: count={}", prev - 1);
    if prev == 1 {
      self.inner.notify.notify_waiters();
    }
  }

  pub fn count(&self) -> usize {
    self.inner.count.load(Ordering::SeqCst)
  }

  pub async fn wait(&self) {
    loop {
      let notified = self.inner.notify.notified();
      tokio::pin!(notified);
      // Register interest before reading the counter so a concurrent `done` cannot slip in between.
      notified.as_mut().enable();
      if self.count() == 0 {
        return;
      }
      notified.await;
    }
  }

  /// Returns a guard that calls [`WaitGroup::done`] when dropped.
  ///
  /// The counter is not incremented; pair it with a preceding [`WaitGroup::add`].
  pub fn guard(&self) -> WaitGroupGuard {
    WaitGroupGuard { wait_group: self.clone() }
  }

  /// Increments the counter, spawns `future` onto the current runtime and decrements
  /// the counter once the future completes or panics.
  pub fn go<F>(&self, future: F) -> JoinHandle<F::Output>
  where
    F: Future + Send + 'static,
    F::Output: Send + 'static, {
    self.add(1);
    let guard = self.guard();
    tokio::spawn(async move {
      let _guard = guard;
      future.await
    })
  }
}

#[derive(Debug)]
pub struct WaitGroupGuard {
  wait_group: WaitGroup,
}

impl Drop for WaitGroupGuard {
  fn drop(&mut self) {
    self.wait_group.done();
  }
}
