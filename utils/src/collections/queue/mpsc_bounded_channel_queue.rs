use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc::error::{SendError, TryRecvError, TrySendError};
use tokio::sync::{mpsc, Mutex, Notify};

use crate::collections::element::Element;
use crate::collections::{
  BlockingQueueReader, BlockingQueueWriter, QueueBase, QueueError, QueueReader, QueueSize, QueueWriter,
};

#[cfg(test)]
mod tests;

/// A fixed-capacity conduit backed by a tokio mpsc channel.
///
/// Clones share the same channel, so every clone can produce while one consumer drains.
/// Closing never waits on the consumer: a pending `take` is woken and finishes the close itself.
#[derive(Debug, Clone)]
pub struct MpscBoundedChannelQueue<E> {
  sender: mpsc::Sender<E>,
  receiver: Arc<Mutex<mpsc::Receiver<E>>>,
  close_state: Arc<CloseState>,
}

#[derive(Debug, Default)]
struct CloseState {
  is_closed: AtomicBool,
  notify: Notify,
}

impl<E> MpscBoundedChannelQueue<E> {
  /// Creates a queue holding at most `capacity` elements. A zero capacity is raised to one.
  pub fn new(capacity: usize) -> Self {
    let (sender, receiver) = mpsc::channel(capacity.max(1));
    Self {
      sender,
      receiver: Arc::new(Mutex::new(receiver)),
      close_state: Arc::new(CloseState::default()),
    }
  }

  pub fn is_closed(&self) -> bool {
    self.close_state.is_closed.load(Ordering::SeqCst)
  }

  fn buffered(&self) -> usize {
    self.sender.max_capacity() - self.sender.capacity()
  }
}

#[async_trait]
impl<E: Element> QueueBase<E> for MpscBoundedChannelQueue<E> {
  async fn len(&self) -> QueueSize {
    QueueSize::Limited(self.buffered())
  }

  async fn capacity(&self) -> QueueSize {
    QueueSize::Limited(self.sender.max_capacity())
  }
}

#[async_trait]
impl<E: Element> QueueWriter<E> for MpscBoundedChannelQueue<E> {
  async fn offer(&mut self, element: E) -> Result<(), QueueError<E>> {
    if self.is_closed() {
      return Err(QueueError::OfferError(element));
    }
    match self.sender.try_send(element) {
      Ok(()) => Ok(()),
      Err(TrySendError::Full(e)) | Err(TrySendError::Closed(e)) => Err(QueueError::OfferError(e)),
    }
  }
}

#[async_trait]
impl<E: Element> BlockingQueueWriter<E> for MpscBoundedChannelQueue<E> {
  async fn put(&mut self, element: E) -> Result<(), QueueError<E>> {
    if self.is_closed() {
      return Err(QueueError::OfferError(element));
    }
    self
      .sender
      .send(element)
      .await
      .map_err(|SendError(e)| QueueError::OfferError(e))
  }
}

#[async_trait]
impl<E: Element> QueueReader<E> for MpscBoundedChannelQueue<E> {
  async fn poll(&mut self) -> Result<Option<E>, QueueError<E>> {
    // A pending `take` holds the receiver; from here the queue looks empty.
    let Ok(mut receiver) = self.receiver.try_lock() else {
      return Ok(None);
    };
    if self.is_closed() {
      receiver.close();
    }
    match receiver.try_recv() {
      Ok(element) => Ok(Some(element)),
      Err(TryRecvError::Empty) if self.is_closed() => Err(QueueError::PoolError),
      Err(TryRecvError::Empty) => Ok(None),
      Err(TryRecvError::Disconnected) => Err(QueueError::PoolError),
    }
  }

  async fn clean_up(&mut self) {
    self.close_state.is_closed.store(true, Ordering::SeqCst);
    self.close_state.notify.notify_waiters();
    if let Ok(mut receiver) = self.receiver.try_lock() {
      receiver.close();
    }
  }
}

#[async_trait]
impl<E: Element> BlockingQueueReader<E> for MpscBoundedChannelQueue<E> {
  async fn take(&mut self) -> Result<Option<E>, QueueError<E>> {
    let mut receiver = self.receiver.lock().await;
    let closed = self.close_state.notify.notified();
    tokio::pin!(closed);
    closed.as_mut().enable();
    if !self.is_closed() {
      tokio::select! {
        biased;
        element = receiver.recv() => return Ok(element),
        _ = closed => {}
      }
    }
    receiver.close();
    Ok(receiver.try_recv().ok())
  }
}
