use std::time::Duration;

use tokio::time::timeout;

use crate::collections::{
  BlockingQueueReader, BlockingQueueWriter, MpscBoundedChannelQueue, QueueBase, QueueError, QueueReader, QueueSize,
  QueueWriter,
};

#[tokio::test]
async fn test_new_queue() {
  let queue = MpscBoundedChannelQueue::<i32>::new(10);
  assert_eq!(queue.capacity().await, QueueSize::Limited(10));
  assert_eq!(queue.len().await, QueueSize::Limited(0));
  assert!(queue.is_empty().await);
}

#[tokio::test]
async fn test_zero_capacity_is_raised_to_one() {
  let mut queue = MpscBoundedChannelQueue::<i32>::new(0);
  assert_eq!(queue.capacity().await, QueueSize::Limited(1));
  assert!(queue.offer(1).await.is_ok());
  assert!(queue.is_full().await);
}

#[tokio::test]
async fn test_offer_and_poll() {
  let mut queue = MpscBoundedChannelQueue::<i32>::new(5);

  for i in 0..5 {
    assert!(queue.offer(i).await.is_ok());
  }
  assert_eq!(queue.len().await, QueueSize::Limited(5));

  for i in 0..5 {
    assert_eq!(queue.poll().await.unwrap(), Some(i));
  }
  assert_eq!(queue.len().await, QueueSize::Limited(0));
  assert!(queue.poll().await.unwrap().is_none());
}

#[tokio::test]
async fn test_offer_to_full_queue() {
  let mut queue = MpscBoundedChannelQueue::<i32>::new(2);

  assert!(queue.offer(1).await.is_ok());
  assert!(queue.offer(2).await.is_ok());

  match queue.offer(3).await {
    Err(QueueError::OfferError(3)) => (),
    other => panic!("Expected OfferError, got {:?}", other),
  }
  assert_eq!(queue.len().await, QueueSize::Limited(2));
}

#[tokio::test]
async fn test_put_waits_for_space() {
  let mut queue = MpscBoundedChannelQueue::<i32>::new(1);
  queue.put(1).await.unwrap();

  let mut producer = queue.clone();
  let pending = tokio::spawn(async move { producer.put(2).await });

  tokio::task::yield_now().await;
  assert!(!pending.is_finished());

  assert_eq!(queue.take().await.unwrap(), Some(1));
  timeout(Duration::from_secs(1), pending).await.unwrap().unwrap().unwrap();
  assert_eq!(queue.take().await.unwrap(), Some(2));
}

#[tokio::test]
async fn test_take_waits_for_an_element() {
  let mut queue = MpscBoundedChannelQueue::<String>::new(4);
  let mut producer = queue.clone();

  tokio::spawn(async move {
    tokio::time::sleep(Duration::from_millis(20)).await;
    producer.put("late".to_string()).await.unwrap();
  });

  let taken = timeout(Duration::from_secs(1), queue.take()).await.unwrap().unwrap();
  assert_eq!(taken.as_deref(), Some("late"));
}

#[tokio::test]
async fn test_clean_up_keeps_buffered_elements_drainable() {
  let mut queue = MpscBoundedChannelQueue::<i32>::new(5);
  for i in 0..3 {
    queue.offer(i).await.unwrap();
  }

  queue.clean_up().await;
  assert!(queue.is_closed());

  match queue.offer(4).await {
    Err(QueueError::OfferError(4)) => (),
    other => panic!("Expected OfferError after clean_up, got {:?}", other),
  }
  match queue.put(5).await {
    Err(QueueError::OfferError(5)) => (),
    other => panic!("Expected OfferError after clean_up, got {:?}", other),
  }

  assert_eq!(queue.take().await.unwrap(), Some(0));
  assert_eq!(queue.poll().await.unwrap(), Some(1));
  assert_eq!(queue.take().await.unwrap(), Some(2));
  assert_eq!(queue.take().await.unwrap(), None);
  assert_eq!(queue.poll().await, Err(QueueError::PoolError));
}

#[tokio::test]
async fn test_concurrent_producers() {
  let mut queue = MpscBoundedChannelQueue::<usize>::new(8);
  let mut handles = vec![];

  for i in 0..10 {
    let mut q = queue.clone();
    handles.push(tokio::spawn(async move {
      for j in 0..10 {
        q.put(i * 10 + j).await.unwrap();
      }
    }));
  }

  let mut received = Vec::with_capacity(100);
  while received.len() < 100 {
    if let Some(e) = queue.take().await.unwrap() {
      received.push(e);
    }
  }
  for handle in handles {
    handle.await.unwrap();
  }

  received.sort_unstable();
  assert_eq!(received, (0..100).collect::<Vec<_>>());
  assert_eq!(queue.len().await, QueueSize::Limited(0));
}

#[tokio::test]
async fn test_clean_up_wakes_pending_take() {
  let queue = MpscBoundedChannelQueue::<i32>::new(4);
  let mut consumer = queue.clone();
  let pending = tokio::spawn(async move { consumer.take().await });

  tokio::task::yield_now().await;
  assert!(!pending.is_finished());

  let mut closer = queue.clone();
  timeout(Duration::from_millis(500), closer.clean_up())
    .await
    .expect("clean_up should not wait on a pending take");

  let taken = timeout(Duration::from_millis(500), pending).await.unwrap().unwrap();
  assert_eq!(taken, Ok(None));
  assert!(queue.is_closed());
}

#[tokio::test]
async fn test_poll_does_not_block_behind_pending_take() {
  let queue = MpscBoundedChannelQueue::<i32>::new(4);
  let mut consumer = queue.clone();
  let pending = tokio::spawn(async move { consumer.take().await });
  tokio::task::yield_now().await;

  let mut other = queue.clone();
  let polled = timeout(Duration::from_millis(500), other.poll())
    .await
    .expect("poll should not wait on a pending take");
  assert_eq!(polled, Ok(None));

  other.offer(9).await.unwrap();
  assert_eq!(timeout(Duration::from_millis(500), pending).await.unwrap().unwrap(), Ok(Some(9)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_clean_up_races_take() {
  for _ in 0..500 {
    let queue = MpscBoundedChannelQueue::<i32>::new(2);
    let mut consumer = queue.clone();
    let pending = tokio::spawn(async move { consumer.take().await });
    let mut closer = queue.clone();
    tokio::spawn(async move { closer.clean_up().await });

    let taken = timeout(Duration::from_secs(1), pending).await.unwrap().unwrap();
    assert_eq!(taken, Ok(None));
  }
}
