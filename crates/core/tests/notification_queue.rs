//! Notification queue expiry and ordering

use std::time::Duration;

use vaultline_core::NotificationQueue;
use vaultline_domain::{NewNotification, NotificationKind};

const TTL: Duration = Duration::from_secs(5);

/// Let spawned expiry tasks observe the advanced clock.
async fn settle() {
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn entries_keep_insertion_order() {
    let queue = NotificationQueue::new(TTL);
    let first = queue.success("Saved", "Profile updated");
    let second = queue.error("Failed", "Payment declined");

    let ids: Vec<_> = queue.list().iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![first, second]);
    assert_eq!(queue.list()[1].kind, NotificationKind::Error);
}

#[tokio::test(start_paused = true)]
async fn entry_expires_after_ttl() {
    let queue = NotificationQueue::new(TTL);
    queue.add(NewNotification::new(NotificationKind::Info, "Hello", "World"));
    settle().await;

    tokio::time::advance(Duration::from_millis(4_999)).await;
    settle().await;
    assert_eq!(queue.len(), 1);

    tokio::time::advance(Duration::from_millis(1)).await;
    settle().await;
    assert!(queue.is_empty());
}

#[tokio::test(start_paused = true)]
async fn each_entry_has_its_own_timer() {
    let queue = NotificationQueue::new(TTL);
    queue.info("First", "a");
    settle().await;
    tokio::time::advance(Duration::from_secs(3)).await;
    let second = queue.info("Second", "b");
    settle().await;

    tokio::time::advance(Duration::from_secs(2)).await;
    settle().await;
    let remaining: Vec<_> = queue.list().iter().map(|n| n.id).collect();
    assert_eq!(remaining, vec![second]);

    tokio::time::advance(Duration::from_secs(3)).await;
    settle().await;
    assert!(queue.is_empty());
}

#[tokio::test(start_paused = true)]
async fn manual_removal_before_expiry_is_harmless() {
    let queue = NotificationQueue::new(TTL);
    let id = queue.warning("Careful", "Low balance");
    assert!(queue.remove(id));
    assert!(!queue.remove(id));

    let survivor = queue.info("Later", "still here");
    settle().await;
    tokio::time::advance(Duration::from_secs(3)).await;
    settle().await;
    assert_eq!(queue.list()[0].id, survivor);
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_changes() {
    let queue = NotificationQueue::new(TTL);
    let mut rx = queue.subscribe();

    queue.info("Ping", "pong");
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().len(), 1);

    tokio::time::advance(TTL).await;
    rx.changed().await.unwrap();
    assert!(rx.borrow().is_empty());
}

#[tokio::test(start_paused = true)]
async fn clones_share_entries() {
    let queue = NotificationQueue::new(TTL);
    let handle = queue.clone();
    let id = handle.success("Done", "Transfer complete");

    assert_eq!(queue.list()[0].id, id);
    queue.clear();
    assert!(handle.is_empty());
}
