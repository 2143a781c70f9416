//! Notification queue with per-entry expiry timers

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, warn};
use vaultline_domain::constants::DEFAULT_NOTIFICATION_TTL_MS;
use vaultline_domain::{NewNotification, Notification, NotificationId, NotificationKind};

/// Ordered list of live notifications
///
/// Cloning yields another handle to the same list.
#[derive(Clone)]
pub struct NotificationQueue {
    entries: Arc<watch::Sender<Vec<Notification>>>,
    ttl: Duration,
}

impl NotificationQueue {
    /// Queue whose entries expire `ttl` after being added
    pub fn new(ttl: Duration) -> Self {
        let (entries, _) = watch::channel(Vec::new());
        Self { entries: Arc::new(entries), ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Append a notification and schedule its expiry.
    ///
    /// Returns the generated id, usable with [`Self::remove`].
    pub fn add(&self, request: NewNotification) -> NotificationId {
        let notification = Notification::from_request(request);
        let id = notification.id;
        debug!(%id, kind = %notification.kind, "Notification added");

        self.entries.send_modify(|entries| entries.push(notification));
        self.schedule_expiry(id);
        id
    }

    pub fn success(&self, title: impl Into<String>, message: impl Into<String>) -> NotificationId {
        self.add(NewNotification::new(NotificationKind::Success, title, message))
    }

    pub fn error(&self, title: impl Into<String>, message: impl Into<String>) -> NotificationId {
        self.add(NewNotification::new(NotificationKind::Error, title, message))
    }

    pub fn warning(&self, title: impl Into<String>, message: impl Into<String>) -> NotificationId {
        self.add(NewNotification::new(NotificationKind::Warning, title, message))
    }

    pub fn info(&self, title: impl Into<String>, message: impl Into<String>) -> NotificationId {
        self.add(NewNotification::new(NotificationKind::Info, title, message))
    }

    /// Remove the entry with `id`. Unknown ids are a no-op.
    ///
    /// Returns `true` if an entry was removed.
    pub fn remove(&self, id: NotificationId) -> bool {
        remove_entry(&self.entries, id)
    }

    /// Snapshot of the live entries, oldest first
    pub fn list(&self) -> Vec<Notification> {
        self.entries.borrow().clone()
    }

    /// Receiver notified whenever the list changes
    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.entries.subscribe()
    }

    /// Drop every entry. Pending expiry timers become no-ops.
    pub fn clear(&self) {
        self.entries.send_if_modified(|entries| {
            let changed = !entries.is_empty();
            entries.clear();
            changed
        });
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn schedule_expiry(&self, id: NotificationId) {
        let Ok(runtime) = Handle::try_current() else {
            warn!(%id, "No async runtime available; notification will not expire");
            return;
        };

        let entries: Weak<_> = Arc::downgrade(&self.entries);
        let ttl = self.ttl;
        runtime.spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Some(entries) = entries.upgrade() {
                if remove_entry(&entries, id) {
                    debug!(%id, "Notification expired");
                }
            }
        });
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_NOTIFICATION_TTL_MS))
    }
}

fn remove_entry(entries: &watch::Sender<Vec<Notification>>, id: NotificationId) -> bool {
    entries.send_if_modified(|entries| {
        match entries.iter().position(|notification| notification.id == id) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    })
}
