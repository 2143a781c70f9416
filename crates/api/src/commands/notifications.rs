//! Notification commands

use vaultline_domain::{NewNotification, Notification, NotificationId};

use crate::context::AppContext;

/// Live notifications, oldest first
pub fn list_notifications(context: &AppContext) -> Vec<Notification> {
    context.notifications.list()
}

/// Show a notification; it expires after the configured TTL
pub fn push_notification(context: &AppContext, request: NewNotification) -> NotificationId {
    context.notifications.add(request)
}

/// Dismiss a notification. Returns `false` if it was already gone.
pub fn dismiss_notification(context: &AppContext, id: NotificationId) -> bool {
    context.notifications.remove(id)
}
