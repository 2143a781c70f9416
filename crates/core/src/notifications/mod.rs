//! Ephemeral user-facing notifications
//!
//! Entries are appended in creation order and removed either explicitly or
//! when their time-to-live elapses. Expiry runs on the ambient tokio runtime.

mod queue;

pub use queue::NotificationQueue;
