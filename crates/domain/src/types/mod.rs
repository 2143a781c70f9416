//! Domain types and models

pub mod auth;
pub mod finance;
pub mod notification;
pub mod session;
pub mod user;

pub use auth::{AuthResponse, Credentials, Registration};
pub use finance::TransactionQuery;
pub use notification::{NewNotification, Notification, NotificationId, NotificationKind};
pub use session::{SessionEvent, SessionState};
pub use user::UserProfile;
