//! Application commands - the surface a UI layer binds to

mod auth;
mod health;
mod notifications;

pub use auth::*;
pub use health::*;
pub use notifications::*;
