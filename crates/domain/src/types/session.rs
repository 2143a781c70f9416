//! Client session state machine
//!
//! `SessionState` is the single authoritative answer to "is anyone logged
//! in, and who". Every change goes through [`SessionState::transition`], a
//! total function of (current state, event): events that do not apply to
//! the current state leave it unchanged.
//!
//! ```text
//!              login/register/restore start
//!  Anonymous ───────────────────────────────► Authenticating
//!     ▲  ▲                                      │        │
//!     │  │ restore failed                 ok    │        │ failed
//!     │  └──────────────────────────────────────┤        ▼
//!     │                                         ▼      Error
//!     └──────── logout / expired ──────── Authenticated   │
//!     └──────────────── clear_error ──────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::user::UserProfile;

/// Authentication state of the client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated {
        user: UserProfile,
        #[serde(skip_serializing, default)]
        token: String,
    },
    Error {
        message: String,
    },
}

/// Inputs to the session state machine
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A user-triggered login or registration started
    LoginStarted,
    /// Login or registration succeeded
    LoginSucceeded { user: UserProfile, token: String },
    /// Login or registration failed with a displayable message
    LoginFailed { message: String },
    /// Silent restoration from a persisted token started
    RestoreStarted,
    /// Silent restoration fetched the profile
    RestoreSucceeded { user: UserProfile, token: String },
    /// Silent restoration could not validate the persisted token
    RestoreFailed,
    /// Local logout completed
    LoggedOut,
    /// The backend rejected the current token
    SessionExpired,
    /// Partial in-place update of the current user
    UserUpdated(Map<String, Value>),
    /// Fresh profile fetched for the current session
    ProfileRefreshed(UserProfile),
    /// Error payload dismissed
    ErrorCleared,
}

impl SessionState {
    /// Apply one event, returning the next state.
    #[must_use]
    pub fn transition(&self, event: SessionEvent) -> Self {
        match (self, event) {
            (_, SessionEvent::LoginStarted) => Self::Authenticating,
            (_, SessionEvent::LoginSucceeded { user, token }) => {
                Self::Authenticated { user, token }
            }
            (_, SessionEvent::LoginFailed { message }) => Self::Error { message },

            (Self::Anonymous, SessionEvent::RestoreStarted) => Self::Authenticating,
            (Self::Authenticating, SessionEvent::RestoreSucceeded { user, token }) => {
                Self::Authenticated { user, token }
            }
            (Self::Authenticating, SessionEvent::RestoreFailed) => Self::Anonymous,

            (_, SessionEvent::LoggedOut | SessionEvent::SessionExpired) => Self::Anonymous,

            (Self::Authenticated { user, token }, SessionEvent::UserUpdated(partial)) => {
                let mut user = user.clone();
                user.merge(partial);
                Self::Authenticated { user, token: token.clone() }
            }
            (Self::Authenticated { token, .. }, SessionEvent::ProfileRefreshed(user)) => {
                Self::Authenticated { user, token: token.clone() }
            }

            (Self::Error { .. }, SessionEvent::ErrorCleared) => Self::Anonymous,

            (current, _) => current.clone(),
        }
    }

    /// Stable lowercase label for logging.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Authenticating => "authenticating",
            Self::Authenticated { .. } => "authenticated",
            Self::Error { .. } => "error",
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Whether a UI should show a loading indicator.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Authenticating)
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Authenticated { token, .. } => Some(token),
            _ => None,
        }
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }
}
