//! # dte-core
//!
//! The domain layer: user, activity and notification entities, the errors
//! they produce, and the repository traits the storage crate implements.
//! Nothing here knows about SQL, HTTP or the async runtime.

pub mod entities;
pub mod error;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{
    Activity, LoginMethod, NewActivity, NewNotification, NewUser, Notification,
    NotificationCategory, NotificationKind, Role, User,
};
pub use error::{AuthError, AuthResult, DomainError, DomainErrorKind};
pub use traits::{
    ActivityQuery, ActivityRepository, NotificationRepository, NotificationScope, RepoResult,
    UserRepository,
};
