//! Service implementations and the context they share

pub mod activity;
pub mod auth;
pub mod context;
pub mod error;
pub mod notification;
pub mod user;

pub use activity::ActivityService;
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use notification::NotificationService;
pub use user::UserService;
