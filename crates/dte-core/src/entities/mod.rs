//! Entities the dashboard manages

mod activity;
mod notification;
mod user;

pub use activity::{Activity, NewActivity};
pub use notification::{NewNotification, Notification, NotificationCategory, NotificationKind};
pub use user::{LoginMethod, NewUser, Role, User};
