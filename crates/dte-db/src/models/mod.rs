//! Row structs deserialized straight from PostgreSQL

mod activity;
mod notification;
mod user;

pub use activity::ActivityRow;
pub use notification::NotificationRow;
pub use user::UserRow;
