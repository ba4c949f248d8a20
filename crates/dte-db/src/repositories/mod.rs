//! SQLx-backed implementations of the `dte-core` repository traits

mod activity;
mod error;
mod notification;
mod user;

pub use activity::PgActivityRepository;
pub use notification::PgNotificationRepository;
pub use user::PgUserRepository;
