//! # dte-service
//!
//! Business logic between the HTTP handlers and the repositories.
//!
//! Services borrow a shared [`services::ServiceContext`] and orchestrate the
//! repository traits from `dte-core`; nothing in this crate touches SQL
//! directly. The [`dto`] module holds the request and response shapes the
//! API serializes.

pub mod dto;
pub mod services;

#[cfg(test)]
mod testing;

pub use services::{
    ActivityService, AuthService, NotificationService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, UserService,
};
