//! Request and response DTOs crossing the API boundary
//!
//! Requests carry their `validator` rules; responses serialize domain
//! entities through the `From` impls in [`mappers`].

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    ActivityListQuery, AdminSetPasswordRequest, ChangePasswordRequest, LoginRequest,
    NotificationListQuery, RegisterRequest, UpdateActiveRequest, UpdateProfileRequest,
    UpdateRoleRequest,
};

pub use responses::{
    ActivityResponse, ApiResponse, HealthChecks, HealthResponse, NotificationResponse,
    ReadinessResponse, UnreadCountResponse, UserResponse,
};
