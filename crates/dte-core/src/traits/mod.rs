//! Repository traits (ports)

mod repositories;

pub use repositories::{
    ActivityQuery, ActivityRepository, NotificationRepository, NotificationScope, RepoResult,
    UserRepository,
};
