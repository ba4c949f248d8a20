//! Notification service
//!
//! Targeted and broadcast notifications. Broadcast rows carry no user and are
//! visible to administrators only; every mutation is scoped so an account can
//! only touch its own (or broadcast-visible) rows.

use dte_core::entities::{
    NewNotification, Notification, NotificationCategory, NotificationKind, User,
};
use dte_core::error::DomainError;
use dte_core::traits::{NotificationRepository, NotificationScope};
use tracing::{info, instrument};

use crate::dto::{NotificationListQuery, NotificationResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Default page size for notification listings
const DEFAULT_LIST_LIMIT: i64 = 50;

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn scope_for(user: &User) -> NotificationScope {
        NotificationScope {
            user_id: user.id,
            include_broadcast: user.is_admin(),
        }
    }

    /// List the notifications visible to a user, newest first
    #[instrument(skip(self, user, query), fields(user_id = user.id))]
    pub async fn list_for_user(
        &self,
        user: &User,
        query: &NotificationListQuery,
    ) -> ServiceResult<Vec<NotificationResponse>> {
        let scope = Self::scope_for(user);
        let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT);

        let rows = self
            .ctx
            .notification_repo()
            .find(scope, query.unread_only, limit)
            .await?;
        Ok(rows.iter().map(NotificationResponse::from).collect())
    }

    /// Count unread notifications visible to a user
    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn unread_count(&self, user: &User) -> ServiceResult<i64> {
        Ok(self
            .ctx
            .notification_repo()
            .unread_count(Self::scope_for(user))
            .await?)
    }

    /// Mark a single notification as read
    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn mark_read(&self, user: &User, notification_id: i64) -> ServiceResult<()> {
        let marked = self
            .ctx
            .notification_repo()
            .mark_read(notification_id, Self::scope_for(user))
            .await?;
        if !marked {
            return Err(DomainError::NotificationNotFound(notification_id).into());
        }
        Ok(())
    }

    /// Mark every visible notification as read, returning how many changed
    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn mark_all_read(&self, user: &User) -> ServiceResult<u64> {
        Ok(self
            .ctx
            .notification_repo()
            .mark_all_read(Self::scope_for(user))
            .await?)
    }

    /// Delete a notification
    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn delete(&self, user: &User, notification_id: i64) -> ServiceResult<()> {
        let deleted = self
            .ctx
            .notification_repo()
            .delete(notification_id, Self::scope_for(user))
            .await?;
        if !deleted {
            return Err(DomainError::NotificationNotFound(notification_id).into());
        }
        Ok(())
    }

    /// Create a targeted or broadcast notification
    #[instrument(skip(self, notification), fields(title = %notification.title))]
    pub async fn notify(&self, notification: NewNotification) -> ServiceResult<Notification> {
        let created = self.ctx.notification_repo().create(&notification).await?;
        info!(notification_id = created.id, "notification created");
        Ok(created)
    }

    /// Create a broadcast notification visible to every administrator
    pub async fn broadcast_admins(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
        category: NotificationCategory,
    ) -> ServiceResult<Notification> {
        self.notify(NewNotification::broadcast(title, message, kind, category))
            .await
    }
}
