//! User service
//!
//! Profile operations plus the admin surface: listing, role changes, and
//! activation toggles. Admin mutations leave an audit record and notify the
//! affected account; neither side effect can fail the mutation itself.

use dte_core::entities::{NewActivity, NewNotification, NotificationCategory, NotificationKind, Role, User};
use dte_core::traits::{NotificationRepository, UserRepository};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::dto::{UpdateProfileRequest, UserResponse};

use super::activity::ActivityService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the current user's profile
    #[instrument(skip(self))]
    pub async fn get_current(&self, user_id: i64) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;

        Ok(UserResponse::from(&user))
    }

    /// Update the current user's name and email
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn update_profile(
        &self,
        user_id: i64,
        request: UpdateProfileRequest,
    ) -> ServiceResult<UserResponse> {
        let updated = self
            .ctx
            .user_repo()
            .update_profile(user_id, &request.name, &request.email)
            .await?;

        info!(user_id, "profile updated");
        ActivityService::new(self.ctx)
            .record(NewActivity::new(
                user_id,
                "profile_update",
                format!("{} atualizou o perfil", updated.name),
            ))
            .await;

        Ok(UserResponse::from(&updated))
    }

    /// List every account (admin view)
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> ServiceResult<Vec<UserResponse>> {
        let users = self.ctx.user_repo().list_all().await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    /// Change an account's role (admin)
    #[instrument(skip(self, actor), fields(actor_id = actor.id))]
    pub async fn set_role(
        &self,
        actor: &User,
        target_id: i64,
        role: Role,
    ) -> ServiceResult<UserResponse> {
        let before = self
            .ctx
            .user_repo()
            .find_by_id(target_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", target_id))?;

        let updated = self.ctx.user_repo().set_role(target_id, role).await?;

        info!(target_id, role = %role, "role changed");
        ActivityService::new(self.ctx)
            .record(
                NewActivity::new(
                    target_id,
                    "role_change",
                    format!("Função de {} alterada para {role}", updated.name),
                )
                .with_metadata(json!({
                    "changed_by": actor.id,
                    "from": before.role.as_str(),
                    "to": role.as_str(),
                })),
            )
            .await;
        self.notify_best_effort(NewNotification::targeted(
            target_id,
            "Função atualizada",
            format!("Sua função foi alterada para {role}"),
            NotificationKind::Info,
            NotificationCategory::Security,
        ))
        .await;

        Ok(UserResponse::from(&updated))
    }

    /// Activate or deactivate an account (admin)
    ///
    /// Deactivation is this system's soft delete: the row stays, logins stop.
    #[instrument(skip(self, actor), fields(actor_id = actor.id))]
    pub async fn set_active(
        &self,
        actor: &User,
        target_id: i64,
        is_active: bool,
    ) -> ServiceResult<UserResponse> {
        let updated = self.ctx.user_repo().set_active(target_id, is_active).await?;

        info!(target_id, is_active, "activation changed");
        ActivityService::new(self.ctx)
            .record(
                NewActivity::new(
                    target_id,
                    "status_change",
                    if is_active {
                        format!("Conta de {} reativada", updated.name)
                    } else {
                        format!("Conta de {} desativada", updated.name)
                    },
                )
                .with_metadata(json!({ "changed_by": actor.id, "is_active": is_active })),
            )
            .await;
        self.notify_best_effort(if is_active {
            NewNotification::targeted(
                target_id,
                "Conta reativada",
                "Sua conta foi reativada por um administrador",
                NotificationKind::Success,
                NotificationCategory::Security,
            )
        } else {
            NewNotification::targeted(
                target_id,
                "Conta desativada",
                "Sua conta foi desativada por um administrador",
                NotificationKind::Warning,
                NotificationCategory::Security,
            )
        })
        .await;

        Ok(UserResponse::from(&updated))
    }

    async fn notify_best_effort(&self, notification: NewNotification) {
        if let Err(e) = self.ctx.notification_repo().create(&notification).await {
            warn!(error = %e, "failed to create notification");
        }
    }
}
