//! Audit activity service
//!
//! Auditing is best-effort: recording swallows store failures so the
//! triggering operation never fails because its audit insert did.

use dte_core::entities::NewActivity;
use dte_core::traits::{ActivityQuery, ActivityRepository};
use tracing::{instrument, warn};

use crate::dto::{ActivityListQuery, ActivityResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Audit activity service
pub struct ActivityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ActivityService<'a> {
    /// Create a new ActivityService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record an audit activity, swallowing store failures
    pub async fn record(&self, activity: NewActivity) {
        if let Err(e) = self.ctx.activity_repo().create(&activity).await {
            warn!(
                activity_type = %activity.activity_type,
                error = %e,
                "failed to record activity"
            );
        }
    }

    /// List activities matching the given filters, newest first
    #[instrument(skip(self, query))]
    pub async fn list(&self, query: ActivityListQuery) -> ServiceResult<Vec<ActivityResponse>> {
        let mut repo_query = ActivityQuery {
            user_id: query.user_id,
            activity_type: query.activity_type,
            search: query.search,
            since: query.since,
            until: query.until,
            ..ActivityQuery::default()
        };
        if let Some(limit) = query.limit {
            repo_query.limit = limit;
        }

        let records = self.ctx.activity_repo().find(&repo_query).await?;
        Ok(records.iter().map(ActivityResponse::from).collect())
    }

    /// Distinct activity type tags seen so far
    #[instrument(skip(self))]
    pub async fn distinct_types(&self) -> ServiceResult<Vec<String>> {
        Ok(self.ctx.activity_repo().distinct_types().await?)
    }
}
