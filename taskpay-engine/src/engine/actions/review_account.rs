//! ApproveAccount / RejectAccount command handlers
//!
//! Admin review of pending employee applications. Both outcomes are
//! terminal: there is no re-review or reinstatement path.

use shared::command::StateChange;
use shared::models::{AccountStatus, User, UserRole};

use crate::engine::traits::{CommandHandler, CommandMetadata, EngineContext, EngineError};

/// ApproveAccount action
#[derive(Debug, Clone)]
pub struct ApproveAccountAction {
    pub user_id: String,
}

/// RejectAccount action
#[derive(Debug, Clone)]
pub struct RejectAccountAction {
    pub user_id: String,
    pub reason: Option<String>,
}

/// Common guards for both review outcomes
fn reviewable_user(
    ctx: &EngineContext<'_>,
    meta: &CommandMetadata,
    user_id: &str,
) -> Result<User, EngineError> {
    meta.require_admin()?;

    let user = ctx.user(user_id)?;
    if user.role != UserRole::Employee {
        return Err(EngineError::Validation(
            "only employee accounts are subject to review".to_string(),
        ));
    }
    if user.account_status != AccountStatus::Pending {
        return Err(EngineError::AccountAlreadyReviewed(user.id.clone()));
    }
    Ok(user.clone())
}

impl CommandHandler for ApproveAccountAction {
    fn execute(
        &self,
        ctx: &EngineContext<'_>,
        meta: &CommandMetadata,
    ) -> Result<Vec<StateChange>, EngineError> {
        let mut user = reviewable_user(ctx, meta, &self.user_id)?;
        user.account_status = AccountStatus::Approved;
        user.rejection_reason = None;

        Ok(vec![StateChange::UpsertUser { user }])
    }
}

impl CommandHandler for RejectAccountAction {
    fn execute(
        &self,
        ctx: &EngineContext<'_>,
        meta: &CommandMetadata,
    ) -> Result<Vec<StateChange>, EngineError> {
        let mut user = reviewable_user(ctx, meta, &self.user_id)?;
        user.account_status = AccountStatus::Rejected;
        user.rejection_reason = self
            .reason
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string);

        Ok(vec![StateChange::UpsertUser { user }])
    }
}
