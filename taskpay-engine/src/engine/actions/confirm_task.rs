//! ConfirmTask command handler
//!
//! An admin accepts submitted proof: the task becomes `Paid` and exactly
//! one PaymentRequest is created, already in `Paid` status, with the
//! payout destination snapshotted from the assignee's profile.

use shared::command::StateChange;
use shared::models::{PaymentMethod, PaymentRequest, PaymentStatus, TaskStatus};

use crate::engine::traits::{CommandHandler, CommandMetadata, EngineContext, EngineError};

/// ConfirmTask action
#[derive(Debug, Clone)]
pub struct ConfirmTaskAction {
    pub task_id: String,
}

impl CommandHandler for ConfirmTaskAction {
    fn execute(
        &self,
        ctx: &EngineContext<'_>,
        meta: &CommandMetadata,
    ) -> Result<Vec<StateChange>, EngineError> {
        meta.require_admin()?;

        let task = ctx.task(&self.task_id)?;
        if task.status != TaskStatus::Done {
            return Err(EngineError::TaskNotAwaitingReview(task.id.clone()));
        }
        let employee_id = task
            .assigned_to
            .clone()
            .ok_or_else(|| EngineError::Validation("task has no assignee".to_string()))?;

        // Destination snapshot: wallet descriptor for e-wallet payouts,
        // the cash-on-hand literal otherwise. Immutable once written.
        let snapshot = match task.payment_method {
            PaymentMethod::Cash => "Cash on Hand".to_string(),
            PaymentMethod::Ewallet => ctx
                .profile_for(&employee_id)
                .map(|p| p.wallet_descriptor())
                .unwrap_or_else(|| "E-Wallet: ...".to_string()),
        };

        let mut updated = task.clone();
        updated.status = TaskStatus::Paid;
        updated.rejection_reason = None;

        let payment = PaymentRequest {
            id: uuid::Uuid::new_v4().to_string(),
            task_id: task.id.clone(),
            employee_id,
            amount: task.amount,
            method: task.payment_method,
            payment_details_snapshot: snapshot,
            status: PaymentStatus::Paid,
            created_at: meta.timestamp,
            paid_at: Some(meta.timestamp),
        };

        Ok(vec![
            StateChange::UpsertTask { task: updated },
            StateChange::InsertPayment { payment },
        ])
    }
}
