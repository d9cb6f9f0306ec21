//! DeclineTask command handler
//!
//! An admin rejects submitted proof: the task reverts to `InProgress`
//! with the rejection reason recorded and both proof artifacts cleared,
//! so the employee must resubmit from scratch.

use shared::command::StateChange;
use shared::models::TaskStatus;

use crate::engine::traits::{CommandHandler, CommandMetadata, EngineContext, EngineError};

/// DeclineTask action
#[derive(Debug, Clone)]
pub struct DeclineTaskAction {
    pub task_id: String,
    pub reason: String,
}

impl CommandHandler for DeclineTaskAction {
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
        let reason = self.reason.trim();
        if reason.is_empty() {
            return Err(EngineError::RejectionReasonRequired);
        }

        let mut task = task.clone();
        task.status = TaskStatus::InProgress;
        task.rejection_reason = Some(reason.to_string());
        task.clear_proof();

        Ok(vec![StateChange::UpsertTask { task }])
    }
}
