//! DeleteTask command handler
//!
//! Deletion is unconditional and immediate in any state — no soft delete,
//! no cascade guard. PaymentRequests that reference the task remain as
//! orphaned historical records.

use shared::command::StateChange;

use crate::engine::traits::{CommandHandler, CommandMetadata, EngineContext, EngineError};

/// DeleteTask action
#[derive(Debug, Clone)]
pub struct DeleteTaskAction {
    pub task_id: String,
}

impl CommandHandler for DeleteTaskAction {
    fn execute(
        &self,
        ctx: &EngineContext<'_>,
        meta: &CommandMetadata,
    ) -> Result<Vec<StateChange>, EngineError> {
        meta.require_admin()?;

        let task = ctx.task(&self.task_id)?;
        if task.created_by != meta.actor.id {
            return Err(EngineError::NotTaskCreator);
        }

        Ok(vec![StateChange::DeleteTask {
            task_id: task.id.clone(),
        }])
    }
}
