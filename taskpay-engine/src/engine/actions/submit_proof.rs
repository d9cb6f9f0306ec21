//! SubmitProof command handler
//!
//! The assignee submits completion proof: a photo reference plus a
//! verified-location flag, both required together. A prior rejection
//! reason is cleared on resubmission.

use shared::command::StateChange;
use shared::models::{ImageRef, TaskStatus};

use crate::engine::traits::{CommandHandler, CommandMetadata, EngineContext, EngineError};

/// SubmitProof action
#[derive(Debug, Clone)]
pub struct SubmitProofAction {
    pub task_id: String,
    pub photo: ImageRef,
    pub location_verified: bool,
}

impl CommandHandler for SubmitProofAction {
    fn execute(
        &self,
        ctx: &EngineContext<'_>,
        meta: &CommandMetadata,
    ) -> Result<Vec<StateChange>, EngineError> {
        meta.require_approved_employee()?;

        let task = ctx.task(&self.task_id)?;
        if task.status != TaskStatus::InProgress {
            return Err(EngineError::TaskNotInProgress(task.id.clone()));
        }
        if task.assigned_to.as_deref() != Some(meta.actor.id.as_str()) {
            return Err(EngineError::NotTaskAssignee);
        }
        if !self.location_verified || self.photo.is_empty() {
            return Err(EngineError::ProofIncomplete);
        }

        let mut task = task.clone();
        task.status = TaskStatus::Done;
        task.completion_photo = Some(self.photo.clone());
        task.completion_location_verified = true;
        task.rejection_reason = None;

        Ok(vec![StateChange::UpsertTask { task }])
    }
}
