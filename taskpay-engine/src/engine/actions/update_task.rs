//! UpdateTask command handler
//!
//! Edits task fields. When the sub-task list is replaced, the parent
//! amount is recomputed in the same state change so the two are never
//! observed out of sync.

use shared::command::StateChange;
use shared::models::{SubTask, TaskUpdate};
use shared::money;

use crate::engine::traits::{CommandHandler, CommandMetadata, EngineContext, EngineError};

/// UpdateTask action
#[derive(Debug, Clone)]
pub struct UpdateTaskAction {
    pub task_id: String,
    pub changes: TaskUpdate,
}

impl CommandHandler for UpdateTaskAction {
    fn execute(
        &self,
        ctx: &EngineContext<'_>,
        meta: &CommandMetadata,
    ) -> Result<Vec<StateChange>, EngineError> {
        meta.require_admin()?;

        let existing = ctx.task(&self.task_id)?;
        if existing.created_by != meta.actor.id {
            return Err(EngineError::NotTaskCreator);
        }

        let mut task = existing.clone();
        let changes = &self.changes;

        if let Some(title) = &changes.title {
            if title.trim().is_empty() {
                return Err(EngineError::Validation(
                    "title must not be empty".to_string(),
                ));
            }
            task.title = title.trim().to_string();
        }
        if let Some(description) = &changes.description {
            task.description = description.clone();
        }
        if let Some(date) = changes.date {
            task.date = date;
        }
        if let Some(end_date) = changes.end_date {
            task.end_date = Some(end_date);
        }
        if let Some(location) = &changes.location {
            if location.trim().is_empty() {
                return Err(EngineError::Validation(
                    "location must not be empty".to_string(),
                ));
            }
            task.location = location.trim().to_string();
        }
        if let Some(method) = changes.payment_method {
            task.payment_method = method;
        }

        if let Some(subs) = &changes.sub_tasks {
            if !task.is_batch {
                return Err(EngineError::Validation(
                    "only batch tasks have sub-tasks".to_string(),
                ));
            }
            if subs.is_empty() {
                return Err(EngineError::BatchEmpty);
            }
            for (idx, sub) in subs.iter().enumerate() {
                if sub.title.trim().is_empty() {
                    return Err(EngineError::Validation(format!(
                        "Missing required field(s): sub_tasks[{}].title",
                        idx
                    )));
                }
                money::validate_amount(sub.amount, &format!("sub_tasks[{}].amount", idx))
                    .map_err(|e| EngineError::Validation(e.message))?;
            }
            task.sub_tasks = subs
                .iter()
                .map(|s| SubTask {
                    id: uuid::Uuid::new_v4().to_string(),
                    title: s.title.trim().to_string(),
                    description: s.description.clone(),
                    amount: s.amount,
                })
                .collect();
        }

        // Batch amounts are derived; a manual amount only applies to
        // single tasks.
        if let Some(amount) = changes.amount
            && !task.is_batch
        {
            money::validate_positive_amount(amount, "amount")
                .map_err(|e| EngineError::Validation(e.message))?;
            task.amount = amount;
        }
        task.recompute_amount();

        Ok(vec![StateChange::UpsertTask { task }])
    }
}
