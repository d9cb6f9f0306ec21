//! ClaimTask command handler
//!
//! An approved employee takes an open, unassigned task.

use shared::command::StateChange;
use shared::models::TaskStatus;

use crate::engine::traits::{CommandHandler, CommandMetadata, EngineContext, EngineError};

/// ClaimTask action
#[derive(Debug, Clone)]
pub struct ClaimTaskAction {
    pub task_id: String,
}

impl CommandHandler for ClaimTaskAction {
    fn execute(
        &self,
        ctx: &EngineContext<'_>,
        meta: &CommandMetadata,
    ) -> Result<Vec<StateChange>, EngineError> {
        meta.require_approved_employee()?;

        let task = ctx.task(&self.task_id)?;
        if task.status != TaskStatus::Open {
            return Err(EngineError::TaskNotOpen(task.id.clone()));
        }
        // Open tasks are unassigned by invariant; checked anyway so a
        // breached record cannot be claimed twice.
        if task.assigned_to.is_some() {
            return Err(EngineError::TaskAlreadyAssigned(task.id.clone()));
        }

        let mut task = task.clone();
        task.status = TaskStatus::InProgress;
        task.assigned_to = Some(meta.actor.id.clone());

        Ok(vec![StateChange::UpsertTask { task }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::actor::Actor;
    use shared::models::{AccountStatus, PaymentMethod, Task, UserRole};

    fn employee_metadata(status: AccountStatus) -> CommandMetadata {
        CommandMetadata {
            command_id: "cmd-1".to_string(),
            actor: Actor {
                id: "u-2".to_string(),
                name: "John Doe".to_string(),
                role: UserRole::Employee,
                account_status: status,
            },
            timestamp: 1_700_000_000_000,
        }
    }

    fn open_task() -> Task {
        Task {
            id: "t-1".to_string(),
            title: "Inventory".to_string(),
            description: String::new(),
            amount: 150.0,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end_date: None,
            location: "Site A".to_string(),
            status: TaskStatus::Open,
            created_by: "admin-1".to_string(),
            created_at: 0,
            assigned_to: None,
            is_batch: false,
            sub_tasks: vec![],
            completion_photo: None,
            completion_location_verified: false,
            rejection_reason: None,
            payment_method: PaymentMethod::Cash,
        }
    }

    #[test]
    fn test_claim_open_task() {
        let tasks = vec![open_task()];
        let ctx = EngineContext::new(&[], &[], &tasks, &[], &[]);
        let action = ClaimTaskAction {
            task_id: "t-1".to_string(),
        };

        let changes = action
            .execute(&ctx, &employee_metadata(AccountStatus::Approved))
            .unwrap();
        let StateChange::UpsertTask { task } = &changes[0] else {
            panic!("Expected UpsertTask change");
        };
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.assigned_to.as_deref(), Some("u-2"));
    }

    #[test]
    fn test_claim_non_open_task_fails() {
        for status in [TaskStatus::InProgress, TaskStatus::Done, TaskStatus::Paid] {
            let mut task = open_task();
            task.status = status;
            task.assigned_to = Some("u-3".to_string());
            let tasks = vec![task];
            let ctx = EngineContext::new(&[], &[], &tasks, &[], &[]);

            let action = ClaimTaskAction {
                task_id: "t-1".to_string(),
            };
            assert!(matches!(
                action.execute(&ctx, &employee_metadata(AccountStatus::Approved)),
                Err(EngineError::TaskNotOpen(_))
            ));
        }
    }

    #[test]
    fn test_claim_assigned_open_task_fails() {
        let mut task = open_task();
        task.assigned_to = Some("u-3".to_string());
        let tasks = vec![task];
        let ctx = EngineContext::new(&[], &[], &tasks, &[], &[]);

        let action = ClaimTaskAction {
            task_id: "t-1".to_string(),
        };
        assert!(matches!(
            action.execute(&ctx, &employee_metadata(AccountStatus::Approved)),
            Err(EngineError::TaskAlreadyAssigned(_))
        ));
    }

    #[test]
    fn test_unapproved_employee_cannot_claim() {
        let tasks = vec![open_task()];
        let ctx = EngineContext::new(&[], &[], &tasks, &[], &[]);
        let action = ClaimTaskAction {
            task_id: "t-1".to_string(),
        };

        assert!(matches!(
            action.execute(&ctx, &employee_metadata(AccountStatus::Pending)),
            Err(EngineError::AccountNotApproved(_))
        ));
    }

    #[test]
    fn test_claim_unknown_task_fails() {
        let ctx = EngineContext::new(&[], &[], &[], &[], &[]);
        let action = ClaimTaskAction {
            task_id: "missing".to_string(),
        };

        assert!(matches!(
            action.execute(&ctx, &employee_metadata(AccountStatus::Approved)),
            Err(EngineError::TaskNotFound(_))
        ));
    }
}
