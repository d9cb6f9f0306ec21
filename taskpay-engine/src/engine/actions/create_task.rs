//! CreateTask command handler
//!
//! Posts a new task (single or batch). Batch tasks derive their amount
//! from the sub-task list; it is never stored independently.

use shared::command::StateChange;
use shared::models::{SubTask, Task, TaskCreate, TaskStatus};
use shared::money;

use crate::engine::traits::{CommandHandler, CommandMetadata, EngineContext, EngineError};

/// CreateTask action
#[derive(Debug, Clone)]
pub struct CreateTaskAction {
    pub input: TaskCreate,
}

impl CommandHandler for CreateTaskAction {
    fn execute(
        &self,
        _ctx: &EngineContext<'_>,
        meta: &CommandMetadata,
    ) -> Result<Vec<StateChange>, EngineError> {
        meta.require_admin()?;
        let input = &self.input;

        // 1. Collect every missing required field and report them together
        let mut missing: Vec<String> = Vec::new();
        if input.title.trim().is_empty() {
            missing.push("title".to_string());
        }
        if input.location.trim().is_empty() {
            missing.push("location".to_string());
        }
        if input.is_batch && input.sub_tasks.is_empty() {
            missing.push("sub_tasks".to_string());
        }
        for (idx, sub) in input.sub_tasks.iter().enumerate() {
            if sub.title.trim().is_empty() {
                missing.push(format!("sub_tasks[{}].title", idx));
            }
        }
        if !missing.is_empty() {
            return Err(EngineError::Validation(format!(
                "Missing required field(s): {}",
                missing.join(", ")
            )));
        }

        // 2. Validate amounts (single: positive; sub-tasks: non-negative)
        if input.is_batch {
            for (idx, sub) in input.sub_tasks.iter().enumerate() {
                money::validate_amount(sub.amount, &format!("sub_tasks[{}].amount", idx))
                    .map_err(|e| EngineError::Validation(e.message))?;
            }
        } else {
            money::validate_positive_amount(input.amount, "amount")
                .map_err(|e| EngineError::Validation(e.message))?;
        }

        // 3. Materialize sub-tasks with their own ids
        let sub_tasks: Vec<SubTask> = input
            .sub_tasks
            .iter()
            .map(|s| SubTask {
                id: uuid::Uuid::new_v4().to_string(),
                title: s.title.trim().to_string(),
                description: s.description.clone(),
                amount: s.amount,
            })
            .collect();

        // 4. Build the task; batch amount is derived, not taken from input
        let mut task = Task {
            id: uuid::Uuid::new_v4().to_string(),
            title: input.title.trim().to_string(),
            description: input.description.clone(),
            amount: input.amount,
            date: input.date,
            end_date: input.end_date,
            location: input.location.trim().to_string(),
            status: TaskStatus::Open,
            created_by: meta.actor.id.clone(),
            created_at: meta.timestamp,
            assigned_to: None,
            is_batch: input.is_batch,
            sub_tasks,
            completion_photo: None,
            completion_location_verified: false,
            rejection_reason: None,
            payment_method: input.payment_method,
        };
        task.recompute_amount();

        Ok(vec![StateChange::UpsertTask { task }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::actor::Actor;
    use shared::models::{AccountStatus, PaymentMethod, SubTaskInput, UserRole};

    fn admin_metadata() -> CommandMetadata {
        CommandMetadata {
            command_id: "cmd-1".to_string(),
            actor: Actor {
                id: "admin-1".to_string(),
                name: "Alex Admin".to_string(),
                role: UserRole::Admin,
                account_status: AccountStatus::Approved,
            },
            timestamp: 1_700_000_000_000,
        }
    }

    fn employee_metadata() -> CommandMetadata {
        CommandMetadata {
            command_id: "cmd-2".to_string(),
            actor: Actor {
                id: "u-2".to_string(),
                name: "John Doe".to_string(),
                role: UserRole::Employee,
                account_status: AccountStatus::Approved,
            },
            timestamp: 1_700_000_000_000,
        }
    }

    fn single_input() -> TaskCreate {
        TaskCreate {
            title: "Warehouse Inventory".to_string(),
            description: "Count incoming stock in Section A".to_string(),
            amount: 150.0,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end_date: None,
            location: "Site A".to_string(),
            payment_method: PaymentMethod::Cash,
            is_batch: false,
            sub_tasks: vec![],
        }
    }

    fn batch_input() -> TaskCreate {
        TaskCreate {
            title: "Store Opening Prep".to_string(),
            description: String::new(),
            amount: 0.0,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end_date: None,
            location: "Site B".to_string(),
            payment_method: PaymentMethod::Ewallet,
            is_batch: true,
            sub_tasks: vec![
                SubTaskInput {
                    title: "Clean floor".to_string(),
                    description: String::new(),
                    amount: 40.0,
                },
                SubTaskInput {
                    title: "Arrange shelves".to_string(),
                    description: String::new(),
                    amount: 60.0,
                },
            ],
        }
    }

    fn ctx<'a>() -> EngineContext<'a> {
        EngineContext::new(&[], &[], &[], &[], &[])
    }

    #[test]
    fn test_create_single_task() {
        let action = CreateTaskAction {
            input: single_input(),
        };
        let changes = action.execute(&ctx(), &admin_metadata()).unwrap();

        assert_eq!(changes.len(), 1);
        let StateChange::UpsertTask { task } = &changes[0] else {
            panic!("Expected UpsertTask change");
        };
        assert_eq!(task.status, TaskStatus::Open);
        assert_eq!(task.amount, 150.0);
        assert_eq!(task.created_by, "admin-1");
        assert!(task.assigned_to.is_none());
        assert!(!task.id.is_empty());
    }

    #[test]
    fn test_create_batch_task_amount_is_sub_task_sum() {
        let action = CreateTaskAction {
            input: batch_input(),
        };
        let changes = action.execute(&ctx(), &admin_metadata()).unwrap();

        let StateChange::UpsertTask { task } = &changes[0] else {
            panic!("Expected UpsertTask change");
        };
        assert!(task.is_batch);
        assert_eq!(task.sub_tasks.len(), 2);
        assert_eq!(task.amount, 100.0);
        assert_eq!(task.amount, task.batch_total());
    }

    #[test]
    fn test_batch_amount_input_is_ignored() {
        let mut input = batch_input();
        input.amount = 9999.0;
        let action = CreateTaskAction { input };
        let changes = action.execute(&ctx(), &admin_metadata()).unwrap();

        let StateChange::UpsertTask { task } = &changes[0] else {
            panic!("Expected UpsertTask change");
        };
        assert_eq!(task.amount, 100.0);
    }

    #[test]
    fn test_missing_fields_are_all_named() {
        let mut input = single_input();
        input.title = "  ".to_string();
        input.location = String::new();
        let action = CreateTaskAction { input };

        let err = action.execute(&ctx(), &admin_metadata()).unwrap_err();
        let EngineError::Validation(msg) = err else {
            panic!("Expected validation error");
        };
        assert!(msg.contains("title"));
        assert!(msg.contains("location"));
    }

    #[test]
    fn test_batch_without_sub_tasks_fails() {
        let mut input = batch_input();
        input.sub_tasks.clear();
        let action = CreateTaskAction { input };

        let err = action.execute(&ctx(), &admin_metadata()).unwrap_err();
        let EngineError::Validation(msg) = err else {
            panic!("Expected validation error");
        };
        assert!(msg.contains("sub_tasks"));
    }

    #[test]
    fn test_sub_task_without_title_fails() {
        let mut input = batch_input();
        input.sub_tasks[1].title = String::new();
        let action = CreateTaskAction { input };

        let err = action.execute(&ctx(), &admin_metadata()).unwrap_err();
        let EngineError::Validation(msg) = err else {
            panic!("Expected validation error");
        };
        assert!(msg.contains("sub_tasks[1].title"));
    }

    #[test]
    fn test_negative_sub_task_amount_fails() {
        let mut input = batch_input();
        input.sub_tasks[0].amount = -5.0;
        let action = CreateTaskAction { input };

        assert!(matches!(
            action.execute(&ctx(), &admin_metadata()),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_amount_single_task_fails() {
        let mut input = single_input();
        input.amount = 0.0;
        let action = CreateTaskAction { input };

        assert!(matches!(
            action.execute(&ctx(), &admin_metadata()),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn test_employee_cannot_create_tasks() {
        let action = CreateTaskAction {
            input: single_input(),
        };
        assert!(matches!(
            action.execute(&ctx(), &employee_metadata()),
            Err(EngineError::AdminRequired)
        ));
    }
}
