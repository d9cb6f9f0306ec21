//! Task and SubTask Models

use super::image_ref::ImageRef;
use super::payment_profile::PaymentMethod;
use crate::money;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task lifecycle status
///
/// `Open → InProgress → Done → Paid`, with a `Done → InProgress` branch
/// when an admin declines the submitted proof. `Paid` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Open,
    InProgress,
    Done,
    Paid,
}

/// Child of a batch task
///
/// Owned exclusively by its parent; created, edited and removed only as
/// part of editing the parent task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubTask {
    pub id: String,
    pub title: String,
    pub description: String,
    pub amount: f64,
}

/// Unit of paid work posted by an admin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    /// For batch tasks this always equals the sum of sub-task amounts
    pub amount: f64,
    /// Scheduled date
    pub date: NaiveDate,
    /// Optional end of a scheduled range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub location: String,
    pub status: TaskStatus,
    /// Admin who posted the task
    pub created_by: String,
    /// Epoch milliseconds
    pub created_at: i64,
    /// Unset only while the task is `Open`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub is_batch: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_tasks: Vec<SubTask>,
    /// Set together with `completion_location_verified` on submission,
    /// cleared when a submission is declined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_photo: Option<ImageRef>,
    #[serde(default)]
    pub completion_location_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub payment_method: PaymentMethod,
}

impl Task {
    /// Sum of sub-task amounts, computed with decimal precision
    pub fn batch_total(&self) -> f64 {
        money::sum_amounts(self.sub_tasks.iter().map(|s| s.amount))
    }

    /// Re-derive `amount` from the sub-task list
    ///
    /// Must be called whenever the sub-task list changes so the two are
    /// never observed out of sync.
    pub fn recompute_amount(&mut self) {
        if self.is_batch {
            self.amount = self.batch_total();
        }
    }

    /// Drop both proof artifacts (photo and location flag)
    pub fn clear_proof(&mut self) {
        self.completion_photo = None;
        self.completion_location_verified = false;
    }
}

/// Create payload for a task
///
/// For batch tasks `amount` is ignored; the engine derives it from
/// `sub_tasks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCreate {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub location: String,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub is_batch: bool,
    #[serde(default)]
    pub sub_tasks: Vec<SubTaskInput>,
}

/// Sub-task input (no id; the engine assigns one)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubTaskInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
}

/// Update payload for a task
///
/// `sub_tasks`, when present, replaces the whole list; the parent amount
/// is recomputed in the same write.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub sub_tasks: Option<Vec<SubTaskInput>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(id: &str, amount: f64) -> SubTask {
        SubTask {
            id: id.to_string(),
            title: format!("part {}", id),
            description: String::new(),
            amount,
        }
    }

    fn batch_task() -> Task {
        Task {
            id: "t-1".to_string(),
            title: "Stock count".to_string(),
            description: String::new(),
            amount: 0.0,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end_date: None,
            location: "Site A".to_string(),
            status: TaskStatus::Open,
            created_by: "admin-1".to_string(),
            created_at: 0,
            assigned_to: None,
            is_batch: true,
            sub_tasks: vec![sub("s-1", 50.0), sub("s-2", 70.5), sub("s-3", 29.5)],
            completion_photo: None,
            completion_location_verified: false,
            rejection_reason: None,
            payment_method: PaymentMethod::Cash,
        }
    }

    #[test]
    fn test_batch_total() {
        assert_eq!(batch_task().batch_total(), 150.0);
    }

    #[test]
    fn test_recompute_amount_syncs_with_sub_tasks() {
        let mut task = batch_task();
        task.recompute_amount();
        assert_eq!(task.amount, 150.0);

        task.sub_tasks.push(sub("s-4", 10.0));
        task.recompute_amount();
        assert_eq!(task.amount, 160.0);

        task.sub_tasks.remove(0);
        task.recompute_amount();
        assert_eq!(task.amount, 110.0);
    }

    #[test]
    fn test_recompute_amount_ignores_single_tasks() {
        let mut task = batch_task();
        task.is_batch = false;
        task.sub_tasks.clear();
        task.amount = 150.0;
        task.recompute_amount();
        assert_eq!(task.amount, 150.0);
    }

    #[test]
    fn test_clear_proof() {
        let mut task = batch_task();
        task.completion_photo = Some(ImageRef::url("p.jpg"));
        task.completion_location_verified = true;
        task.clear_proof();
        assert!(task.completion_photo.is_none());
        assert!(!task.completion_location_verified);
    }

    #[test]
    fn test_status_serializes_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        assert_eq!(serde_json::to_string(&TaskStatus::Paid).unwrap(), "\"PAID\"");
    }
}
