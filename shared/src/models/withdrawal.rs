//! Withdrawal Request Model

use super::image_ref::ImageRef;
use serde::{Deserialize, Serialize};

/// Withdrawal request status
///
/// Only `Pending → Paid` and `Pending → Rejected` are produced today.
/// `Approved` is reserved for a future two-step approve-then-pay flow and
/// kept in the data model so adding that flow needs no migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WithdrawalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Paid,
}

/// Employee-initiated payout against accumulated earnings
///
/// Created by the employee, then mutated exactly once by an admin action
/// (paid with a receipt, or rejected with a reason); terminal thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    pub id: String,
    pub employee_id: String,
    pub amount: f64,
    pub status: WithdrawalStatus,
    /// Epoch milliseconds
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_image: Option<ImageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// Destination captured at request time; immutable even if the
    /// profile later changes
    pub method_snapshot: String,
}

impl WithdrawalRequest {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            WithdrawalStatus::Paid | WithdrawalStatus::Rejected
        )
    }
}
