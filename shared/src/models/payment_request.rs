//! Payment Request Model

use super::payment_profile::PaymentMethod;
use serde::{Deserialize, Serialize};

/// Payment release status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

/// Record of a single released payment
///
/// Created exactly once when a task transitions into `Paid` and never
/// mutated afterward — this append-only ledger is what an employee's
/// balance is computed from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub id: String,
    pub task_id: String,
    pub employee_id: String,
    pub amount: f64,
    pub method: PaymentMethod,
    /// Destination captured at confirmation time; later profile edits do
    /// not rewrite it
    pub payment_details_snapshot: String,
    pub status: PaymentStatus,
    /// Epoch milliseconds
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_round_trip() {
        let payment = PaymentRequest {
            id: "r-1".to_string(),
            task_id: "t-1".to_string(),
            employee_id: "u-2".to_string(),
            amount: 150.0,
            method: PaymentMethod::Cash,
            payment_details_snapshot: "Cash on Hand".to_string(),
            status: PaymentStatus::Paid,
            created_at: 1_700_000_000_000,
            paid_at: Some(1_700_000_000_000),
        };

        let json = serde_json::to_string(&payment).unwrap();
        assert!(json.contains("\"status\":\"PAID\""));
        let back: PaymentRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.amount, 150.0);
        assert_eq!(back.payment_details_snapshot, "Cash on Hand");
    }
}
