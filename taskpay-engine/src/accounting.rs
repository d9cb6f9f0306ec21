//! Balance accounting over the payout ledgers
//!
//! Pure, side-effect-free sums over the full PaymentRequest and
//! WithdrawalRequest collections, computed with `Decimal` internally.
//! Nothing is cached: the collections are bounded by application usage
//! volume, so every read recomputes from scratch.

use rust_decimal::Decimal;
use shared::models::{PaymentRequest, PaymentStatus, WithdrawalRequest, WithdrawalStatus};
use shared::money::{to_decimal, to_f64};

fn earned(payments: &[PaymentRequest], employee_id: &str) -> Decimal {
    payments
        .iter()
        .filter(|p| p.employee_id == employee_id && p.status == PaymentStatus::Paid)
        .map(|p| to_decimal(p.amount))
        .sum()
}

fn withdrawn(withdrawals: &[WithdrawalRequest], employee_id: &str) -> Decimal {
    withdrawals
        .iter()
        .filter(|w| w.employee_id == employee_id && w.status == WithdrawalStatus::Paid)
        .map(|w| to_decimal(w.amount))
        .sum()
}

fn pending(withdrawals: &[WithdrawalRequest], employee_id: &str) -> Decimal {
    withdrawals
        .iter()
        .filter(|w| w.employee_id == employee_id && w.status == WithdrawalStatus::Pending)
        .map(|w| to_decimal(w.amount))
        .sum()
}

/// Sum of paid-out PaymentRequest amounts for one employee
pub fn total_earned(payments: &[PaymentRequest], employee_id: &str) -> f64 {
    to_f64(earned(payments, employee_id))
}

/// Sum of already-paid withdrawal amounts for one employee
pub fn total_withdrawn(withdrawals: &[WithdrawalRequest], employee_id: &str) -> f64 {
    to_f64(withdrawn(withdrawals, employee_id))
}

/// Sum of currently-pending withdrawal amounts for one employee
pub fn pending_withdrawals(withdrawals: &[WithdrawalRequest], employee_id: &str) -> f64 {
    to_f64(pending(withdrawals, employee_id))
}

/// Earnings minus paid and pending withdrawals
///
/// The computation is exact and may return a negative value if invariants
/// were violated upstream; callers clamp at zero for display only.
pub fn available_balance(
    payments: &[PaymentRequest],
    withdrawals: &[WithdrawalRequest],
    employee_id: &str,
) -> f64 {
    to_f64(
        earned(payments, employee_id)
            - withdrawn(withdrawals, employee_id)
            - pending(withdrawals, employee_id),
    )
}

/// Fleet-wide sum of all released payments (admin dashboard)
pub fn total_distributed(payments: &[PaymentRequest]) -> f64 {
    let total: Decimal = payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Paid)
        .map(|p| to_decimal(p.amount))
        .sum();
    to_f64(total)
}

/// Fleet-wide sum of all pending withdrawal requests (admin dashboard)
pub fn total_pending_payouts(withdrawals: &[WithdrawalRequest]) -> f64 {
    let total: Decimal = withdrawals
        .iter()
        .filter(|w| w.status == WithdrawalStatus::Pending)
        .map(|w| to_decimal(w.amount))
        .sum();
    to_f64(total)
}

/// Per-employee balance aggregates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmployeeBalance {
    pub earned: f64,
    pub withdrawn: f64,
    pub pending: f64,
    /// Exact figure; may be negative after an upstream invariant breach
    pub available: f64,
}

impl EmployeeBalance {
    pub fn for_employee(
        payments: &[PaymentRequest],
        withdrawals: &[WithdrawalRequest],
        employee_id: &str,
    ) -> Self {
        let earned = earned(payments, employee_id);
        let withdrawn = withdrawn(withdrawals, employee_id);
        let pending = pending(withdrawals, employee_id);
        Self {
            earned: to_f64(earned),
            withdrawn: to_f64(withdrawn),
            pending: to_f64(pending),
            available: to_f64(earned - withdrawn - pending),
        }
    }

    /// Never negative; for UI presentation only
    pub fn available_for_display(&self) -> f64 {
        self.available.max(0.0)
    }
}

/// Fleet-wide aggregates for the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FleetTotals {
    pub distributed: f64,
    pub pending_payouts: f64,
}

pub fn fleet_totals(
    payments: &[PaymentRequest],
    withdrawals: &[WithdrawalRequest],
) -> FleetTotals {
    FleetTotals {
        distributed: total_distributed(payments),
        pending_payouts: total_pending_payouts(withdrawals),
    }
}
